mod common;

use axum::http::StatusCode;
use common::{ACCESS_CODE, get_request, json_request, send, test_app};
use serde_json::json;

#[tokio::test]
async fn signup_login_and_gated_access_round_trip() {
    let harness = test_app();

    let (status, body) = send(
        harness.app.clone(),
        json_request(
            "POST",
            "/signup",
            None,
            json!({ "name": "Root", "email": "root@campus.test", "password": "root-pass" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], true);

    let (status, body) = send(
        harness.app.clone(),
        json_request(
            "POST",
            "/login",
            None,
            json!({ "email": "root@campus.test", "password": "root-pass" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let token = body["data"]["token"].as_str().expect("token").to_string();

    let (status, _) = send(
        harness.app.clone(),
        get_request("/getEnquiryList", Some(&token)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn duplicate_signup_conflicts() {
    let harness = test_app();
    let payload = json!({ "name": "Root", "email": "root@campus.test", "password": "pw" });

    send(
        harness.app.clone(),
        json_request("POST", "/signup", None, payload.clone()),
    )
    .await;
    let (status, _) = send(
        harness.app.clone(),
        json_request("POST", "/signup", None, payload),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn login_failures_map_to_the_right_statuses() {
    let harness = test_app();
    send(
        harness.app.clone(),
        json_request(
            "POST",
            "/signup",
            None,
            json!({ "name": "Root", "email": "root@campus.test", "password": "pw" }),
        ),
    )
    .await;

    let (status, _) = send(
        harness.app.clone(),
        json_request(
            "POST",
            "/login",
            None,
            json!({ "email": "root@campus.test", "password": "wrong" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        harness.app.clone(),
        json_request(
            "POST",
            "/login",
            None,
            json!({ "email": "nobody@campus.test", "password": "pw" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn admin_accounts_are_created_behind_the_access_code() {
    let harness = test_app();
    let root_token_setup = json!({ "name": "Root", "email": "root@campus.test", "password": "pw" });
    send(
        harness.app.clone(),
        json_request("POST", "/signup", None, root_token_setup),
    )
    .await;
    let (_, login) = send(
        harness.app.clone(),
        json_request(
            "POST",
            "/login",
            None,
            json!({ "email": "root@campus.test", "password": "pw" }),
        ),
    )
    .await;
    let token = login["data"]["token"].as_str().unwrap().to_string();

    // wrong access code
    let (status, _) = send(
        harness.app.clone(),
        json_request(
            "POST",
            "/createAdmin",
            Some(&token),
            json!({
                "superAdminEmail": "root@campus.test",
                "name": "Office",
                "email": "office@campus.test",
                "password": "office-pw",
                "code": "wrong-code"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        harness.app.clone(),
        json_request(
            "POST",
            "/createAdmin",
            Some(&token),
            json!({
                "superAdminEmail": "root@campus.test",
                "name": "Office",
                "email": "office@campus.test",
                "password": "office-pw",
                "code": ACCESS_CODE
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    // the new admin can log in and reach gated routes
    let (_, login) = send(
        harness.app.clone(),
        json_request(
            "POST",
            "/login",
            None,
            json!({ "email": "office@campus.test", "password": "office-pw" }),
        ),
    )
    .await;
    let admin_token = login["data"]["token"].as_str().unwrap().to_string();
    let (status, _) = send(
        harness.app.clone(),
        get_request("/get-contacts", Some(&admin_token)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // and can be removed again by the superadmin
    let (status, _) = send(
        harness.app.clone(),
        json_request(
            "DELETE",
            "/deleteAdmin",
            Some(&token),
            json!({ "superAdminEmail": "root@campus.test", "adminEmail": "office@campus.test" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        harness.app.clone(),
        json_request(
            "POST",
            "/login",
            None,
            json!({ "email": "office@campus.test", "password": "office-pw" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
