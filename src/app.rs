use std::path::Path;

use axum::extract::DefaultBodyLimit;
use axum::http::Method;
use axum::routing::{delete, get, post, put};
use axum::{Json, Router, middleware};
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::infrastructure::image_store::MAX_IMAGE_BYTES;
use crate::interface::http::{
    achievement_handler, auth_handler, contact_handler, course_handler, directory_handler,
    enquiry_handler, event_handler, news_handler, placement_handler, testimonial_handler,
};
use crate::state::AppState;

async fn root() -> &'static str {
    "Campus administration API"
}

async fn api_info() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "message": "Campus admin API is live",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub fn build_router(state: AppState, public_dir: &Path) -> Router {
    let public = Router::new()
        .route("/", get(root))
        .route("/api", get(api_info))
        .route("/signup", post(auth_handler::signup))
        .route("/login", post(auth_handler::login))
        .route("/submitForm", post(enquiry_handler::submit_enquiry))
        .route("/submit-contact", post(contact_handler::submit_contact))
        .route("/getEvents", get(event_handler::list_events))
        .route("/getEventCount", get(event_handler::get_event_count))
        .route("/getEventById/{eventId}", get(event_handler::get_event))
        .route("/getCourses", get(course_handler::list_courses))
        .route("/getCourseById/{courseId}", get(course_handler::get_course))
        .route("/getFaculty", get(directory_handler::list_faculty))
        .route("/getBoardMembers", get(directory_handler::list_board_members))
        .route("/getCampusNews", get(news_handler::list_campus_news))
        .route(
            "/getCampusNewsById/{newsId}",
            get(news_handler::get_campus_news),
        )
        .route("/getUniversityNews", get(news_handler::list_university_news))
        .route(
            "/getUniversityNewsById/{newsId}",
            get(news_handler::get_university_news),
        )
        .route("/getPlacement", get(placement_handler::list_placements))
        .route("/getRankHolders", get(placement_handler::list_rank_holders))
        .route(
            "/getCampusAchievements",
            get(achievement_handler::list_achievements),
        )
        .route(
            "/getCampusAchievementById/{achievementId}",
            get(achievement_handler::get_achievement),
        )
        .route("/getTestimonials", get(testimonial_handler::list_testimonials));

    let admin = Router::new()
        .route("/createAdmin", post(auth_handler::create_admin))
        .route("/deleteAdmin", delete(auth_handler::delete_admin))
        .route("/getEnquiryList", get(enquiry_handler::list_enquiries))
        .route("/view-enquiry/{formId}", get(enquiry_handler::get_enquiry))
        .route("/updateEnquiry", put(enquiry_handler::update_enquiry))
        .route(
            "/deleteEnquiry/{formId}",
            delete(enquiry_handler::delete_enquiry),
        )
        .route(
            "/delete-multiple-enquiries",
            delete(enquiry_handler::delete_enquiries),
        )
        .route("/get-contacts", get(contact_handler::list_contacts))
        .route("/contact-form-counts", get(contact_handler::contact_counts))
        .route("/contact/{contactId}", get(contact_handler::get_contact))
        .route("/update-contact", put(contact_handler::update_contact))
        .route(
            "/delete-contact/{contactId}",
            delete(contact_handler::delete_contact),
        )
        .route("/create-Event", post(event_handler::create_event))
        .route("/updateEvent/{eventId}", put(event_handler::update_event))
        .route(
            "/deleteEvent/{eventId}",
            delete(event_handler::delete_event),
        )
        .route("/addCourse", post(course_handler::add_course))
        .route(
            "/updateCourse/{courseId}",
            put(course_handler::update_course),
        )
        .route(
            "/deleteCourse/{courseId}",
            delete(course_handler::delete_course),
        )
        .route("/addFaculty", post(directory_handler::add_faculty))
        .route(
            "/updateFaculty/{facultyId}",
            put(directory_handler::update_faculty),
        )
        .route(
            "/deleteFaculty/{facultyId}",
            delete(directory_handler::delete_faculty),
        )
        .route("/addBoardMember", post(directory_handler::add_board_member))
        .route(
            "/updateBoardMember/{memberId}",
            put(directory_handler::update_board_member),
        )
        .route(
            "/deleteBoardMember/{memberId}",
            delete(directory_handler::delete_board_member),
        )
        .route("/addCampusNews", post(news_handler::add_campus_news))
        .route(
            "/updateCampusNews/{newsId}",
            put(news_handler::update_campus_news),
        )
        .route(
            "/deleteCampusNews/{newsId}",
            delete(news_handler::delete_campus_news),
        )
        .route("/addUniversityNews", post(news_handler::add_university_news))
        .route(
            "/updateUniversityNews/{newsId}",
            put(news_handler::update_university_news),
        )
        .route(
            "/deleteUniversityNews/{newsId}",
            delete(news_handler::delete_university_news),
        )
        .route("/addPlacement", post(placement_handler::add_placement))
        .route(
            "/updatePlacement/{placementId}",
            put(placement_handler::update_placement),
        )
        .route(
            "/deletePlacement/{placementId}",
            delete(placement_handler::delete_placement),
        )
        .route("/addRankHolder", post(placement_handler::add_rank_holder))
        .route(
            "/updateRankHolder/{rankHolderId}",
            put(placement_handler::update_rank_holder),
        )
        .route(
            "/deleteRankHolder/{rankHolderId}",
            delete(placement_handler::delete_rank_holder),
        )
        .route(
            "/addCampusAchievement",
            post(achievement_handler::add_achievement),
        )
        .route(
            "/updateCampusAchievement/{achievementId}",
            put(achievement_handler::update_achievement),
        )
        .route(
            "/deleteCampusAchievement/{achievementId}",
            delete(achievement_handler::delete_achievement),
        )
        .route("/addTestimonial", post(testimonial_handler::add_testimonial))
        .route(
            "/deleteTestimonial/{testimonialId}",
            delete(testimonial_handler::delete_testimonial),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_handler::require_admin,
        ));

    Router::new()
        .merge(public)
        .merge(admin)
        .nest_service("/uploads", ServeDir::new(public_dir.join("uploads")))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_headers(Any)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::DELETE,
                    Method::OPTIONS,
                ]),
        )
        .layer(DefaultBodyLimit::max(MAX_IMAGE_BYTES + 1024 * 1024))
        .with_state(state)
}
