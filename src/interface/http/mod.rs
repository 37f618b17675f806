pub mod achievement_handler;
pub mod auth_handler;
pub mod contact_handler;
pub mod course_handler;
pub mod directory_handler;
pub mod enquiry_handler;
pub mod event_handler;
pub mod news_handler;
pub mod placement_handler;
pub mod reply;
pub mod testimonial_handler;
pub mod upload;

use axum::http::HeaderMap;

use crate::infrastructure::image_store::RequestOrigin;

/// Captures the inbound request's scheme and host so stored image paths can
/// be projected into absolute URLs. Honors `x-forwarded-proto` when a proxy
/// terminates TLS in front of the service.
pub fn request_origin(headers: &HeaderMap) -> RequestOrigin {
    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("http");
    let host = headers
        .get(axum::http::header::HOST)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("localhost");
    RequestOrigin::new(scheme, host)
}
