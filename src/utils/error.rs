use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::{HttpRequest, HttpResponse};

/// Rewrites actix's JSON payload rejections into the service's standard
/// `{"message": ...}` client-error body, so a malformed request body gets the
/// same 400 shape as every other failure.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let message = err.to_string();
    let response = HttpResponse::BadRequest().json(serde_json::json!({ "message": message }));
    InternalError::from_response(err, response).into()
}
