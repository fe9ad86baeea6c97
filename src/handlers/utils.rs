use axum::{extract::rejection::JsonRejection, Json};

use crate::error::ApiError;

/// Parse the `:id` path segment
pub fn parse_id(raw: &str) -> Result<i32, ApiError> {
    raw.parse::<i32>()
        .map_err(|_| ApiError::bad_request(format!("invalid id: {}", raw)))
}

/// Unwrap a JSON body, turning any rejection (syntax, type, content type) into a 400
pub fn decode_json<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload.map(|Json(value)| value).map_err(ApiError::from)
}

/// Required string fields must be non-empty
pub fn require_non_empty(field: &str, value: &str) -> Result<(), ApiError> {
    if value.is_empty() {
        return Err(ApiError::missing_field(field));
    }
    Ok(())
}

/// Method fallback for every resource route
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
