use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use railstock_core::DomainError;

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
        DomainError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "not found"),
        DomainError::DuplicateKey(number) => json_error(
            StatusCode::CONFLICT,
            "duplicate_unique_number",
            format!("a component with unique number {number} already exists"),
        ),
        DomainError::Conflict(msg) => json_error(StatusCode::CONFLICT, "conflict", msg),
        DomainError::ReferentialConflict(msg) => {
            json_error(StatusCode::CONFLICT, "referential_conflict", msg)
        }
        DomainError::Storage(_) => json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "storage_error",
            "error accessing the component store",
        ),
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
