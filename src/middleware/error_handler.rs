//! Extractor error handlers.
//!
//! actix answers malformed bodies and query strings with plain-text errors by
//! default; these handlers route them through `AppError` so every failure
//! carries the same JSON envelope.

use actix_web::error::{JsonPayloadError, QueryPayloadError};
use actix_web::HttpRequest;

use crate::core::AppError;

/// Error handler for `web::JsonConfig`
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::debug!(path = %req.path(), error = %err, "Rejected JSON payload");

    let message = match &err {
        JsonPayloadError::ContentType => {
            "Expected a JSON body (Content-Type: application/json)".to_string()
        }
        JsonPayloadError::Deserialize(e) => format!("Malformed JSON body: {}", e),
        other => other.to_string(),
    };

    AppError::validation(message).into()
}

/// Error handler for `web::QueryConfig`
pub fn query_error_handler(err: QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::debug!(path = %req.path(), error = %err, "Rejected query string");

    AppError::validation(format!("Malformed query string: {}", err)).into()
}
