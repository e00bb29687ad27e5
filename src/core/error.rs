use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};

/// Application-wide Result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Main application error type
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// Negative, fractional or out-of-range monetary input
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Tax rate name that is not recognized or not configured
    #[error("Unknown tax rate: {0}")]
    UnknownRate(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// The record store rejected a write (duplicate key, missing or malformed field)
    #[error("Constraint violation: {0}")]
    Constraint(String),

    /// Write attempted against an append-only record
    #[error("Immutable record: {0}")]
    ImmutableRecord(String),

    /// Validation errors for request parameters
    #[error("Validation error: {0}")]
    Validation(String),

    /// Database operation errors
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Internal server errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Stable machine-readable name used in error responses
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::InvalidAmount(_) => "invalid_amount",
            AppError::UnknownRate(_) => "unknown_rate",
            AppError::NotFound(_) => "not_found",
            AppError::Constraint(_) => "constraint",
            AppError::ImmutableRecord(_) => "immutable_record",
            AppError::Validation(_) => "validation",
            AppError::Database(_) => "database",
            AppError::Configuration(_) => "configuration",
            AppError::Json(_) => "json",
            AppError::Internal(_) => "internal",
        }
    }

    pub fn invalid_amount(msg: impl Into<String>) -> Self {
        AppError::InvalidAmount(msg.into())
    }

    pub fn unknown_rate(name: impl Into<String>) -> Self {
        AppError::UnknownRate(name.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        AppError::NotFound(resource.into())
    }

    pub fn constraint(msg: impl Into<String>) -> Self {
        AppError::Constraint(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let status_code = self.status_code();

        // Database details stay in the logs
        let message = match self {
            AppError::Database(err) => {
                tracing::error!(error = %err, "Database error");
                "Database error".to_string()
            }
            other => other.to_string(),
        };

        HttpResponse::build(status_code).json(serde_json::json!({
            "error": {
                "code": status_code.as_u16(),
                "kind": self.kind(),
                "message": message,
            }
        }))
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidAmount(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::UnknownRate(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Constraint(_) => StatusCode::CONFLICT,
            AppError::ImmutableRecord(_) => StatusCode::CONFLICT,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Json(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
