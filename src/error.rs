use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Notice shown when the minutes value is not a number
pub const INVALID_MINUTES_NOTICE: &str = "Please enter only numbers";

/// Application error types
#[derive(Debug, Error)]
pub enum AppError {
    /// The CSV resource could not be fetched or read
    #[error("Failed to load runner prices from {location}: {reason}")]
    ResourceLoad { location: String, reason: String },
    /// Minutes value failed numeric validation
    #[error("Please enter only numbers (got {0:?})")]
    InvalidMinutes(String),
    /// The CSV body could not be parsed
    #[error("Malformed CSV: {0}")]
    Parse(#[from] csv::Error),
    /// Internal server error
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl AppError {
    pub fn resource_load(location: impl Into<String>, reason: impl ToString) -> Self {
        Self::ResourceLoad {
            location: location.into(),
            reason: reason.to_string(),
        }
    }

    /// Message suitable for showing to the end user
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidMinutes(_) => INVALID_MINUTES_NOTICE.to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::ResourceLoad { .. } => StatusCode::BAD_GATEWAY,
            Self::InvalidMinutes(_) => StatusCode::BAD_REQUEST,
            Self::Parse(_) => StatusCode::BAD_GATEWAY,
            Self::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": {
                "message": self.user_message(),
                "type": error_type_name(&self),
            }
        }));

        (status, body).into_response()
    }
}

fn error_type_name(error: &AppError) -> &'static str {
    match error {
        AppError::ResourceLoad { .. } => "resource_load_failure",
        AppError::InvalidMinutes(_) => "invalid_minutes",
        AppError::Parse(_) => "parse_error",
        AppError::InternalError(_) => "internal_error",
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::InternalError(err.to_string())
    }
}
