//! Maps domain errors to HTTP responses.

use crate::errors::Error;
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// JSON body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Human-readable message
    pub error: String,
}

impl Error {
    /// HTTP status code reported for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::NoTablesAvailable { .. }
            | Self::ReservationNotFound { .. }
            | Self::InvalidCredentials => StatusCode::NOT_FOUND,
            Self::InvalidSeatCount { .. } | Self::DateNotInFuture { .. } | Self::Validation { .. } => {
                StatusCode::BAD_REQUEST
            }
            Self::UsernameTaken { .. } => StatusCode::CONFLICT,
            Self::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            Self::Config { .. }
            | Self::Storage(_)
            | Self::SettingsMissing
            | Self::PasswordHash { .. }
            | Self::Token(_)
            | Self::Io(_)
            | Self::EnvVar(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "Internal server error");
            "internal server error".to_string()
        } else {
            self.to_string()
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation {
            message: rejection.body_text(),
        }
    }
}
