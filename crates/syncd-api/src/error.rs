use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::{error, warn};

use syncd_db::PersistenceError;
use syncd_types::api::ApiResponse;

use crate::validate::FieldError;

/// Terminal outcome of a failed request. Every variant renders the standard
/// envelope; none is retried.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required identifying or payload field is missing.
    #[error("{0}")]
    Param(String),

    /// A structured payload broke one of its declared rules.
    #[error(transparent)]
    Validation(#[from] FieldError),

    /// The store failed. `message` is what the client sees; `source` is only
    /// logged.
    #[error("{message}")]
    App {
        message: String,
        #[source]
        source: PersistenceError,
    },

    #[error("response encoding failed: {0}")]
    Encode(#[from] serde_json::Error),
}

impl AppError {
    pub fn param(message: impl Into<String>) -> Self {
        Self::Param(message.into())
    }

    /// Wraps a store failure under a generic client-facing message, for use
    /// with `map_err`.
    pub fn app(message: impl Into<String>) -> impl FnOnce(PersistenceError) -> Self {
        let message = message.into();
        move |source| Self::App { message, source }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            Self::Param(message) => {
                warn!("Rejected request: {}", message);
                (StatusCode::BAD_REQUEST, Json(ApiResponse::param_error(message))).into_response()
            }
            Self::Validation(err) => {
                warn!("Validation failed on {}: {}", err.field, err.message);
                (StatusCode::BAD_REQUEST, Json(ApiResponse::param_error(err.message))).into_response()
            }
            Self::App { message, source } => {
                if source.is_not_found() {
                    warn!("{}: {}", message, source);
                } else {
                    error!("{}: {}", message, source);
                }
                (StatusCode::INTERNAL_SERVER_ERROR, Json(ApiResponse::app_error(message)))
                    .into_response()
            }
            Self::Encode(err) => {
                error!("Response encoding failed: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ApiResponse::app_error("response encoding failed")),
                )
                    .into_response()
            }
        }
    }
}
