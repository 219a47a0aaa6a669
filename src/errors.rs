use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::error::DbErr;
use serde::{Deserialize, Serialize};
use tracing::error;

/// Error body sent to clients: a human-readable message plus, for execution
/// faults only, the underlying fault's text.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Startup-level errors; these terminate the process before serving.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("database error: {0}")]
    DatabaseError(#[from] DbErr),
}

/// Errors produced while executing a scenario or query.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("{0}")]
    Validation(String),

    #[error("Invalid role name")]
    InvalidRole(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    pub fn db_error(e: DbErr) -> Self {
        ServiceError::Database(e)
    }

    /// Single source of truth for error-to-status mapping.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::InvalidRole(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn is_client_fault(&self) -> bool {
        self.status_code().is_client_error()
    }
}

/// HTTP-layer error: a service fault wrapped with the per-endpoint context
/// message ("Error registering employee", ...) used in the 500 envelope.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{context}: {source}")]
    Scenario {
        context: String,
        #[source]
        source: ServiceError,
    },

    #[error("{0}")]
    Validation(String),
}

impl ApiError {
    /// Wrap a service error with the endpoint's context message.
    pub fn scenario(context: &str, source: ServiceError) -> Self {
        ApiError::Scenario {
            context: context.to_string(),
            source,
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation(message.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Validation(message) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    message,
                    error: None,
                },
            ),
            ApiError::Scenario { context, source } => {
                if source.is_client_fault() {
                    (
                        source.status_code(),
                        ErrorResponse {
                            message: source.to_string(),
                            error: None,
                        },
                    )
                } else {
                    error!("{}: {}", context, source);
                    (
                        source.status_code(),
                        ErrorResponse {
                            message: context,
                            error: Some(source.to_string()),
                        },
                    )
                }
            }
        };

        (status, Json(body)).into_response()
    }
}
