use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::config::ConfigError;
use crate::telemetry::TelemetryError;

/// Failure taxonomy shared by every service operation. All variants are
/// terminal and per-request; no operation retries locally.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("authentication failed: {0}")]
    Unauthenticated(String),
    #[error("not authorized: {0}")]
    Forbidden(String),
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("{0}")]
    Conflict(&'static str),
    #[error("activity is full")]
    CapacityExceeded,
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("credential processing failed")]
    Credential(#[from] crate::auth::PasswordError),
    #[error("token processing failed")]
    Token(#[from] crate::auth::TokenError),
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

impl ServiceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            ServiceError::Forbidden(_) => StatusCode::FORBIDDEN,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Conflict(_) => StatusCode::CONFLICT,
            ServiceError::CapacityExceeded => StatusCode::UNPROCESSABLE_ENTITY,
            ServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
            ServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
            ServiceError::Repository(RepositoryError::Unavailable(_))
            | ServiceError::Credential(_)
            | ServiceError::Token(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

/// Top-level application error for the API binary: configuration,
/// telemetry, and server bootstrap failures.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("server error: {0}")]
    Server(#[from] axum::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "error": self.to_string() }));
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}
