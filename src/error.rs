// error.rs
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Failure of a `PollStore` backend operation.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("a vote already exists for this fingerprint")]
    DuplicateVote,

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        StoreError::Unavailable(e.to_string())
    }
}

/// Failure to retrieve a poll-content resource from the source host.
#[derive(Debug, Error)]
#[error("poll source unavailable: {0}")]
pub struct SourceError(pub String);

/// Request-terminal errors. Each variant maps to exactly one HTTP status;
/// none is retried anywhere in the core.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Poll source unavailable: {0}")]
    PollSourceUnavailable(String),

    #[error("Poll has no options")]
    EmptyOptions,

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Invalid vote or fingerprint")]
    InvalidVote,

    #[error("You have already voted")]
    DuplicateVote,

    #[error("Malformed request body")]
    MalformedRequest,
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::PollSourceUnavailable(_)
            | AppError::EmptyOptions
            | AppError::StorageUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::InvalidVote | AppError::DuplicateVote | AppError::MalformedRequest => {
                StatusCode::BAD_REQUEST
            }
        }
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::DuplicateVote => AppError::DuplicateVote,
            StoreError::Unavailable(msg) => AppError::StorageUnavailable(msg),
        }
    }
}

impl From<SourceError> for AppError {
    fn from(e: SourceError) -> Self {
        AppError::PollSourceUnavailable(e.0)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(%status, error = %self, "request failed");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_faults_map_to_400() {
        assert_eq!(AppError::InvalidVote.status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::DuplicateVote.status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::MalformedRequest.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn source_and_storage_faults_map_to_500() {
        assert_eq!(
            AppError::PollSourceUnavailable("timeout".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(AppError::EmptyOptions.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            AppError::StorageUnavailable("connection refused".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn store_errors_convert_to_their_request_errors() {
        assert!(matches!(
            AppError::from(StoreError::DuplicateVote),
            AppError::DuplicateVote
        ));
        assert!(matches!(
            AppError::from(StoreError::Unavailable("down".into())),
            AppError::StorageUnavailable(_)
        ));
    }

    #[test]
    fn duplicate_vote_message_is_client_facing() {
        assert_eq!(AppError::DuplicateVote.to_string(), "You have already voted");
        assert_eq!(AppError::InvalidVote.to_string(), "Invalid vote or fingerprint");
    }
}
