//! Handler error type and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

/// The two failure modes of the task handlers.
///
/// `NotFound` deliberately carries no detail: an unknown id and a task owned
/// by someone else produce the same response. `Internal` exposes the raw
/// error chain in the body (see DESIGN.md before hardening this).
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Task not found")]
    NotFound,
    #[error("{message}")]
    Internal {
        message: &'static str,
        #[source]
        source: anyhow::Error,
    },
}

impl ApiError {
    pub fn internal(message: &'static str, source: anyhow::Error) -> Self {
        Self::Internal { message, source }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound => (
                StatusCode::NOT_FOUND,
                Json(json!({ "message": "Task not found" })),
            )
                .into_response(),
            ApiError::Internal { message, source } => {
                error!("{message}: {source:#}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "message": message, "error": format!("{source:#}") })),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_not_found_response() {
        let resp = ApiError::NotFound.into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_internal_response() {
        let resp = ApiError::internal("Error creating task", anyhow::anyhow!("disk full"))
            .into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
