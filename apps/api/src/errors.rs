//! Application error taxonomy. Three failure classes cross the API boundary:
//! invalid input, generation failure, render failure. All are fatal for the
//! request — the pipeline never retries and never returns a partial document.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::render::RenderError;

#[derive(Debug, Error)]
pub enum AppError {
    /// Request rejected before any generation call was made.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A generation adapter call failed or returned nothing usable.
    #[error("Generation failed: {0}")]
    Generation(String),

    /// The assembled document could not be rendered to bytes.
    #[error("Render failed: {0}")]
    Render(#[from] RenderError),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
            AppError::Generation(msg) => {
                tracing::error!("Generation failure: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "GENERATION_ERROR",
                    msg.clone(),
                )
            }
            AppError::Render(err) => {
                tracing::error!("Render failure: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "RENDER_ERROR",
                    err.to_string(),
                )
            }
            AppError::Internal(err) => {
                tracing::error!("Internal error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_maps_to_400() {
        let response = AppError::Validation("required fields are empty: skills".to_string())
            .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_generation_error_maps_to_500() {
        let response = AppError::Generation("summary generation failed".to_string())
            .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_render_error_maps_to_500() {
        let err = AppError::Render(RenderError::UnsupportedCharacter {
            ch: '→',
            context: "summary",
        });
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_display_keeps_field_names_visible() {
        let err = AppError::Validation("required fields are empty: skills, phone".to_string());
        let msg = err.to_string();
        assert!(msg.contains("skills"));
        assert!(msg.contains("phone"));
    }
}
