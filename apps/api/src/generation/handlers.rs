//! HTTP handlers for the resume endpoints. Handlers stay thin: decode the
//! request, run the pipeline, hand the bytes back with download headers.

use axum::{
    extract::State,
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::generation::keywords::extract_keywords;
use crate::generation::pipeline::assemble_resume;
use crate::models::resume::{CandidateProfile, CompositionMode, JobContext, RenderOptions};
use crate::render::{download_filename, render_document};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GenerateResumeRequest {
    pub profile: CandidateProfile,
    #[serde(default)]
    pub job: JobContext,
    #[serde(default)]
    pub options: RenderOptions,
    #[serde(default)]
    pub mode: CompositionMode,
}

#[derive(Debug, Deserialize)]
pub struct KeywordPreviewRequest {
    pub job_description: String,
}

#[derive(Debug, Serialize)]
pub struct KeywordPreviewResponse {
    pub keywords: Vec<String>,
}

/// POST /api/v1/resumes/keywords
///
/// Dry-run of the keyword extractor so clients can show which tokens will
/// bias generation before spending a generation call.
pub async fn handle_keyword_preview(
    Json(request): Json<KeywordPreviewRequest>,
) -> Json<KeywordPreviewResponse> {
    let keywords = extract_keywords(&request.job_description);
    Json(KeywordPreviewResponse {
        keywords: keywords.into_iter().collect(),
    })
}

/// POST /api/v1/resumes/generate
///
/// Runs the full pipeline and returns the finished file as an attachment.
/// Rendering is CPU-bound, so it runs on the blocking pool.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateResumeRequest>,
) -> Result<Response, AppError> {
    let assembled = assemble_resume(
        state.generator.as_ref(),
        request.profile,
        request.job,
        request.options,
        request.mode,
    )
    .await?;

    let document = assembled.document;
    let format = document.options.output_format;
    let filename = download_filename(&document.profile, format);

    let bytes = tokio::task::spawn_blocking(move || render_document(&document))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("render task panicked: {e}")))??;

    info!(
        "Rendered {} ({} bytes, {} generation calls)",
        filename,
        bytes.len(),
        assembled.exchanges.len()
    );

    Ok((
        [
            (CONTENT_TYPE, format.content_type().to_string()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        Bytes::from(bytes),
    )
        .into_response())
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
