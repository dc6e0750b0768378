//! Axum route handlers for the pipeline stages. Thin wrappers over `Pipeline`.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde_json::Value;

use crate::errors::AppError;
use crate::pipeline::models::{
    ArtifactRequest, AssessRequest, BatchEvaluateRequest, BatchReferenceRequest,
    BatchReferenceResponse, DeepDiveRequest, DetectReferenceRequest, EvaluateRequest,
    ExtractRequest, FollowupRequest, NewQuestionRequest, PipelineRunResponse, QuestionResponse,
    RunPipelineRequest,
};
use crate::state::AppState;

/// Unwraps a decoded body. An unreadable body with no credential anywhere is
/// reported as a missing key, same as a readable one.
fn accept<T>(state: &AppState, body: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    match body {
        Ok(Json(request)) => Ok(request),
        Err(rejection) => {
            state.pipeline.resolve_api_key(None)?;
            Err(AppError::InvalidBody {
                status: rejection.status(),
                details: rejection.body_text(),
            })
        }
    }
}

/// POST /new-question
pub async fn handle_new_question(
    State(state): State<AppState>,
    body: Result<Json<NewQuestionRequest>, JsonRejection>,
) -> Result<Json<QuestionResponse>, AppError> {
    let request = accept(&state, body)?;
    Ok(Json(state.pipeline.new_question(&request).await?))
}

/// POST /followup-question
pub async fn handle_followup_question(
    State(state): State<AppState>,
    body: Result<Json<FollowupRequest>, JsonRejection>,
) -> Result<Json<QuestionResponse>, AppError> {
    let request = accept(&state, body)?;
    Ok(Json(state.pipeline.followup_question(&request).await?))
}

/// POST /extract-signals
pub async fn handle_extract_signals(
    State(state): State<AppState>,
    body: Result<Json<ExtractRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let request = accept(&state, body)?;
    Ok(Json(state.pipeline.extract_signals(&request).await?))
}

/// POST /assess-signals
pub async fn handle_assess_signals(
    State(state): State<AppState>,
    body: Result<Json<AssessRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let request = accept(&state, body)?;
    Ok(Json(state.pipeline.assess_signals(&request).await?))
}

/// POST /generate-artifact
pub async fn handle_generate_artifact(
    State(state): State<AppState>,
    body: Result<Json<ArtifactRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let request = accept(&state, body)?;
    Ok(Json(state.pipeline.generate_artifact(&request).await?))
}

/// POST /evaluate-artifact
pub async fn handle_evaluate_artifact(
    State(state): State<AppState>,
    body: Result<Json<EvaluateRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let request = accept(&state, body)?;
    Ok(Json(state.pipeline.evaluate_artifact(&request).await?))
}

/// POST /evaluate-batch
pub async fn handle_evaluate_batch(
    State(state): State<AppState>,
    body: Result<Json<BatchEvaluateRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let request = accept(&state, body)?;
    Ok(Json(state.pipeline.evaluate_batch(&request).await?))
}

/// POST /detect-reference
pub async fn handle_detect_reference(
    State(state): State<AppState>,
    body: Result<Json<DetectReferenceRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let request = accept(&state, body)?;
    Ok(Json(state.pipeline.detect_reference(&request).await?))
}

/// POST /detect-batch-reference
///
/// Conversations whose call or parse fails are left out of `results`.
pub async fn handle_detect_batch_reference(
    State(state): State<AppState>,
    body: Result<Json<BatchReferenceRequest>, JsonRejection>,
) -> Result<Json<BatchReferenceResponse>, AppError> {
    let request = accept(&state, body)?;
    Ok(Json(state.pipeline.detect_batch_reference(&request).await?))
}

/// POST /deep-dive-reference
pub async fn handle_deep_dive_reference(
    State(state): State<AppState>,
    body: Result<Json<DeepDiveRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let request = accept(&state, body)?;
    Ok(Json(state.pipeline.deep_dive_reference(&request).await?))
}

/// POST /run-pipeline
///
/// Extract → assess → artifact → evaluate in one request. Stops at the first failure.
pub async fn handle_run_pipeline(
    State(state): State<AppState>,
    body: Result<Json<RunPipelineRequest>, JsonRejection>,
) -> Result<Json<PipelineRunResponse>, AppError> {
    let request = accept(&state, body)?;
    Ok(Json(state.pipeline.run_pipeline(&request).await?))
}
