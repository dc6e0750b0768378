//! Full pipeline run: extract → assess → artifact → evaluate.
//!
//! Each stage's output feeds the next exactly as a client chaining the
//! individual routes would. The first failing stage ends the run with its own error.

use tracing::info;

use crate::errors::AppError;
use crate::pipeline::models::{
    ArtifactRequest, AssessRequest, EvaluateRequest, ExtractRequest, PipelineRunResponse,
    RunPipelineRequest,
};
use crate::pipeline::Pipeline;

impl Pipeline {
    /// POST /run-pipeline
    pub async fn run_pipeline(
        &self,
        request: &RunPipelineRequest,
    ) -> Result<PipelineRunResponse, AppError> {
        let api_key = Some(self.resolve_api_key(request.api_key.as_deref())?);

        info!(
            "Running full pipeline over {} turns",
            request.conversation.as_array().map_or(0, Vec::len)
        );

        let extracted_signals = self
            .extract_signals(&ExtractRequest {
                api_key: api_key.clone(),
                conversation: request.conversation.clone(),
            })
            .await?;

        let signal_assessment = self
            .assess_signals(&AssessRequest {
                api_key: api_key.clone(),
                conversation: request.conversation.clone(),
                signals: extracted_signals.clone(),
            })
            .await?;

        let artifact_request = ArtifactRequest {
            api_key: api_key.clone(),
            conversation: request.conversation.clone(),
            extracted_signals,
            signal_assessment,
        };
        let cognition_artifact = self.generate_artifact(&artifact_request).await?;

        let evaluate_request = EvaluateRequest {
            api_key,
            extracted_signals: artifact_request.extracted_signals,
            signal_assessment: artifact_request.signal_assessment,
            artifact: cognition_artifact,
        };
        let evaluation = self.evaluate_artifact(&evaluate_request).await?;

        Ok(PipelineRunResponse {
            extracted_signals: evaluate_request.extracted_signals,
            signal_assessment: evaluate_request.signal_assessment,
            cognition_artifact: evaluate_request.artifact,
            evaluation,
        })
    }
}
