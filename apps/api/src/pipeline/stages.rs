//! Single-call stages. Each resolves the credential first, so a missing key
//! never reaches the completion service.

use serde_json::{json, Value};

use crate::catalog::{lookup, Stage};
use crate::errors::AppError;
use crate::llm_client::messages::to_json;
use crate::pipeline::models::{
    ArtifactRequest, AssessRequest, BatchEvaluateRequest, DeepDiveRequest,
    DetectReferenceRequest, EvaluateRequest, ExtractRequest, FollowupRequest, NewQuestionRequest,
    QuestionResponse,
};
use crate::pipeline::Pipeline;

/// Filler turn placed after each artifact in a batch evaluation.
const BATCH_ARTIFACT_ACK: &str = "Provide another artifact if needed.";

impl Pipeline {
    /// POST /new-question — the instruction is the whole conversation.
    pub async fn new_question(
        &self,
        request: &NewQuestionRequest,
    ) -> Result<QuestionResponse, AppError> {
        let api_key = self.resolve_api_key(request.api_key.as_deref())?;
        let messages = lookup(Stage::Question).messages().build();
        let question = self.complete(Stage::Question, &api_key, messages).await?;
        Ok(QuestionResponse { question })
    }

    /// POST /followup-question
    pub async fn followup_question(
        &self,
        request: &FollowupRequest,
    ) -> Result<QuestionResponse, AppError> {
        let api_key = self.resolve_api_key(request.api_key.as_deref())?;

        let messages = lookup(Stage::Followup)
            .messages()
            .user_json(&request.conversation)
            .user(evaluation_digest(&request.evaluation))
            .build();

        let question = self.complete(Stage::Followup, &api_key, messages).await?;
        Ok(QuestionResponse { question })
    }

    /// POST /extract-signals
    pub async fn extract_signals(&self, request: &ExtractRequest) -> Result<Value, AppError> {
        let api_key = self.resolve_api_key(request.api_key.as_deref())?;
        let messages = lookup(Stage::Extract)
            .messages()
            .user_json(&request.conversation)
            .build();
        self.complete_json(Stage::Extract, &api_key, messages).await
    }

    /// POST /assess-signals — signals first, then the transcript they came from.
    pub async fn assess_signals(&self, request: &AssessRequest) -> Result<Value, AppError> {
        let api_key = self.resolve_api_key(request.api_key.as_deref())?;
        let messages = lookup(Stage::Assess)
            .messages()
            .user_json(&request.signals)
            .user_json(&request.conversation)
            .build();
        self.complete_json(Stage::Assess, &api_key, messages).await
    }

    /// POST /generate-artifact
    pub async fn generate_artifact(&self, request: &ArtifactRequest) -> Result<Value, AppError> {
        let api_key = self.resolve_api_key(request.api_key.as_deref())?;
        let input = json!({
            "conversation": request.conversation,
            "extractedSignals": request.extracted_signals,
            "signalAssessment": request.signal_assessment,
        });
        let messages = lookup(Stage::Artifact).messages().user_json(&input).build();
        self.complete_json(Stage::Artifact, &api_key, messages).await
    }

    /// POST /evaluate-artifact
    pub async fn evaluate_artifact(&self, request: &EvaluateRequest) -> Result<Value, AppError> {
        let api_key = self.resolve_api_key(request.api_key.as_deref())?;
        let messages = lookup(Stage::Evaluate)
            .messages()
            .user_json(&request.extracted_signals)
            .user_json(&request.signal_assessment)
            .user_json(&request.artifact)
            .build();
        self.complete_json(Stage::Evaluate, &api_key, messages).await
    }

    /// POST /evaluate-batch — all artifacts in one call, each followed by an assistant ack.
    pub async fn evaluate_batch(&self, request: &BatchEvaluateRequest) -> Result<Value, AppError> {
        let api_key = self.resolve_api_key(request.api_key.as_deref())?;

        let messages = request
            .artifacts()
            .iter()
            .fold(lookup(Stage::BatchEvaluate).messages(), |builder, artifact| {
                builder.user_json(artifact).assistant(BATCH_ARTIFACT_ACK)
            })
            .build();

        self.complete_json(Stage::BatchEvaluate, &api_key, messages)
            .await
    }

    /// POST /detect-reference
    pub async fn detect_reference(
        &self,
        request: &DetectReferenceRequest,
    ) -> Result<Value, AppError> {
        let api_key = self.resolve_api_key(request.api_key.as_deref())?;
        let input = json!({
            "strength": request.strength,
            "conversation": request.conversation,
        });
        let messages = lookup(Stage::DetectReference)
            .messages()
            .user_json(&input)
            .build();
        self.complete_json(Stage::DetectReference, &api_key, messages)
            .await
    }

    /// POST /deep-dive-reference
    pub async fn deep_dive_reference(&self, request: &DeepDiveRequest) -> Result<Value, AppError> {
        let api_key = self.resolve_api_key(request.api_key.as_deref())?;
        let input = json!({
            "point": request.point,
            "conversation": request.conversation,
        });
        let messages = lookup(Stage::DeepDiveReference)
            .messages()
            .user_json(&input)
            .build();
        self.complete_json(Stage::DeepDiveReference, &api_key, messages)
            .await
    }
}

/// `overall_assessment` and `recommendations` as JSON, one per line.
/// Absent fields render as `""`.
fn evaluation_digest(evaluation: &Value) -> String {
    let empty = Value::String(String::new());
    let field = |name: &str| to_json(evaluation.get(name).unwrap_or(&empty));
    format!(
        "{}\n{}",
        field("overall_assessment"),
        field("recommendations")
    )
}
