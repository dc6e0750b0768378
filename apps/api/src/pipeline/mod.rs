//! Pipeline Orchestrator — one operation per stage.
//!
//! Flow for every stage: resolve credential → build messages from the catalog
//! entry → one completion call → (JSON stages) sanitize and decode → return.
//! The batch reference stage repeats the call per conversation and skips
//! failures instead of surfacing them.
//!
//! All completion calls go through `ChatCompletion`; nothing here talks HTTP.

pub mod batch;
pub mod handlers;
pub mod models;
pub mod run;
pub mod shape;
pub mod stages;

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use crate::catalog::{lookup, Stage};
use crate::config::Config;
use crate::errors::AppError;
use crate::llm_client::sanitize::parse_reply;
use crate::llm_client::{ChatCompletion, CompletionRequest, LlmError, Message};

/// Stateless orchestrator shared by all handlers. Cheap to clone.
#[derive(Clone)]
pub struct Pipeline {
    llm: Arc<dyn ChatCompletion>,
    default_api_key: Option<String>,
}

impl Pipeline {
    pub fn new(llm: Arc<dyn ChatCompletion>, config: &Config) -> Self {
        Self {
            llm,
            default_api_key: config.openai_api_key.clone(),
        }
    }

    /// A non-empty per-request key wins; otherwise the configured default.
    pub fn resolve_api_key(&self, requested: Option<&str>) -> Result<String, AppError> {
        requested
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .or(self.default_api_key.as_deref())
            .map(str::to_string)
            .ok_or(AppError::MissingApiKey)
    }

    /// Sends one stage call and returns the raw reply text.
    async fn complete(
        &self,
        stage: Stage,
        api_key: &str,
        messages: Vec<Message>,
    ) -> Result<String, LlmError> {
        let spec = lookup(stage);
        debug!(
            "Calling {} stage: model={}, messages={}",
            stage,
            spec.model,
            messages.len()
        );

        let request = CompletionRequest {
            model: spec.model,
            messages,
            json_output: spec.json_output,
            temperature: spec.temperature,
        };

        self.llm.complete(api_key, &request).await
    }

    /// Sends one stage call and decodes the reply as JSON.
    ///
    /// Decode failures carry the sanitized text back to the caller. Missing
    /// top-level fields are only logged; the value is returned as the model sent it.
    async fn complete_json(
        &self,
        stage: Stage,
        api_key: &str,
        messages: Vec<Message>,
    ) -> Result<Value, AppError> {
        let reply = self.complete(stage, api_key, messages).await?;

        let value = parse_reply(&reply).map_err(|failure| AppError::Parse {
            label: lookup(stage).parse_failure.unwrap_or("Failed to parse reply"),
            failure,
        })?;

        let missing = shape::missing_fields(stage, &value);
        if !missing.is_empty() {
            warn!("{} reply is missing expected fields: {:?}", stage, missing);
        }

        Ok(value)
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use crate::llm_client::fake::ScriptedCompletion;

    #[test]
    fn test_request_key_wins_over_default() {
        let fake = Arc::new(ScriptedCompletion::new());
        let pipeline = pipeline_with_default_key(&fake, "sk-default");
        assert_eq!(pipeline.resolve_api_key(Some("sk-request")).unwrap(), "sk-request");
    }

    #[test]
    fn test_blank_request_key_falls_back_to_default() {
        let fake = Arc::new(ScriptedCompletion::new());
        let pipeline = pipeline_with_default_key(&fake, "sk-default");
        assert_eq!(pipeline.resolve_api_key(Some("  ")).unwrap(), "sk-default");
        assert_eq!(pipeline.resolve_api_key(None).unwrap(), "sk-default");
    }

    #[test]
    fn test_no_key_anywhere_is_missing_api_key() {
        let fake = Arc::new(ScriptedCompletion::new());
        let pipeline = pipeline(&fake);
        assert!(matches!(
            pipeline.resolve_api_key(None),
            Err(AppError::MissingApiKey)
        ));
        assert!(matches!(
            pipeline.resolve_api_key(Some("")),
            Err(AppError::MissingApiKey)
        ));
    }
}
