//! Batch reference detection — one completion call per conversation.
//!
//! Items are processed one at a time in input order. A call or parse failure
//! drops that item from the results and moves on: one bad transcript must not
//! block the rest of a candidate's result set, and skipped items leave no marker.

use serde_json::Value;
use tracing::{info, warn};

use crate::catalog::{lookup, Stage};
use crate::errors::AppError;
use crate::llm_client::messages::to_json;
use crate::pipeline::models::{
    inline_text, BatchConversation, BatchReferenceRequest, BatchReferenceResponse,
    BatchReferenceResult,
};
use crate::pipeline::Pipeline;

impl Pipeline {
    /// POST /detect-batch-reference
    pub async fn detect_batch_reference(
        &self,
        request: &BatchReferenceRequest,
    ) -> Result<BatchReferenceResponse, AppError> {
        let api_key = self.resolve_api_key(request.api_key.as_deref())?;

        let pattern = inline_text(&request.pattern);
        let items = request.conversations();

        info!(
            "Batch reference detection for pattern {:?} over {} conversations",
            pattern,
            items.len()
        );

        let mut results = Vec::with_capacity(items.len());

        for item in &items {
            match self.detect_in_conversation(&api_key, &pattern, item).await {
                Ok(result) => results.push(result),
                Err(e) => warn!(
                    "Skipping conversation {} ({}): {e}",
                    item.id, item.title
                ),
            }
        }

        Ok(BatchReferenceResponse { results })
    }

    async fn detect_in_conversation(
        &self,
        api_key: &str,
        pattern: &str,
        item: &BatchConversation,
    ) -> Result<BatchReferenceResult, AppError> {
        let messages = lookup(Stage::DetectBatchReference)
            .messages()
            .user(format!("Cognitive pattern: {pattern}"))
            .user(format!(
                "Run detection on the following conversation: {}",
                to_json(&item.conversation)
            ))
            .build();

        let detection = self
            .complete_json(Stage::DetectBatchReference, api_key, messages)
            .await?;

        Ok(BatchReferenceResult {
            conversation_id: item.id.clone(),
            conversation_title: item.title.clone(),
            reference: detection.get("reference").cloned().unwrap_or(Value::Null),
            supporting_material: detection
                .get("supporting_material")
                .cloned()
                .unwrap_or_else(|| Value::Array(Vec::new())),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::catalog::prompts;
    use crate::llm_client::fake::ScriptedCompletion;
    use crate::llm_client::{LlmError, Role};
    use crate::pipeline::test_support::pipeline;

    fn item(id: i64, title: &str, said: &str) -> Value {
        json!({
            "id": id,
            "title": title,
            "conversation": [{"role": "user", "content": said}]
        })
    }

    fn request(items: Vec<Value>) -> BatchReferenceRequest {
        BatchReferenceRequest {
            api_key: Some("sk-test".to_string()),
            pattern: json!("Failure mode anticipation"),
            conversations: Value::Array(items),
        }
    }

    fn detection(quote: &str) -> String {
        json!({
            "reference": "Failure mode anticipation",
            "supporting_material": [{"quote": quote, "justification": "j", "defense": "d"}]
        })
        .to_string()
    }

    // Skipped items vanish without a placeholder. Consumers expecting explicit
    // skip markers will see a shorter list instead.
    #[tokio::test]
    async fn test_unparsable_item_is_silently_skipped() {
        let fake = Arc::new(
            ScriptedCompletion::new()
                .reply(detection("first"))
                .reply("I could not find anything, sorry.")
                .reply(detection("third")),
        );

        let response = pipeline(&fake)
            .detect_batch_reference(&request(vec![
                item(1, "one", "a"),
                item(2, "two", "b"),
                item(3, "three", "c"),
            ]))
            .await
            .unwrap();

        assert_eq!(response.results.len(), 2);
        assert_eq!(response.results[0].conversation_id, json!(1));
        assert_eq!(response.results[1].conversation_id, json!(3));
        assert_eq!(
            response.results[1].supporting_material[0]["quote"],
            json!("third")
        );
        assert_eq!(fake.requests().len(), 3);
    }

    #[tokio::test]
    async fn test_failed_call_is_skipped_and_batch_continues() {
        let fake = Arc::new(
            ScriptedCompletion::new()
                .fail(LlmError::Api {
                    status: 429,
                    message: "slow down".to_string(),
                })
                .reply(detection("second")),
        );

        let response = pipeline(&fake)
            .detect_batch_reference(&request(vec![item(1, "one", "a"), item(2, "two", "b")]))
            .await
            .unwrap();

        assert_eq!(response.results.len(), 1);
        assert_eq!(response.results[0].conversation_title, json!("two"));
    }

    #[tokio::test]
    async fn test_items_are_called_in_input_order_with_pattern() {
        let fake = Arc::new(
            ScriptedCompletion::new()
                .reply(detection("x"))
                .reply(detection("y")),
        );

        pipeline(&fake)
            .detect_batch_reference(&request(vec![
                item(10, "first", "alpha"),
                item(20, "second", "beta"),
            ]))
            .await
            .unwrap();

        let calls = fake.requests();
        assert_eq!(calls.len(), 2);
        for (_, sent) in &calls {
            assert_eq!(sent.messages[0].role, Role::System);
            assert_eq!(sent.messages[0].content, prompts::BATCH_REFERENCE_LOCATOR);
            assert_eq!(
                sent.messages[1].content,
                "Cognitive pattern: Failure mode anticipation"
            );
        }
        assert!(calls[0].1.messages[2].content.contains("alpha"));
        assert!(calls[1].1.messages[2].content.contains("beta"));
        assert!(calls[0].1.messages[2]
            .content
            .starts_with("Run detection on the following conversation: "));
    }

    #[tokio::test]
    async fn test_missing_fields_in_detection_get_defaults() {
        let fake = Arc::new(ScriptedCompletion::new().reply("{}"));

        let response = pipeline(&fake)
            .detect_batch_reference(&request(vec![item(1, "one", "a")]))
            .await
            .unwrap();

        assert_eq!(
            response.results,
            vec![BatchReferenceResult {
                conversation_id: json!(1),
                conversation_title: json!("one"),
                reference: Value::Null,
                supporting_material: json!([]),
            }]
        );
    }

    #[tokio::test]
    async fn test_empty_batch_makes_no_calls() {
        let fake = Arc::new(ScriptedCompletion::new());
        let response = pipeline(&fake)
            .detect_batch_reference(&request(vec![]))
            .await
            .unwrap();

        assert!(response.results.is_empty());
        assert!(fake.requests().is_empty());
    }

    #[tokio::test]
    async fn test_missing_key_fails_whole_request() {
        let fake = Arc::new(ScriptedCompletion::new());
        let err = pipeline(&fake)
            .detect_batch_reference(&BatchReferenceRequest {
                conversations: json!([item(1, "one", "a")]),
                ..BatchReferenceRequest::default()
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::MissingApiKey));
    }

    #[tokio::test]
    async fn test_null_pattern_reaches_every_item() {
        let fake = Arc::new(
            ScriptedCompletion::new()
                .reply(detection("x"))
                .reply(detection("y")),
        );

        let response = pipeline(&fake)
            .detect_batch_reference(&BatchReferenceRequest {
                pattern: Value::Null,
                ..request(vec![item(1, "one", "a"), item(2, "two", "b")])
            })
            .await
            .unwrap();

        assert_eq!(response.results.len(), 2);
        for (_, sent) in fake.requests() {
            assert_eq!(sent.messages[1].content, "Cognitive pattern: ");
        }
    }

    #[tokio::test]
    async fn test_non_string_pattern_is_rendered_as_json() {
        let fake = Arc::new(ScriptedCompletion::new().reply(detection("x")));

        pipeline(&fake)
            .detect_batch_reference(&BatchReferenceRequest {
                pattern: json!(42),
                ..request(vec![item(1, "one", "a")])
            })
            .await
            .unwrap();

        assert_eq!(fake.requests()[0].1.messages[1].content, "Cognitive pattern: 42");
    }
}
