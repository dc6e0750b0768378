//! Request and response bodies for the pipeline routes.
//!
//! Caller data is kept as untyped JSON: transcripts, stage outputs and batch items
//! are forwarded exactly as received, and a field of an unexpected type (or an
//! explicit `null`) never fails decoding. Missing fields fall back to an empty value.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// An interview transcript: a JSON list of turns, never inspected or rewritten.
pub type Conversation = Value;

fn empty_object() -> Value {
    Value::Object(Map::new())
}

fn empty_array() -> Value {
    Value::Array(Vec::new())
}

/// Only a JSON string counts as a credential; anything else is treated as absent.
fn lenient_key<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(key) => Some(key),
        _ => None,
    })
}

/// Renders a scalar caller field for inline use in a message: strings as-is,
/// `null` as empty, anything else as compact JSON.
pub fn inline_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct NewQuestionRequest {
    #[serde(default, deserialize_with = "lenient_key")]
    pub api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct FollowupRequest {
    #[serde(default, deserialize_with = "lenient_key")]
    pub api_key: Option<String>,
    #[serde(default = "empty_array")]
    pub conversation: Conversation,
    /// Latest artifact evaluation; only `overall_assessment` and `recommendations` are read.
    #[serde(default = "empty_object")]
    pub evaluation: Value,
}

#[derive(Debug, Serialize)]
pub struct QuestionResponse {
    pub question: String,
}

#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    #[serde(default, deserialize_with = "lenient_key")]
    pub api_key: Option<String>,
    #[serde(default = "empty_array")]
    pub conversation: Conversation,
}

impl Default for ExtractRequest {
    fn default() -> Self {
        Self {
            api_key: None,
            conversation: empty_array(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AssessRequest {
    #[serde(default, deserialize_with = "lenient_key")]
    pub api_key: Option<String>,
    #[serde(default = "empty_array")]
    pub conversation: Conversation,
    #[serde(default = "empty_object")]
    pub signals: Value,
}

#[derive(Debug, Deserialize)]
pub struct ArtifactRequest {
    #[serde(default, deserialize_with = "lenient_key")]
    pub api_key: Option<String>,
    #[serde(default = "empty_array")]
    pub conversation: Conversation,
    #[serde(rename = "extractedSignals", default = "empty_object")]
    pub extracted_signals: Value,
    #[serde(rename = "signalAssessment", default = "empty_object")]
    pub signal_assessment: Value,
}

#[derive(Debug, Deserialize)]
pub struct EvaluateRequest {
    #[serde(default, deserialize_with = "lenient_key")]
    pub api_key: Option<String>,
    #[serde(rename = "extractedSignals", default = "empty_object")]
    pub extracted_signals: Value,
    #[serde(rename = "signalAssessment", default = "empty_object")]
    pub signal_assessment: Value,
    #[serde(default = "empty_object")]
    pub artifact: Value,
}

#[derive(Debug, Default, Deserialize)]
pub struct BatchEvaluateRequest {
    #[serde(default, deserialize_with = "lenient_key")]
    pub api_key: Option<String>,
    /// Anything other than a list counts as no artifacts.
    #[serde(default)]
    pub artifacts: Value,
}

impl BatchEvaluateRequest {
    pub fn artifacts(&self) -> &[Value] {
        self.artifacts.as_array().map_or(&[][..], Vec::as_slice)
    }
}

#[derive(Debug, Deserialize)]
pub struct DetectReferenceRequest {
    #[serde(default, deserialize_with = "lenient_key")]
    pub api_key: Option<String>,
    /// The evaluation sentence to locate quotes for.
    #[serde(default)]
    pub strength: Value,
    #[serde(default = "empty_array")]
    pub conversation: Conversation,
}

impl Default for DetectReferenceRequest {
    fn default() -> Self {
        Self {
            api_key: None,
            strength: Value::Null,
            conversation: empty_array(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct DeepDiveRequest {
    #[serde(default, deserialize_with = "lenient_key")]
    pub api_key: Option<String>,
    #[serde(default)]
    pub point: Value,
    #[serde(default = "empty_array")]
    pub conversation: Conversation,
}

/// One conversation of a batch reference search.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchConversation {
    pub id: Value,
    pub title: Value,
    pub conversation: Conversation,
}

impl BatchConversation {
    /// Reads one batch item. Missing fields (or a non-object item) become null ids
    /// and an empty transcript.
    pub fn from_item(item: &Value) -> Self {
        let field = |name: &str| item.get(name).cloned();
        Self {
            id: field("id").unwrap_or(Value::Null),
            title: field("title").unwrap_or(Value::Null),
            conversation: field("conversation").unwrap_or_else(empty_array),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct BatchReferenceRequest {
    #[serde(default, deserialize_with = "lenient_key")]
    pub api_key: Option<String>,
    /// Cognitive pattern being searched for.
    #[serde(default)]
    pub pattern: Value,
    #[serde(default)]
    pub conversations: Value,
}

impl BatchReferenceRequest {
    /// Batch items in input order. Anything other than a list counts as empty.
    pub fn conversations(&self) -> Vec<BatchConversation> {
        self.conversations
            .as_array()
            .map(|items| items.iter().map(BatchConversation::from_item).collect())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchReferenceResult {
    pub conversation_id: Value,
    pub conversation_title: Value,
    pub reference: Value,
    pub supporting_material: Value,
}

#[derive(Debug, Serialize)]
pub struct BatchReferenceResponse {
    pub results: Vec<BatchReferenceResult>,
}

#[derive(Debug, Deserialize)]
pub struct RunPipelineRequest {
    #[serde(default, deserialize_with = "lenient_key")]
    pub api_key: Option<String>,
    #[serde(default = "empty_array")]
    pub conversation: Conversation,
}

impl Default for RunPipelineRequest {
    fn default() -> Self {
        Self {
            api_key: None,
            conversation: empty_array(),
        }
    }
}

/// Every stage output of one full extract → assess → artifact → evaluate run.
#[derive(Debug, Serialize)]
pub struct PipelineRunResponse {
    #[serde(rename = "extractedSignals")]
    pub extracted_signals: Value,
    #[serde(rename = "signalAssessment")]
    pub signal_assessment: Value,
    #[serde(rename = "cognitionArtifact")]
    pub cognition_artifact: Value,
    pub evaluation: Value,
}
