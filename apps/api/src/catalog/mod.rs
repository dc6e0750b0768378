//! Prompt Catalog — the immutable stage table.
//!
//! Every pipeline stage maps to one fixed `StageSpec`: the instruction text that
//! leads its message list, the model it runs on, and whether a JSON object reply
//! is requested. Nothing here is configurable at runtime.

pub mod prompts;

use crate::llm_client::{MessageListBuilder, Role};

/// One step of the interview-to-artifact pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Question,
    Followup,
    Extract,
    Assess,
    Artifact,
    Evaluate,
    BatchEvaluate,
    DetectReference,
    DetectBatchReference,
    DeepDiveReference,
}

impl Stage {
    #[cfg(test)]
    pub const ALL: [Stage; 10] = [
        Stage::Question,
        Stage::Followup,
        Stage::Extract,
        Stage::Assess,
        Stage::Artifact,
        Stage::Evaluate,
        Stage::BatchEvaluate,
        Stage::DetectReference,
        Stage::DetectBatchReference,
        Stage::DeepDiveReference,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Stage::Question => "question",
            Stage::Followup => "followup",
            Stage::Extract => "extract",
            Stage::Assess => "assess",
            Stage::Artifact => "artifact",
            Stage::Evaluate => "evaluate",
            Stage::BatchEvaluate => "batch-evaluate",
            Stage::DetectReference => "detect-reference",
            Stage::DetectBatchReference => "detect-batch-reference",
            Stage::DeepDiveReference => "deep-dive-reference",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Fixed configuration for one stage.
#[derive(Debug)]
pub struct StageSpec {
    pub instruction: &'static str,
    /// Role of the leading instruction message. Only the opening question sends it as `user`.
    pub instruction_role: Role,
    pub model: &'static str,
    pub json_output: bool,
    pub temperature: Option<f32>,
    /// `error` field of the 500 body when the reply can't be decoded.
    /// `None` for the plain-text stages, whose replies are never decoded.
    pub parse_failure: Option<&'static str>,
}

impl StageSpec {
    /// Starts this stage's message list with its instruction in place.
    pub fn messages(&self) -> MessageListBuilder {
        MessageListBuilder::new(self.instruction_role, self.instruction)
    }
}

/// A stage that leads with a system instruction and expects a JSON object back.
const fn json_stage(
    instruction: &'static str,
    model: &'static str,
    parse_failure: &'static str,
) -> StageSpec {
    StageSpec {
        instruction,
        instruction_role: Role::System,
        model,
        json_output: true,
        temperature: None,
        parse_failure: Some(parse_failure),
    }
}

static QUESTION: StageSpec = StageSpec {
    instruction: prompts::INTERVIEWER,
    instruction_role: Role::User,
    model: "gpt-4o",
    json_output: false,
    temperature: Some(1.0),
    parse_failure: None,
};

static FOLLOWUP: StageSpec = StageSpec {
    instruction: prompts::FOLLOW_UP,
    instruction_role: Role::System,
    model: "gpt-3.5-turbo",
    json_output: false,
    temperature: None,
    parse_failure: None,
};

static EXTRACT: StageSpec = json_stage(
    prompts::SIGNAL_EXTRACTOR,
    "gpt-4o-mini",
    "Failed to parse signals",
);

static ASSESS: StageSpec = json_stage(
    prompts::SIGNAL_ASSESSOR,
    "gpt-4o-mini",
    "Failed to parse assessment",
);

static ARTIFACT: StageSpec = json_stage(
    prompts::ARTIFACT_GENERATOR,
    "gpt-4o",
    "Failed to parse artifact",
);

static EVALUATE: StageSpec = json_stage(
    prompts::ARTIFACT_EVALUATOR,
    "gpt-4o-mini",
    "Failed to parse evaluation",
);

static BATCH_EVALUATE: StageSpec = json_stage(
    prompts::BATCH_EVALUATOR,
    "gpt-4o",
    "Failed to parse batch evaluation",
);

static DETECT_REFERENCE: StageSpec = json_stage(
    prompts::REFERENCE_LOCATOR,
    "gpt-4o-mini",
    "Failed to parse reference detection",
);

static DETECT_BATCH_REFERENCE: StageSpec = json_stage(
    prompts::BATCH_REFERENCE_LOCATOR,
    "gpt-4o-mini",
    "Failed to parse batch reference detection",
);

static DEEP_DIVE_REFERENCE: StageSpec = json_stage(
    prompts::DEEP_DIVE_ANALYST,
    "gpt-4o-mini",
    "Failed to parse deep dive analysis",
);

/// Returns the fixed spec for `stage`.
pub fn lookup(stage: Stage) -> &'static StageSpec {
    match stage {
        Stage::Question => &QUESTION,
        Stage::Followup => &FOLLOWUP,
        Stage::Extract => &EXTRACT,
        Stage::Assess => &ASSESS,
        Stage::Artifact => &ARTIFACT,
        Stage::Evaluate => &EVALUATE,
        Stage::BatchEvaluate => &BATCH_EVALUATE,
        Stage::DetectReference => &DETECT_REFERENCE,
        Stage::DetectBatchReference => &DETECT_BATCH_REFERENCE,
        Stage::DeepDiveReference => &DEEP_DIVE_REFERENCE,
    }
}
