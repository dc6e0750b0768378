//! Advisory check of a stage reply's top-level fields against the schema its
//! prompt asks for. Used for logging only; replies are never rejected here.

use serde_json::Value;

use crate::catalog::Stage;

const EXTRACT_FIELDS: &[&str] = &[
    "claims",
    "technologies_mentioned",
    "actions_described",
    "reasoning_steps_explicit",
    "constraints_explicit",
    "metrics_mentioned",
    "metaphorical_content",
    "non_cooperative_signals",
    "cognition_styles_shown",
];

const ARTIFACT_FIELDS: &[&str] = &[
    "title",
    "domain",
    "problem_statement",
    "context",
    "constraints",
    "decision_points",
    "technical_depth",
    "risks_and_mitigations",
    "outcome",
    "cognitive_signals",
    "cognition_patterns",
    "concise_summary",
];

const EVALUATE_FIELDS: &[&str] = &[
    "scores",
    "overall_assessment",
    "key_strengths",
    "development_gaps",
    "recommendations_for_stronger_artifact",
];

const REFERENCE_FIELDS: &[&str] = &["reference", "supporting_material"];

pub fn expected_fields(stage: Stage) -> &'static [&'static str] {
    match stage {
        Stage::Question | Stage::Followup => &[],
        Stage::Extract => EXTRACT_FIELDS,
        Stage::Assess => &["signal_assessment"],
        Stage::Artifact => ARTIFACT_FIELDS,
        Stage::Evaluate => EVALUATE_FIELDS,
        Stage::BatchEvaluate => &["candidate_profile"],
        Stage::DetectReference | Stage::DetectBatchReference => REFERENCE_FIELDS,
        Stage::DeepDiveReference => &["point", "deep_dive_analysis", "supporting_quotes"],
    }
}

/// Fields the stage's schema promises that `value` doesn't have.
/// A non-object reply is missing all of them.
pub fn missing_fields(stage: Stage, value: &Value) -> Vec<&'static str> {
    let object = value.as_object();
    expected_fields(stage)
        .iter()
        .copied()
        .filter(|field| !object.is_some_and(|o| o.contains_key(*field)))
        .collect()
}
