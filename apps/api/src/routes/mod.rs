pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::pipeline::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Interview
        .route("/new-question", post(handlers::handle_new_question))
        .route(
            "/followup-question",
            post(handlers::handle_followup_question),
        )
        // Signal → artifact pipeline
        .route("/extract-signals", post(handlers::handle_extract_signals))
        .route("/assess-signals", post(handlers::handle_assess_signals))
        .route(
            "/generate-artifact",
            post(handlers::handle_generate_artifact),
        )
        .route(
            "/evaluate-artifact",
            post(handlers::handle_evaluate_artifact),
        )
        .route("/evaluate-batch", post(handlers::handle_evaluate_batch))
        .route("/run-pipeline", post(handlers::handle_run_pipeline))
        // Reference location
        .route("/detect-reference", post(handlers::handle_detect_reference))
        .route(
            "/detect-batch-reference",
            post(handlers::handle_detect_batch_reference),
        )
        .route(
            "/deep-dive-reference",
            post(handlers::handle_deep_dive_reference),
        )
        .with_state(state)
}
