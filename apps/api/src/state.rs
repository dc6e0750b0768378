use crate::pipeline::Pipeline;

/// Shared application state injected into all route handlers via Axum extractors.
/// Immutable after startup; handlers never coordinate through it.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Pipeline,
}
