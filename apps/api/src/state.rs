use std::sync::Arc;

use sqlx::PgPool;

use crate::assessment::aptitude::AptitudeGrader;
use crate::config::Config;
use crate::llm_client::TextGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Text generation gateway. Unconfigured when no API key is set, in which case every
    /// AI path serves its fallback.
    pub llm: Arc<dyn TextGenerator>,
    /// Pluggable aptitude grader. Default: AnswerKeyGrader. Swap via ENABLE_LLM_APTITUDE_GRADING.
    pub aptitude_grader: Arc<dyn AptitudeGrader>,
    pub config: Config,
}
