pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::assessment::handlers as assessments;
use crate::chat::handlers as chat;
use crate::recommendation::handlers as recommendations;
use crate::skills::handlers as skills;
use crate::state::AppState;
use crate::users::handlers as users;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Users
        .route("/api/v1/users", post(users::handle_register))
        .route("/api/v1/users/:id", get(users::handle_get_user))
        // Assessments
        .route(
            "/api/v1/assessments",
            post(assessments::handle_submit_assessment).get(assessments::handle_list_assessments),
        )
        .route(
            "/api/v1/assessments/questions",
            post(assessments::handle_generate_questions),
        )
        .route(
            "/api/v1/assessments/:id",
            get(assessments::handle_get_assessment),
        )
        // Skills
        .route("/api/v1/skills/evaluate", post(skills::handle_evaluate_skills))
        .route("/api/v1/skills/role-gaps", post(skills::handle_role_gaps))
        // Recommendations
        .route(
            "/api/v1/recommendations",
            get(recommendations::handle_list_recommendations),
        )
        .route(
            "/api/v1/recommendations/generate",
            post(recommendations::handle_generate_recommendations),
        )
        // Chat
        .route("/api/v1/chat/stream", post(chat::handle_chat_stream))
        .with_state(state)
}
