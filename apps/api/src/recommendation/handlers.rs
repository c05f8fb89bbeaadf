use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use super::aggregator::generate_for_user;
use super::store::list_recommendations;
use crate::errors::AppError;
use crate::models::recommendation::CareerRecommendationRow;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

#[derive(Deserialize)]
pub struct GenerateRecommendationRequest {
    pub user_id: Uuid,
}

/// POST /api/v1/recommendations/generate
pub async fn handle_generate_recommendations(
    State(state): State<AppState>,
    Json(req): Json<GenerateRecommendationRequest>,
) -> Result<(StatusCode, Json<CareerRecommendationRow>), AppError> {
    let row = generate_for_user(&state.db, state.llm.as_ref(), req.user_id).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// GET /api/v1/recommendations
pub async fn handle_list_recommendations(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<CareerRecommendationRow>>, AppError> {
    Ok(Json(list_recommendations(&state.db, params.user_id).await?))
}
