use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::user::UserRow;
use crate::state::AppState;
use crate::users::store::{create_user, require_user, NewUser};

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub full_name: String,
    pub age_range: Option<String>,
    pub current_job_role: Option<String>,
    pub industry: Option<String>,
    pub educational_background: Option<String>,
    pub years_of_experience: Option<i32>,
}

impl RegisterRequest {
    fn normalized_email(&self) -> String {
        self.email.trim().to_lowercase()
    }

    fn validate(&self) -> Result<(), AppError> {
        let email = self.normalized_email();
        let well_formed = email
            .split_once('@')
            .map(|(local, domain)| !local.is_empty() && !domain.is_empty())
            .unwrap_or(false);
        if !well_formed {
            return Err(AppError::Validation(format!("'{}' is not a valid email", self.email)));
        }
        if self.full_name.trim().is_empty() {
            return Err(AppError::Validation("full_name cannot be empty".to_string()));
        }
        if self.years_of_experience.is_some_and(|y| y < 0) {
            return Err(AppError::Validation(
                "years_of_experience cannot be negative".to_string(),
            ));
        }
        Ok(())
    }
}

/// POST /api/v1/users
pub async fn handle_register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserRow>), AppError> {
    req.validate()?;

    let email = req.normalized_email();
    let user = create_user(
        &state.db,
        NewUser {
            email: &email,
            full_name: req.full_name.trim(),
            age_range: req.age_range.as_deref(),
            current_job_role: req.current_job_role.as_deref(),
            industry: req.industry.as_deref(),
            educational_background: req.educational_background.as_deref(),
            years_of_experience: req.years_of_experience,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// GET /api/v1/users/:id
pub async fn handle_get_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<UserRow>, AppError> {
    Ok(Json(require_user(&state.db, user_id).await?))
}
