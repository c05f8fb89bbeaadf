use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::user::UserRow;

/// Profile fields accepted at registration.
pub struct NewUser<'a> {
    pub email: &'a str,
    pub full_name: &'a str,
    pub age_range: Option<&'a str>,
    pub current_job_role: Option<&'a str>,
    pub industry: Option<&'a str>,
    pub educational_background: Option<&'a str>,
    pub years_of_experience: Option<i32>,
}

/// Inserts a user. An email that already exists is a `Conflict`, whether caught by the
/// lookup or by the unique index when two registrations race.
pub async fn create_user(pool: &PgPool, user: NewUser<'_>) -> Result<UserRow, AppError> {
    if find_by_email(pool, user.email).await?.is_some() {
        return Err(duplicate(user.email));
    }

    let result = sqlx::query_as::<_, UserRow>(
        r#"
        INSERT INTO users
            (id, email, full_name, age_range, current_job_role, industry,
             educational_background, years_of_experience)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user.email)
    .bind(user.full_name)
    .bind(user.age_range)
    .bind(user.current_job_role)
    .bind(user.industry)
    .bind(user.educational_background)
    .bind(user.years_of_experience)
    .fetch_one(pool)
    .await;

    match result {
        Ok(row) => {
            info!("Registered user {}", row.id);
            Ok(row)
        }
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Err(duplicate(user.email)),
        Err(e) => Err(AppError::Database(e)),
    }
}

pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<UserRow>, AppError> {
    Ok(
        sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(pool)
            .await?,
    )
}

/// Loads a user or fails with `NotFound`.
pub async fn require_user(pool: &PgPool, user_id: Uuid) -> Result<UserRow, AppError> {
    sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {user_id} not found")))
}

fn duplicate(email: &str) -> AppError {
    AppError::Conflict(format!("User with email {email} already exists"))
}
