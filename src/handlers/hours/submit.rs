use axum::{extract::State, response::Json, Extension};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::handlers::require_identity;
use crate::middleware::identity::AuthUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SubmitHoursRequest {
    pub course_id: String,
    /// Worked time in minutes.
    pub worked_time: i32,
    pub date: NaiveDate,
    pub description: String,
}

/// POST /hours/submit - Declare worked time against the caller's contract
///
/// Requires an existing contract for (caller, course). The declaration is
/// created unapproved and unreviewed.
pub async fn submit_post(
    State(state): State<AppState>,
    user: Option<Extension<AuthUser>>,
    Json(payload): Json<SubmitHoursRequest>,
) -> Result<Json<Value>, ApiError> {
    let user = require_identity(user)?;

    let declaration = state
        .contracts
        .submit_hours(
            &user,
            &payload.course_id,
            payload.worked_time,
            payload.date,
            &payload.description,
        )
        .await?;

    Ok(Json(json!({ "success": true, "data": declaration })))
}
