use axum::{extract::State, response::Json, Extension};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::handlers::require_identity;
use crate::middleware::identity::AuthUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ApplyRequest {
    pub course_id: String,
    pub grade: f64,
    pub motivation: String,
    pub contact_email: String,
}

/// POST /applications/apply - Submit a TA application for a course
///
/// The applicant is the authenticated caller. Fails with 403 when the
/// pending quota is hit or the grade is out of range, 404 when the course
/// directory cannot resolve the course, 409 on a duplicate application.
pub async fn apply_post(
    State(state): State<AppState>,
    user: Option<Extension<AuthUser>>,
    Json(payload): Json<ApplyRequest>,
) -> Result<Json<Value>, ApiError> {
    let user = require_identity(user)?;

    let application = state
        .applications
        .apply(
            &user,
            &payload.course_id,
            payload.grade,
            &payload.motivation,
            &payload.contact_email,
        )
        .await?;

    Ok(Json(json!({ "success": true, "data": application })))
}
