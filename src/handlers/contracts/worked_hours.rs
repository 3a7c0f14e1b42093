use axum::{
    extract::{Path, State},
    response::Json,
    Extension,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::handlers::require_identity;
use crate::middleware::identity::AuthUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct WorkedHoursRequest {
    pub hours: i32,
}

/// PUT /contracts/:course_id/:net_id/worked-hours - Record the hours a TA
/// actually worked. Lecturer-only; negative values are rejected with 400.
pub async fn worked_hours_put(
    State(state): State<AppState>,
    Path((course_id, net_id)): Path<(String, String)>,
    user: Option<Extension<AuthUser>>,
    Json(payload): Json<WorkedHoursRequest>,
) -> Result<Json<Value>, ApiError> {
    let user = require_identity(user)?;

    state
        .contracts
        .set_actual_worked_hours(&user, &course_id, &net_id, payload.hours)
        .await?;

    Ok(Json(json!({ "success": true })))
}
