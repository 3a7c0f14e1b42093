use axum::{
    extract::{Path, State},
    response::Json,
    Extension,
};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::handlers::require_identity;
use crate::middleware::identity::AuthUser;
use crate::state::AppState;

/// POST /applications/reject/:course_id/:net_id - Reject a pending
/// application. Caller must be a responsible lecturer for the course.
pub async fn reject_post(
    State(state): State<AppState>,
    Path((course_id, net_id)): Path<(String, String)>,
    user: Option<Extension<AuthUser>>,
) -> Result<Json<Value>, ApiError> {
    let user = require_identity(user)?;

    state.applications.reject(&user, &course_id, &net_id).await?;

    Ok(Json(json!({ "success": true })))
}
