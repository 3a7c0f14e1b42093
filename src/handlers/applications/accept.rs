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
pub struct AcceptRequest {
    pub duties: String,
    pub max_hours: i32,
}

/// POST /applications/accept/:course_id/:net_id - Accept a pending
/// application and form the contract
///
/// Caller must be a responsible lecturer for the course. When the contract
/// directory refuses the contract the application stays PENDING and the
/// request fails with 409.
pub async fn accept_post(
    State(state): State<AppState>,
    Path((course_id, net_id)): Path<(String, String)>,
    user: Option<Extension<AuthUser>>,
    Json(payload): Json<AcceptRequest>,
) -> Result<Json<Value>, ApiError> {
    let user = require_identity(user)?;

    state
        .applications
        .accept(&user, &course_id, &net_id, &payload.duties, payload.max_hours)
        .await?;

    Ok(Json(json!({ "success": true })))
}
