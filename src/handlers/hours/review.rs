use axum::{
    extract::{Path, State},
    response::Json,
    Extension,
};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::error::ApiError;
use crate::handlers::require_identity;
use crate::middleware::identity::AuthUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ReviewRequest {
    pub approve: bool,
}

/// PUT /hours/:id/review - Approve or deny an hour declaration
///
/// Caller must be a responsible lecturer for the declaration's course.
/// Review is terminal: a second review fails with 409.
pub async fn review_put(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    user: Option<Extension<AuthUser>>,
    Json(payload): Json<ReviewRequest>,
) -> Result<Json<Value>, ApiError> {
    let user = require_identity(user)?;

    state.contracts.review_hours(&user, id, payload.approve).await?;

    Ok(Json(json!({ "success": true })))
}
