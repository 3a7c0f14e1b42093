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

/// DELETE /applications/withdraw/:course_id - Withdraw the caller's own
/// pending application. Decided applications cannot be withdrawn (403).
pub async fn withdraw_delete(
    State(state): State<AppState>,
    Path(course_id): Path<String>,
    user: Option<Extension<AuthUser>>,
) -> Result<Json<Value>, ApiError> {
    let user = require_identity(user)?;

    state.applications.withdraw(&user, &course_id).await?;

    Ok(Json(json!({ "success": true })))
}
