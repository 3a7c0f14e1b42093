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

/// GET /hours/:course_id/pending - Unreviewed declarations for a course
///
/// Lecturer-only. Reviewed declarations never reappear here.
pub async fn pending_get(
    State(state): State<AppState>,
    Path(course_id): Path<String>,
    user: Option<Extension<AuthUser>>,
) -> Result<Json<Value>, ApiError> {
    let user = require_identity(user)?;

    let pending = state.contracts.list_pending_hours(&user, &course_id).await?;

    Ok(Json(json!({ "success": true, "data": pending })))
}
