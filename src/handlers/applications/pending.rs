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

/// GET /applications/:course_id/pending - The lecturer's review queue
///
/// Pending applications for the course, augmented with each applicant's
/// historical TA rating (-1 when none is on record) and ordered by the
/// ranking function: experienced TAs first, then unrated applicants, then
/// insufficiently rated ones.
pub async fn pending_get(
    State(state): State<AppState>,
    Path(course_id): Path<String>,
    user: Option<Extension<AuthUser>>,
) -> Result<Json<Value>, ApiError> {
    let user = require_identity(user)?;

    let queue = state.applications.list_pending(&user, &course_id).await?;

    Ok(Json(json!({ "success": true, "data": queue })))
}
