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

/// GET /contracts/:course_id - The caller's own contract for a course
pub async fn contract_get(
    State(state): State<AppState>,
    Path(course_id): Path<String>,
    user: Option<Extension<AuthUser>>,
) -> Result<Json<Value>, ApiError> {
    let user = require_identity(user)?;

    let contract = state.contracts.get_contract(&user.net_id, &course_id).await?;

    Ok(Json(json!({ "success": true, "data": contract })))
}
