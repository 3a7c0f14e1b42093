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
pub struct RatingRequest {
    pub rating: f64,
}

/// PUT /contracts/:course_id/:net_id/rating - Rate a TA's performance
///
/// Lecturer-only; ratings outside [0, 10] are rejected with 400.
pub async fn rating_put(
    State(state): State<AppState>,
    Path((course_id, net_id)): Path<(String, String)>,
    user: Option<Extension<AuthUser>>,
    Json(payload): Json<RatingRequest>,
) -> Result<Json<Value>, ApiError> {
    let user = require_identity(user)?;

    state
        .contracts
        .set_rating(&user, &course_id, &net_id, payload.rating)
        .await?;

    Ok(Json(json!({ "success": true })))
}
