use axum::{
    extract::{Query, State},
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
pub struct RatingsQuery {
    /// Comma-separated NetIDs.
    pub net_ids: String,
}

/// GET /ratings?net_ids=a,b,c - Historical TA ratings
///
/// Mean rating per NetID over signed, rated contracts. NetIDs with no
/// qualifying contract are absent from the result. Consumed by sibling
/// instances' Contract Directory clients when ranking applicants.
pub async fn ratings_get(
    State(state): State<AppState>,
    Query(query): Query<RatingsQuery>,
    user: Option<Extension<AuthUser>>,
) -> Result<Json<Value>, ApiError> {
    require_identity(user)?;

    let net_ids: Vec<String> = query
        .net_ids
        .split(',')
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
        .collect();

    let ratings = state.contracts.average_rating(&net_ids).await?;

    Ok(Json(json!({ "success": true, "data": ratings })))
}
