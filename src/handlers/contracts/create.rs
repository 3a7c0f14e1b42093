use axum::{extract::State, response::Json, Extension};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::handlers::require_identity;
use crate::middleware::identity::AuthUser;
use crate::remote::NewContract;
use crate::state::AppState;

/// POST /contracts - Create a contract record
///
/// This is the surface a sibling instance's accept flow reaches through
/// its Contract Directory client; the bearer token arrives forwarded from
/// the original lecturer request.
pub async fn contract_post(
    State(state): State<AppState>,
    user: Option<Extension<AuthUser>>,
    Json(payload): Json<NewContract>,
) -> Result<Json<Value>, ApiError> {
    require_identity(user)?;

    let contract = state.contracts.create_contract(&payload).await?;

    Ok(Json(json!({ "success": true, "data": contract })))
}
