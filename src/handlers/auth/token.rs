use axum::{extract::State, response::Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::{TokenError, TOKEN_LIFETIME_HOURS};
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub net_id: String,
}

/// POST /auth/token - Issue a signed identity token for a NetID
///
/// The credential check of the original authentication sibling is out of
/// scope here; this endpoint mints the token so the staffing workflow is
/// self-contained. See DESIGN.md before exposing it beyond a trusted
/// network.
pub async fn token_post(
    State(state): State<AppState>,
    Json(payload): Json<TokenRequest>,
) -> Result<Json<Value>, ApiError> {
    if payload.net_id.trim().is_empty() {
        return Err(ApiError::bad_request("net_id must not be empty"));
    }

    let token = state
        .token_service
        .issue(payload.net_id.trim())
        .map_err(|err| match err {
            TokenError::MissingSecret => {
                ApiError::service_unavailable("Token signing is not configured")
            }
            other => ApiError::internal_server_error(other.to_string()),
        })?;

    Ok(Json(json!({
        "success": true,
        "data": {
            "token": token,
            "expires_in": TOKEN_LIFETIME_HOURS * 3600
        }
    })))
}
