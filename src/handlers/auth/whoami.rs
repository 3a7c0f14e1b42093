use axum::{response::Json, Extension};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::handlers::require_identity;
use crate::middleware::identity::AuthUser;

/// GET /api/auth/whoami - Echo the verified caller identity
pub async fn whoami_get(user: Option<Extension<AuthUser>>) -> Result<Json<Value>, ApiError> {
    let user = require_identity(user)?;

    Ok(Json(json!({
        "success": true,
        "data": {
            "net_id": user.net_id
        }
    })))
}
