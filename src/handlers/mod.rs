pub mod applications;
pub mod auth;
pub mod contracts;
pub mod hours;

use axum::Extension;

use crate::error::ApiError;
use crate::middleware::identity::AuthUser;

/// The gateway fails open to anonymous; endpoints that need a caller
/// identity reject anonymous requests here.
pub(crate) fn require_identity(user: Option<Extension<AuthUser>>) -> Result<AuthUser, ApiError> {
    user.map(|Extension(user)| user)
        .ok_or_else(|| ApiError::unauthorized("Authentication required"))
}
