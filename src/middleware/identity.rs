use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};

use crate::state::AppState;

/// The verified caller identity for one request. `authorization` keeps the
/// inbound header value so outbound directory calls can forward it
/// verbatim.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub net_id: String,
    pub authorization: String,
}

/// Identity gateway. Reads the bearer token once per request and, when it
/// verifies, binds the caller identity into the request extensions.
///
/// A missing, malformed, expired or mis-signed token never aborts the
/// request: the caller just stays anonymous and endpoint-level
/// authorization rejects them where identity matters. This fail-open
/// policy is preserved from the observed system behavior; see DESIGN.md
/// before relying on it.
pub async fn identity_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let header_value = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_string());

    if let Some(header_value) = header_value {
        if let Some(token) = header_value.strip_prefix("Bearer ") {
            match state.token_service.verify(token.trim()) {
                Ok(net_id) => {
                    request.extensions_mut().insert(AuthUser {
                        net_id,
                        authorization: header_value.clone(),
                    });
                }
                Err(err) => {
                    tracing::warn!("bearer token rejected, continuing as anonymous: {err}");
                }
            }
        }
    }

    next.run(request).await
}
