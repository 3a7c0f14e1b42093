use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{applications, auth, contracts, hours};
use crate::middleware::identity::identity_middleware;
use crate::state::AppState;

/// Assemble the full router. The identity gateway runs on every route;
/// endpoint handlers decide whether anonymous callers get through.
pub fn app(state: AppState) -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .merge(auth_routes())
        .merge(application_routes())
        .merge(contract_routes())
        .merge(hour_routes())
        // Global middleware
        .layer(middleware::from_fn_with_state(
            state.clone(),
            identity_middleware,
        ))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/token", post(auth::token_post))
        .route("/api/auth/whoami", get(auth::whoami_get))
}

fn application_routes() -> Router<AppState> {
    Router::new()
        .route("/applications/apply", post(applications::apply_post))
        .route(
            "/applications/status/:course_id",
            get(applications::status_get),
        )
        .route(
            "/applications/withdraw/:course_id",
            delete(applications::withdraw_delete),
        )
        .route(
            "/applications/reject/:course_id/:net_id",
            post(applications::reject_post),
        )
        .route(
            "/applications/accept/:course_id/:net_id",
            post(applications::accept_post),
        )
        .route(
            "/applications/:course_id/pending",
            get(applications::pending_get),
        )
}

fn contract_routes() -> Router<AppState> {
    Router::new()
        .route("/contracts", post(contracts::contract_post))
        .route("/contracts/:course_id", get(contracts::contract_get))
        .route(
            "/contracts/:course_id/:net_id/rating",
            put(contracts::rating_put),
        )
        .route(
            "/contracts/:course_id/:net_id/worked-hours",
            put(contracts::worked_hours_put),
        )
        .route("/ratings", get(contracts::ratings_get))
}

fn hour_routes() -> Router<AppState> {
    Router::new()
        .route("/hours/submit", post(hours::submit_post))
        .route("/hours/pending/:course_id", get(hours::pending_get))
        .route("/hours/:id/review", put(hours::review_put))
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "success": true,
        "data": {
            "name": "Course Staffing API",
            "version": version,
            "description": "TA applications, contracts and hour declarations",
            "endpoints": {
                "home": "/ (public)",
                "auth": "/auth/token (public - token acquisition), /api/auth/whoami",
                "applications": "/applications/* (apply, status, withdraw, accept, reject, pending)",
                "contracts": "/contracts/* and /ratings",
                "hours": "/hours/* (submit, review, pending)",
            }
        }
    }))
}

async fn health() -> axum::response::Json<Value> {
    let now = chrono::Utc::now();

    axum::response::Json(json!({
        "success": true,
        "data": {
            "status": "ok",
            "timestamp": now
        }
    }))
}
