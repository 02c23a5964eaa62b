use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use super::health;
use super::interests;
use super::middleware::{
    logging_middleware, metrics_middleware, security_headers_middleware, signup_shape_middleware,
};
use super::state::AppState;
use super::users;
use crate::infrastructure::metrics::{create_metrics_router, PrometheusMetrics};

/// Create the user and interest routes with application state
pub fn create_router_with_state(state: AppState) -> Router {
    Router::new()
        // Health endpoints
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check))
        // Users
        .route("/users", get(users::list_users))
        .route(
            "/users/signup",
            post(users::signup).layer(middleware::from_fn(signup_shape_middleware)),
        )
        .route("/users/login", post(users::login))
        .route("/users/{id}", get(users::get_user).put(users::edit_user))
        // User interests
        .route("/users/{id}/interest", get(interests::list_interests))
        .route(
            "/users/{id}/interest/{interest_id}",
            get(interests::get_interest)
                .post(interests::add_interest)
                .delete(interests::remove_interest),
        )
        .with_state(state)
}

/// Create the full application router with middleware and optional metrics endpoint
pub fn create_router(state: AppState, metrics: Option<PrometheusMetrics>) -> Router {
    let mut router = create_router_with_state(state)
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TraceLayer::new_for_http());

    if let Some(m) = metrics {
        router = router.merge(create_metrics_router(m));
    }

    router
}
