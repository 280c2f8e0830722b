use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::auth::handlers;
use crate::features::auth::services::AuthService;

/// Routes that must stay outside the auth middleware (login itself)
pub fn public_routes(service: Arc<AuthService>) -> Router {
    Router::new()
        .route("/api/admin/users/login", post(handlers::login))
        .with_state(service)
}

/// Routes that require an authenticated admin
pub fn protected_routes(service: Arc<AuthService>) -> Router {
    Router::new()
        .route("/api/admin/users", post(handlers::create_admin))
        .route("/api/admin/users/me", get(handlers::get_me))
        .with_state(service)
}
