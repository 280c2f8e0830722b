use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::banners::handlers;
use crate::features::banners::services::BannerService;

/// Public banner routes (no authentication required)
pub fn routes(service: Arc<BannerService>) -> Router {
    Router::new()
        .route("/api/banners", get(handlers::list_banners))
        .with_state(service)
}

/// Admin banner routes (mounted behind the auth middleware)
pub fn admin_routes(service: Arc<BannerService>) -> Router {
    Router::new()
        .route(
            "/api/admin/banners",
            get(handlers::list_all_banners).post(handlers::create_banner),
        )
        .route(
            "/api/admin/banners/{id}",
            get(handlers::get_banner)
                .put(handlers::update_banner)
                .delete(handlers::delete_banner),
        )
        .with_state(service)
}
