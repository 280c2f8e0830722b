use std::sync::Arc;

use axum::{
    routing::{delete, post},
    Router,
};

use crate::features::images::handlers;
use crate::features::images::services::ImageService;

/// Admin image routes (mounted behind the auth middleware)
pub fn admin_routes(service: Arc<ImageService>) -> Router {
    Router::new()
        .route("/api/admin/images/upload", post(handlers::upload_image))
        .route("/api/admin/images", delete(handlers::delete_image_by_url))
        .with_state(service)
}
