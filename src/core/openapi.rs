use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::auth::{dtos as auth_dtos, handlers as auth_handlers, model as auth_model};
use crate::features::banners::{dtos as banners_dtos, handlers as banners_handlers};
use crate::features::categories::{dtos as categories_dtos, handlers as categories_handlers};
use crate::features::images::{dtos as images_dtos, handlers as images_handlers};
use crate::features::products::{dtos as products_dtos, handlers as products_handlers};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth_handlers::login,
        auth_handlers::create_admin,
        auth_handlers::get_me,
        // Categories (public)
        categories_handlers::list_categories,
        categories_handlers::get_category,
        categories_handlers::get_breadcrumbs,
        // Categories (admin)
        categories_handlers::create_category,
        categories_handlers::update_category,
        categories_handlers::delete_category,
        // Products (public)
        products_handlers::list_products,
        products_handlers::get_product,
        // Products (admin)
        products_handlers::list_all_products,
        products_handlers::create_product,
        products_handlers::update_product,
        products_handlers::delete_product,
        // Banners (public)
        banners_handlers::list_banners,
        // Banners (admin)
        banners_handlers::list_all_banners,
        banners_handlers::get_banner,
        banners_handlers::create_banner,
        banners_handlers::update_banner,
        banners_handlers::delete_banner,
        // Images (admin)
        images_handlers::upload_image,
        images_handlers::delete_image_by_url,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Auth
            auth_model::AuthenticatedUser,
            auth_dtos::LoginRequestDto,
            auth_dtos::CreateAdminDto,
            auth_dtos::AuthUserDto,
            auth_dtos::LoginResponseDto,
            ApiResponse<auth_dtos::LoginResponseDto>,
            ApiResponse<auth_dtos::AuthUserDto>,
            // Categories
            categories_dtos::CreateCategoryDto,
            categories_dtos::UpdateCategoryDto,
            categories_dtos::CategoryResponseDto,
            categories_dtos::CategoryTreeDto,
            ApiResponse<Vec<categories_dtos::CategoryResponseDto>>,
            ApiResponse<categories_dtos::CategoryResponseDto>,
            // Products
            products_dtos::CreateProductDto,
            products_dtos::UpdateProductDto,
            products_dtos::ProductResponseDto,
            ApiResponse<Vec<products_dtos::ProductResponseDto>>,
            ApiResponse<products_dtos::ProductResponseDto>,
            // Banners
            banners_dtos::CreateBannerDto,
            banners_dtos::UpdateBannerDto,
            banners_dtos::BannerResponseDto,
            ApiResponse<Vec<banners_dtos::BannerResponseDto>>,
            ApiResponse<banners_dtos::BannerResponseDto>,
            // Images
            images_dtos::UploadImageDto,
            images_dtos::ImageResponseDto,
            images_dtos::DeleteImageByUrlDto,
            images_dtos::DeleteImageResponseDto,
            ApiResponse<images_dtos::ImageResponseDto>,
            ApiResponse<images_dtos::DeleteImageResponseDto>,
        )
    ),
    tags(
        (name = "auth", description = "Admin authentication"),
        (name = "categories", description = "Product categories and the category tree (public reads)"),
        (name = "products", description = "Storefront products"),
        (name = "banners", description = "Promotional banners"),
        (name = "images", description = "Image upload and management (admin only)"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "La Vitrina API",
        version = "0.1.0",
        description = "API documentation for La Vitrina",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
