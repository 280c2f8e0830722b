use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::guards::RequireAdmin;
use crate::features::banners::dtos::{BannerResponseDto, CreateBannerDto, UpdateBannerDto};
use crate::features::banners::services::BannerService;
use crate::shared::types::ApiResponse;

/// List banners currently visible on the storefront
#[utoipa::path(
    get,
    path = "/api/banners",
    responses(
        (status = 200, description = "Active banners in carousel order", body = ApiResponse<Vec<BannerResponseDto>>),
    ),
    tag = "banners"
)]
pub async fn list_banners(
    State(service): State<Arc<BannerService>>,
) -> Result<Json<ApiResponse<Vec<BannerResponseDto>>>> {
    let banners = service.list_visible().await?;
    Ok(Json(ApiResponse::success(Some(banners), None, None)))
}

/// List all banners, including inactive and expired ones (admin only)
#[utoipa::path(
    get,
    path = "/api/admin/banners",
    responses(
        (status = 200, description = "All banners", body = ApiResponse<Vec<BannerResponseDto>>),
    ),
    tag = "banners",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_all_banners(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<BannerService>>,
) -> Result<Json<ApiResponse<Vec<BannerResponseDto>>>> {
    let banners = service.list_all().await?;
    Ok(Json(ApiResponse::success(Some(banners), None, None)))
}

/// Get banner by id (admin only)
#[utoipa::path(
    get,
    path = "/api/admin/banners/{id}",
    params(
        ("id" = Uuid, Path, description = "Banner ID")
    ),
    responses(
        (status = 200, description = "Banner found", body = ApiResponse<BannerResponseDto>),
        (status = 404, description = "Banner not found")
    ),
    tag = "banners",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_banner(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<BannerService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<BannerResponseDto>>> {
    let banner = service.get_by_id(id).await?;
    Ok(Json(ApiResponse::success(Some(banner), None, None)))
}

/// Create a new banner (admin only)
#[utoipa::path(
    post,
    path = "/api/admin/banners",
    request_body = CreateBannerDto,
    responses(
        (status = 201, description = "Banner created", body = ApiResponse<BannerResponseDto>),
        (status = 400, description = "Validation error")
    ),
    tag = "banners",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_banner(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<BannerService>>,
    AppJson(dto): AppJson<CreateBannerDto>,
) -> Result<(StatusCode, Json<ApiResponse<BannerResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let banner = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(banner), None, None)),
    ))
}

/// Update a banner (admin only)
#[utoipa::path(
    put,
    path = "/api/admin/banners/{id}",
    params(
        ("id" = Uuid, Path, description = "Banner ID")
    ),
    request_body = UpdateBannerDto,
    responses(
        (status = 200, description = "Banner updated", body = ApiResponse<BannerResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Banner not found")
    ),
    tag = "banners",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_banner(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<BannerService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateBannerDto>,
) -> Result<Json<ApiResponse<BannerResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let banner = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(Some(banner), None, None)))
}

/// Delete a banner (admin only)
#[utoipa::path(
    delete,
    path = "/api/admin/banners/{id}",
    params(
        ("id" = Uuid, Path, description = "Banner ID")
    ),
    responses(
        (status = 200, description = "Banner deleted"),
        (status = 404, description = "Banner not found")
    ),
    tag = "banners",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_banner(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<BannerService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Banner deleted".to_string()),
        None,
    )))
}
