use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::dtos::{AuthUserDto, CreateAdminDto, LoginRequestDto, LoginResponseDto};
use crate::features::auth::guards::RequireAdmin;
use crate::features::auth::services::AuthService;
use crate::shared::types::ApiResponse;

/// Admin login
///
/// Exchanges email and password for a bearer token.
#[utoipa::path(
    post,
    path = "/api/admin/users/login",
    request_body = LoginRequestDto,
    responses(
        (status = 200, description = "Login successful", body = ApiResponse<LoginResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "auth"
)]
pub async fn login(
    State(service): State<Arc<AuthService>>,
    AppJson(dto): AppJson<LoginRequestDto>,
) -> Result<Json<ApiResponse<LoginResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let response = service.login(dto).await?;
    Ok(Json(ApiResponse::success(
        Some(response),
        Some("Login successful".to_string()),
        None,
    )))
}

/// Create a new admin user (admin only)
#[utoipa::path(
    post,
    path = "/api/admin/users",
    request_body = CreateAdminDto,
    responses(
        (status = 201, description = "Admin created", body = ApiResponse<AuthUserDto>),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Email already registered")
    ),
    tag = "auth",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_admin(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<AuthService>>,
    AppJson(dto): AppJson<CreateAdminDto>,
) -> Result<(StatusCode, Json<ApiResponse<AuthUserDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let user = service.create_admin(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(user), None, None)),
    ))
}

/// Get the authenticated admin's profile
#[utoipa::path(
    get,
    path = "/api/admin/users/me",
    responses(
        (status = 200, description = "Current user profile", body = ApiResponse<AuthUserDto>),
        (status = 401, description = "Authentication required")
    ),
    tag = "auth",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_me(
    RequireAdmin(user): RequireAdmin,
    State(service): State<Arc<AuthService>>,
) -> Result<Json<ApiResponse<AuthUserDto>>> {
    let profile = service.get_me(user.id).await?;
    Ok(Json(ApiResponse::success(Some(profile), None, None)))
}
