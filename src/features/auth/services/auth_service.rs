use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::core::error::{handle_db_error, AppError, Result};
use crate::features::auth::dtos::{AuthUserDto, CreateAdminDto, LoginRequestDto, LoginResponseDto};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::auth::models::User;
use crate::features::auth::password;
use crate::features::auth::services::TokenService;
use crate::shared::constants::ROLE_ADMIN;

/// Service for back-office authentication and admin user management
pub struct AuthService {
    pool: PgPool,
    tokens: Arc<TokenService>,
}

impl AuthService {
    pub fn new(pool: PgPool, tokens: Arc<TokenService>) -> Self {
        Self { pool, tokens }
    }

    /// Authenticate an admin by email and password, returning a signed token.
    ///
    /// Unknown email, non-admin role, and wrong password all produce the
    /// same error so the response does not leak which part failed.
    pub async fn login(&self, dto: LoginRequestDto) -> Result<LoginResponseDto> {
        let invalid = || AppError::Unauthorized("Invalid email or password".to_string());

        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(&dto.email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to look up user by email: {:?}", e);
                AppError::Database(e)
            })?
            .ok_or_else(invalid)?;

        if user.role != ROLE_ADMIN {
            return Err(invalid());
        }

        if !password::verify_password(&dto.password, &user.password_hash) {
            return Err(invalid());
        }

        let authenticated = AuthenticatedUser {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role.clone(),
        };
        let token = self.tokens.issue_token(&authenticated)?;

        tracing::info!("Admin logged in: {}", user.email);

        Ok(LoginResponseDto {
            token,
            user: user.into(),
        })
    }

    /// Create a new admin user
    pub async fn create_admin(&self, dto: CreateAdminDto) -> Result<AuthUserDto> {
        let password_hash = password::hash_password(&dto.password);

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, password_hash, role)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(&dto.name)
        .bind(&dto.email)
        .bind(&password_hash)
        .bind(ROLE_ADMIN)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match handle_db_error(e) {
            AppError::Conflict(_) => {
                AppError::Conflict("A user with this email already exists".to_string())
            }
            other => other,
        })?;

        tracing::info!("Admin created: {}", user.email);

        Ok(user.into())
    }

    /// Fetch the current user's profile
    pub async fn get_me(&self, user_id: Uuid) -> Result<AuthUserDto> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        Ok(user.into())
    }
}
