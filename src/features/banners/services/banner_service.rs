use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::banners::dtos::{BannerResponseDto, CreateBannerDto, UpdateBannerDto};
use crate::features::banners::models::Banner;

/// Default CTA label for banners created without one
const DEFAULT_CTA: &str = "Ver más";

/// Default background gradient classes
const DEFAULT_BG_COLOR: &str = "from-[#FF3C3B] to-[#FF8C42]";

/// Service for promotional banner operations
pub struct BannerService {
    pool: PgPool,
}

impl BannerService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List banners currently visible on the storefront, in carousel order.
    ///
    /// Date windows are evaluated against a single timestamp for the whole
    /// response.
    pub async fn list_visible(&self) -> Result<Vec<BannerResponseDto>> {
        let banners = sqlx::query_as::<_, Banner>(
            r#"
            SELECT * FROM banners
            WHERE is_active = TRUE
            ORDER BY display_order, created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list banners: {:?}", e);
            AppError::Database(e)
        })?;

        let now = chrono::Utc::now();
        Ok(banners
            .into_iter()
            .filter(|b| b.is_visible_at(now))
            .map(|b| b.into())
            .collect())
    }

    /// List every banner for the back office, including inactive and expired
    pub async fn list_all(&self) -> Result<Vec<BannerResponseDto>> {
        let banners = sqlx::query_as::<_, Banner>(
            "SELECT * FROM banners ORDER BY display_order, created_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(banners.into_iter().map(|b| b.into()).collect())
    }

    /// Get a single banner by id
    pub async fn get_by_id(&self, id: Uuid) -> Result<BannerResponseDto> {
        let banner = sqlx::query_as::<_, Banner>("SELECT * FROM banners WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?;

        banner
            .map(|b| b.into())
            .ok_or_else(|| AppError::NotFound(format!("Banner {} not found", id)))
    }

    /// Create a new banner
    pub async fn create(&self, dto: CreateBannerDto) -> Result<BannerResponseDto> {
        let banner = sqlx::query_as::<_, Banner>(
            r#"
            INSERT INTO banners
                (title, subtitle, image, cta, cta_link, bg_color, display_order, starts_at, ends_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, COALESCE($8, NOW()), $9)
            RETURNING *
            "#,
        )
        .bind(&dto.title)
        .bind(&dto.subtitle)
        .bind(&dto.image)
        .bind(dto.cta.as_deref().unwrap_or(DEFAULT_CTA))
        .bind(&dto.cta_link)
        .bind(dto.bg_color.as_deref().unwrap_or(DEFAULT_BG_COLOR))
        .bind(dto.display_order)
        .bind(dto.starts_at)
        .bind(dto.ends_at)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)?;

        tracing::info!("Banner created: {} ({})", banner.title, banner.id);

        Ok(banner.into())
    }

    /// Update a banner. Absent fields stay unchanged.
    pub async fn update(&self, id: Uuid, dto: UpdateBannerDto) -> Result<BannerResponseDto> {
        let banner = sqlx::query_as::<_, Banner>(
            r#"
            UPDATE banners
            SET title = COALESCE($1, title),
                subtitle = COALESCE($2, subtitle),
                image = COALESCE($3, image),
                cta = COALESCE($4, cta),
                cta_link = COALESCE($5, cta_link),
                bg_color = COALESCE($6, bg_color),
                display_order = COALESCE($7, display_order),
                is_active = COALESCE($8, is_active),
                starts_at = COALESCE($9, starts_at),
                ends_at = COALESCE($10, ends_at),
                updated_at = NOW()
            WHERE id = $11
            RETURNING *
            "#,
        )
        .bind(&dto.title)
        .bind(&dto.subtitle)
        .bind(&dto.image)
        .bind(&dto.cta)
        .bind(&dto.cta_link)
        .bind(&dto.bg_color)
        .bind(dto.display_order)
        .bind(dto.is_active)
        .bind(dto.starts_at)
        .bind(dto.ends_at)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)?
        .ok_or_else(|| AppError::NotFound(format!("Banner {} not found", id)))?;

        tracing::info!("Banner updated: {} ({})", banner.title, banner.id);

        Ok(banner.into())
    }

    /// Delete a banner
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM banners WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Banner {} not found", id)));
        }

        tracing::info!("Banner deleted: {}", id);

        Ok(())
    }
}
