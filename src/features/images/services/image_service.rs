use sqlx::PgPool;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::images::dtos::{get_extension_from_content_type, ImageResponseDto};
use crate::features::images::models::Image;
use crate::modules::storage::ImageStore;

/// Service for image upload and deletion
pub struct ImageService {
    pool: PgPool,
    store: Arc<ImageStore>,
}

impl ImageService {
    pub fn new(pool: PgPool, store: Arc<ImageStore>) -> Self {
        Self { pool, store }
    }

    /// Upload an image to object storage and save its metadata.
    ///
    /// The object key is `images/{purpose}/{image_id}.{ext}`, so a stable
    /// random id decouples the stored name from whatever the admin uploaded.
    pub async fn upload_image(
        &self,
        data: Vec<u8>,
        original_filename: &str,
        content_type: &str,
        purpose: Option<String>,
        uploaded_by: Uuid,
    ) -> Result<ImageResponseDto> {
        let file_size = data.len() as i64;

        let image_id = Uuid::new_v4();
        let extension = get_extension_from_content_type(content_type)
            .unwrap_or_else(|| original_filename.rsplit('.').next().unwrap_or("bin"));

        let purpose_path = purpose.as_deref().unwrap_or("uploads");
        let path = format!("{}/{}.{}", purpose_path, image_id, extension);
        let file_key = self.store.generate_key(&path);

        self.store.upload(&file_key, data, content_type).await?;

        debug!("Image uploaded to storage: {}", file_key);

        let url = self.store.public_url(&file_key);

        let image = sqlx::query_as::<_, Image>(
            r#"
            INSERT INTO images (file_key, original_filename, content_type, file_size, url, uploaded_by)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&file_key)
        .bind(original_filename)
        .bind(content_type)
        .bind(file_size)
        .bind(&url)
        .bind(uploaded_by)
        .fetch_one(&self.pool)
        .await?;

        info!(
            "Image metadata saved: id={}, key={}, size={}",
            image.id, image.file_key, image.file_size
        );

        Ok(ImageResponseDto {
            id: image.id,
            original_filename: image.original_filename,
            content_type: image.content_type,
            file_size: image.file_size,
            url: image.url,
            created_at: image.created_at,
        })
    }

    /// Delete an image by its URL.
    ///
    /// Every admin may delete any image; the back office is a shared space.
    pub async fn delete_by_url(&self, url: &str) -> Result<()> {
        let file_key = self.store.extract_key_from_url(url).ok_or_else(|| {
            AppError::BadRequest("URL does not point to this image store".to_string())
        })?;

        let image = sqlx::query_as::<_, Image>("SELECT * FROM images WHERE file_key = $1")
            .bind(&file_key)
            .fetch_optional(&self.pool)
            .await?;

        let image = image.ok_or_else(|| AppError::NotFound("Image not found".to_string()))?;

        self.store.delete(&image.file_key).await?;

        debug!("Image deleted from storage: {}", image.file_key);

        sqlx::query("DELETE FROM images WHERE id = $1")
            .bind(image.id)
            .execute(&self.pool)
            .await?;

        info!("Image deleted: id={}, key={}", image.id, image.file_key);

        Ok(())
    }
}
