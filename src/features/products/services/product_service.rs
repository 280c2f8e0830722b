use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{handle_db_error, AppError, Result};
use crate::features::products::dtos::{
    CreateProductDto, ProductQueryParams, ProductResponseDto, UpdateProductDto,
};
use crate::features::products::models::Product;

/// Service for product operations
pub struct ProductService {
    pool: PgPool,
}

impl ProductService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List active products for the storefront, newest first
    pub async fn list(&self, params: &ProductQueryParams) -> Result<(Vec<ProductResponseDto>, i64)> {
        self.list_filtered(params, true).await
    }

    /// List every product for the back office, including inactive ones
    pub async fn list_all(
        &self,
        params: &ProductQueryParams,
    ) -> Result<(Vec<ProductResponseDto>, i64)> {
        self.list_filtered(params, false).await
    }

    async fn list_filtered(
        &self,
        params: &ProductQueryParams,
        active_only: bool,
    ) -> Result<(Vec<ProductResponseDto>, i64)> {
        let mut conditions = Vec::new();

        if active_only {
            conditions.push("is_active = TRUE".to_string());
        }

        // Handle queries based on whether a category filter is present
        if let Some(category) = params.category {
            // WITH CATEGORY: $1 for the category, $2 for limit, $3 for offset
            conditions.push("$1 = ANY(categories)".to_string());

            let where_clause = format!("WHERE {}", conditions.join(" AND "));

            let count_query = format!("SELECT COUNT(*) FROM products {}", where_clause);
            let total: i64 = sqlx::query_scalar(&count_query)
                .bind(category)
                .fetch_one(&self.pool)
                .await
                .map_err(AppError::Database)?;

            let query = format!(
                "SELECT * FROM products {} ORDER BY created_at DESC LIMIT $2 OFFSET $3",
                where_clause
            );
            let products: Vec<Product> = sqlx::query_as(&query)
                .bind(category)
                .bind(params.limit())
                .bind(params.offset())
                .fetch_all(&self.pool)
                .await
                .map_err(AppError::Database)?;

            Ok((
                products.into_iter().map(ProductResponseDto::from).collect(),
                total,
            ))
        } else {
            // WITHOUT CATEGORY: $1 for limit, $2 for offset
            let where_clause = if conditions.is_empty() {
                String::new()
            } else {
                format!("WHERE {}", conditions.join(" AND "))
            };

            let count_query = format!("SELECT COUNT(*) FROM products {}", where_clause);
            let total: i64 = sqlx::query_scalar(&count_query)
                .fetch_one(&self.pool)
                .await
                .map_err(AppError::Database)?;

            let query = format!(
                "SELECT * FROM products {} ORDER BY created_at DESC LIMIT $1 OFFSET $2",
                where_clause
            );
            let products: Vec<Product> = sqlx::query_as(&query)
                .bind(params.limit())
                .bind(params.offset())
                .fetch_all(&self.pool)
                .await
                .map_err(AppError::Database)?;

            Ok((
                products.into_iter().map(ProductResponseDto::from).collect(),
                total,
            ))
        }
    }

    /// Get a single product by id
    pub async fn get_by_id(&self, id: Uuid) -> Result<ProductResponseDto> {
        let product = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?;

        product
            .map(|p| p.into())
            .ok_or_else(|| AppError::NotFound(format!("Product {} not found", id)))
    }

    /// Create a new product
    pub async fn create(&self, dto: CreateProductDto) -> Result<ProductResponseDto> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (name, description, price, images, categories, stock)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&dto.name)
        .bind(&dto.description)
        .bind(dto.price)
        .bind(&dto.images)
        .bind(&dto.categories)
        .bind(dto.stock)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match handle_db_error(e) {
            AppError::Conflict(_) => {
                AppError::Conflict(format!("Product '{}' already exists", dto.name))
            }
            other => other,
        })?;

        tracing::info!("Product created: {} ({})", product.name, product.id);

        Ok(product.into())
    }

    /// Update a product. Absent fields stay unchanged.
    pub async fn update(&self, id: Uuid, dto: UpdateProductDto) -> Result<ProductResponseDto> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products
            SET name = COALESCE($1, name),
                description = COALESCE($2, description),
                price = COALESCE($3, price),
                images = COALESCE($4, images),
                categories = COALESCE($5, categories),
                stock = COALESCE($6, stock),
                is_active = COALESCE($7, is_active),
                updated_at = NOW()
            WHERE id = $8
            RETURNING *
            "#,
        )
        .bind(&dto.name)
        .bind(&dto.description)
        .bind(dto.price)
        .bind(&dto.images)
        .bind(&dto.categories)
        .bind(dto.stock)
        .bind(dto.is_active)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| match handle_db_error(e) {
            AppError::Conflict(_) => {
                AppError::Conflict("A product with this name already exists".to_string())
            }
            other => other,
        })?
        .ok_or_else(|| AppError::NotFound(format!("Product {} not found", id)))?;

        tracing::info!("Product updated: {} ({})", product.name, product.id);

        Ok(product.into())
    }

    /// Delete a product
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Product {} not found", id)));
        }

        tracing::info!("Product deleted: {}", id);

        Ok(())
    }
}
