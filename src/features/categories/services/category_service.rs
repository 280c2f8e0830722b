use std::collections::HashMap;
use std::time::{Duration, Instant};

use sqlx::PgPool;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::core::error::{handle_db_error, AppError, Result};
use crate::features::categories::dtos::{
    CategoryResponseDto, CategoryTreeDto, CreateCategoryDto, UpdateCategoryDto,
};
use crate::features::categories::models::Category;

/// Cached category tree, rebuilt from a fresh snapshot after every mutation
struct TreeCache {
    tree: Vec<CategoryTreeDto>,
    last_fetched: Instant,
}

/// Service for category operations.
///
/// Owns the derived-tree cache: readers get the cached forest, mutations
/// invalidate it, and the next reader rebuilds from a fresh snapshot.
/// Rebuilds are pure functions of the snapshot, so concurrent refreshes
/// are benign.
pub struct CategoryService {
    pool: PgPool,
    cache: RwLock<Option<TreeCache>>,
    cache_ttl: Duration,
}

impl CategoryService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            cache: RwLock::new(None),
            cache_ttl: Duration::from_secs(300), // 5 minutes default
        }
    }

    /// Fetch the flat category snapshot in stable insertion order
    async fn fetch_all(&self) -> Result<Vec<Category>> {
        sqlx::query_as::<_, Category>("SELECT * FROM categories ORDER BY created_at, name")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list categories: {:?}", e);
                AppError::Database(e)
            })
    }

    /// List all categories (flat list)
    pub async fn list(&self) -> Result<Vec<CategoryResponseDto>> {
        let categories = self.fetch_all().await?;
        Ok(categories.into_iter().map(|c| c.into()).collect())
    }

    /// List all categories as a tree, served from the cache when fresh
    pub async fn list_tree(&self) -> Result<Vec<CategoryTreeDto>> {
        // Fast path: cached and within TTL
        {
            let cache_read = self.cache.read().await;
            if let Some(ref cached) = *cache_read {
                if cached.last_fetched.elapsed() < self.cache_ttl {
                    return Ok(cached.tree.clone());
                }
            }
        }

        // Cache miss or expired - rebuild from a fresh snapshot
        let categories = self.fetch_all().await?;
        let tree = CategoryTreeDto::build_tree(categories);

        let mut cache_write = self.cache.write().await;
        *cache_write = Some(TreeCache {
            tree: tree.clone(),
            last_fetched: Instant::now(),
        });

        Ok(tree)
    }

    /// Get a single category by id
    pub async fn get_by_id(&self, id: Uuid) -> Result<CategoryResponseDto> {
        let category = sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?;

        category
            .map(|c| c.into())
            .ok_or_else(|| AppError::NotFound(format!("Category {} not found", id)))
    }

    /// Root-to-category breadcrumb path, derived from the cached tree
    pub async fn breadcrumbs(&self, id: Uuid) -> Result<Vec<CategoryResponseDto>> {
        let tree = self.list_tree().await?;
        let path = CategoryTreeDto::breadcrumbs(&tree, id);

        if path.is_empty() {
            return Err(AppError::NotFound(format!("Category {} not found", id)));
        }

        Ok(path)
    }

    /// Create a new category
    pub async fn create(&self, dto: CreateCategoryDto) -> Result<CategoryResponseDto> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (name, description, icon, parent_id)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(&dto.name)
        .bind(&dto.description)
        .bind(&dto.icon)
        .bind(dto.parent_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match handle_db_error(e) {
            AppError::Conflict(_) => {
                AppError::Conflict(format!("Category '{}' already exists", dto.name))
            }
            AppError::BadRequest(_) => {
                AppError::BadRequest("Parent category does not exist".to_string())
            }
            other => other,
        })?;

        self.invalidate_cache().await;
        tracing::info!("Category created: {} ({})", category.name, category.id);

        Ok(category.into())
    }

    /// Update a category.
    ///
    /// Re-parenting is validated against the current snapshot: the new
    /// parent must exist and must not be the category itself or one of its
    /// descendants, so the parent graph stays acyclic.
    pub async fn update(&self, id: Uuid, dto: UpdateCategoryDto) -> Result<CategoryResponseDto> {
        if let Some(Some(new_parent)) = dto.parent_id {
            self.ensure_acyclic(id, new_parent).await?;
        }

        let category = match dto.parent_id {
            Some(new_parent) => {
                // Parent explicitly set (to a value or to NULL)
                sqlx::query_as::<_, Category>(
                    r#"
                    UPDATE categories
                    SET name = COALESCE($1, name),
                        description = COALESCE($2, description),
                        icon = COALESCE($3, icon),
                        parent_id = $4,
                        updated_at = NOW()
                    WHERE id = $5
                    RETURNING *
                    "#,
                )
                .bind(&dto.name)
                .bind(&dto.description)
                .bind(&dto.icon)
                .bind(new_parent)
                .bind(id)
                .fetch_optional(&self.pool)
                .await
            }
            None => {
                // Parent untouched
                sqlx::query_as::<_, Category>(
                    r#"
                    UPDATE categories
                    SET name = COALESCE($1, name),
                        description = COALESCE($2, description),
                        icon = COALESCE($3, icon),
                        updated_at = NOW()
                    WHERE id = $4
                    RETURNING *
                    "#,
                )
                .bind(&dto.name)
                .bind(&dto.description)
                .bind(&dto.icon)
                .bind(id)
                .fetch_optional(&self.pool)
                .await
            }
        }
        .map_err(|e| match handle_db_error(e) {
            AppError::Conflict(_) => {
                AppError::Conflict("A category with this name already exists".to_string())
            }
            other => other,
        })?
        .ok_or_else(|| AppError::NotFound(format!("Category {} not found", id)))?;

        self.invalidate_cache().await;
        tracing::info!("Category updated: {} ({})", category.name, category.id);

        Ok(category.into())
    }

    /// Delete a category. Refused while the category still has children.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let child_count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM categories WHERE parent_id = $1")
                .bind(id)
                .fetch_one(&self.pool)
                .await
                .map_err(AppError::Database)?;

        if child_count > 0 {
            return Err(AppError::Conflict(format!(
                "Category has {} subcategories and cannot be deleted",
                child_count
            )));
        }

        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Category {} not found", id)));
        }

        self.invalidate_cache().await;
        tracing::info!("Category deleted: {}", id);

        Ok(())
    }

    /// Reject re-parenting that would close a cycle.
    ///
    /// Walks the ancestor chain of the proposed parent against the current
    /// snapshot; the walk is bounded by the snapshot size, so even stored
    /// bad data cannot loop forever.
    async fn ensure_acyclic(&self, id: Uuid, new_parent: Uuid) -> Result<()> {
        if new_parent == id {
            return Err(AppError::Conflict(
                "A category cannot be its own parent".to_string(),
            ));
        }

        let categories = self.fetch_all().await?;
        let parent_of: HashMap<Uuid, Option<Uuid>> =
            categories.iter().map(|c| (c.id, c.parent_id)).collect();

        if !parent_of.contains_key(&new_parent) {
            return Err(AppError::BadRequest(
                "Parent category does not exist".to_string(),
            ));
        }

        let mut current = Some(new_parent);
        let mut hops = 0;
        while let Some(ancestor) = current {
            if ancestor == id {
                return Err(AppError::Conflict(
                    "Moving the category under one of its descendants would create a cycle"
                        .to_string(),
                ));
            }
            hops += 1;
            if hops > parent_of.len() {
                break;
            }
            current = parent_of.get(&ancestor).copied().flatten();
        }

        Ok(())
    }

    /// Clear the cached tree
    async fn invalidate_cache(&self) {
        let mut cache_write = self.cache.write().await;
        *cache_write = None;
    }
}
