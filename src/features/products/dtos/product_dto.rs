use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::features::products::models::Product;
use crate::shared::constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

/// Request DTO for creating a product
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateProductDto {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,

    pub description: Option<String>,

    #[validate(custom(function = validate_non_negative))]
    pub price: Decimal,

    /// Image URLs, in display order
    #[serde(default)]
    pub images: Vec<String>,

    /// Ids of the categories this product belongs to
    #[serde(default)]
    pub categories: Vec<Uuid>,

    #[validate(range(min = 0, message = "Stock cannot be negative"))]
    #[serde(default)]
    pub stock: i32,
}

/// Request DTO for updating a product. Absent fields stay unchanged.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateProductDto {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: Option<String>,

    pub description: Option<String>,

    #[validate(custom(function = validate_non_negative))]
    pub price: Option<Decimal>,

    pub images: Option<Vec<String>>,

    pub categories: Option<Vec<Uuid>>,

    #[validate(range(min = 0, message = "Stock cannot be negative"))]
    pub stock: Option<i32>,

    pub is_active: Option<bool>,
}

fn validate_non_negative(price: &Decimal) -> Result<(), ValidationError> {
    if price.is_sign_negative() {
        return Err(ValidationError::new("negative_price"));
    }
    Ok(())
}

/// Response DTO for product
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductResponseDto {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub images: Vec<String>,
    pub categories: Vec<Uuid>,
    pub stock: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Product> for ProductResponseDto {
    fn from(p: Product) -> Self {
        Self {
            id: p.id,
            name: p.name,
            description: p.description,
            price: p.price,
            images: p.images,
            categories: p.categories,
            stock: p.stock,
            is_active: p.is_active,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

/// Query parameters for listing products
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct ProductQueryParams {
    /// Only products belonging to this category
    pub category: Option<Uuid>,

    /// Page number (1-indexed, default: 1)
    #[serde(default = "default_page")]
    #[param(minimum = 1)]
    pub page: i64,

    /// Number of items per page (default: 10, max: 100)
    #[serde(default = "default_page_size")]
    #[param(minimum = 1, maximum = 100)]
    pub page_size: i64,
}

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

impl ProductQueryParams {
    /// Calculate SQL OFFSET from page number
    pub fn offset(&self) -> i64 {
        (self.page.max(1) - 1) * self.limit()
    }

    /// Get clamped page_size (respects MAX_PAGE_SIZE)
    pub fn limit(&self) -> i64 {
        self.page_size.clamp(1, MAX_PAGE_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_negative_price() {
        let dto = CreateProductDto {
            name: "Figura de Goku".to_string(),
            description: None,
            price: Decimal::new(-1999, 2),
            images: vec![],
            categories: vec![],
            stock: 0,
        };

        assert!(dto.validate().is_err());
    }

    #[test]
    fn accepts_zero_and_positive_price() {
        let mut dto = CreateProductDto {
            name: "Figura de Goku".to_string(),
            description: None,
            price: Decimal::ZERO,
            images: vec![],
            categories: vec![],
            stock: 5,
        };
        assert!(dto.validate().is_ok());

        dto.price = Decimal::new(2999, 2);
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn rejects_negative_stock() {
        let dto = UpdateProductDto {
            name: None,
            description: None,
            price: None,
            images: None,
            categories: None,
            stock: Some(-3),
            is_active: None,
        };

        assert!(dto.validate().is_err());
    }

    #[test]
    fn create_defaults_images_categories_and_stock() {
        let dto: CreateProductDto =
            serde_json::from_str(r#"{"name":"Catan","price":"39.99"}"#).unwrap();

        assert!(dto.images.is_empty());
        assert!(dto.categories.is_empty());
        assert_eq!(dto.stock, 0);
        assert_eq!(dto.price, Decimal::new(3999, 2));
    }
}
