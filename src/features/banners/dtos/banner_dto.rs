use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::banners::models::Banner;
use crate::shared::validation::validate_bg_gradient;

/// Request DTO for creating a banner
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateBannerDto {
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: String,

    #[validate(length(max = 255, message = "Subtitle must not exceed 255 characters"))]
    pub subtitle: Option<String>,

    #[validate(url(message = "Image must be a valid URL"))]
    pub image: String,

    #[validate(length(min = 1, max = 100, message = "CTA must be 1-100 characters"))]
    pub cta: Option<String>,

    pub cta_link: Option<String>,

    #[validate(custom(function = validate_bg_gradient))]
    pub bg_color: Option<String>,

    #[serde(default)]
    pub display_order: i32,

    pub starts_at: Option<DateTime<Utc>>,

    pub ends_at: Option<DateTime<Utc>>,
}

/// Request DTO for updating a banner. Absent fields stay unchanged.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateBannerDto {
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: Option<String>,

    #[validate(length(max = 255, message = "Subtitle must not exceed 255 characters"))]
    pub subtitle: Option<String>,

    #[validate(url(message = "Image must be a valid URL"))]
    pub image: Option<String>,

    #[validate(length(min = 1, max = 100, message = "CTA must be 1-100 characters"))]
    pub cta: Option<String>,

    pub cta_link: Option<String>,

    #[validate(custom(function = validate_bg_gradient))]
    pub bg_color: Option<String>,

    pub display_order: Option<i32>,

    pub is_active: Option<bool>,

    pub starts_at: Option<DateTime<Utc>>,

    pub ends_at: Option<DateTime<Utc>>,
}

/// Response DTO for banner
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BannerResponseDto {
    pub id: Uuid,
    pub title: String,
    pub subtitle: Option<String>,
    pub image: String,
    pub cta: String,
    pub cta_link: Option<String>,
    pub bg_color: String,
    pub display_order: i32,
    pub is_active: bool,
    pub starts_at: DateTime<Utc>,
    pub ends_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<Banner> for BannerResponseDto {
    fn from(b: Banner) -> Self {
        Self {
            id: b.id,
            title: b.title,
            subtitle: b.subtitle,
            image: b.image,
            cta: b.cta,
            cta_link: b.cta_link,
            bg_color: b.bg_color,
            display_order: b.display_order,
            is_active: b.is_active,
            starts_at: b.starts_at,
            ends_at: b.ends_at,
            created_at: b.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_invalid_bg_gradient() {
        let dto: CreateBannerDto = serde_json::from_str(
            r#"{"title":"Oferta","image":"https://cdn.test/b.webp","bg_color":"plain-red"}"#,
        )
        .unwrap();

        assert!(dto.validate().is_err());
    }

    #[test]
    fn accepts_minimal_banner() {
        let dto: CreateBannerDto =
            serde_json::from_str(r#"{"title":"Oferta","image":"https://cdn.test/b.webp"}"#)
                .unwrap();

        assert!(dto.validate().is_ok());
        assert_eq!(dto.display_order, 0);
        assert!(dto.cta.is_none());
    }

    #[test]
    fn rejects_non_url_image() {
        let dto: CreateBannerDto =
            serde_json::from_str(r#"{"title":"Oferta","image":"not a url"}"#).unwrap();

        assert!(dto.validate().is_err());
    }
}
