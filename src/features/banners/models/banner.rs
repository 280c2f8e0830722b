use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for promotional banner
#[derive(Debug, Clone, FromRow)]
#[allow(dead_code)]
pub struct Banner {
    pub id: Uuid,
    pub title: String,
    pub subtitle: Option<String>,
    /// Image URL
    pub image: String,
    /// Call-to-action label
    pub cta: String,
    /// Destination when the CTA is clicked
    pub cta_link: Option<String>,
    /// Tailwind gradient classes for the background
    pub bg_color: String,
    pub display_order: i32,
    pub is_active: bool,
    /// Start of the display window
    pub starts_at: DateTime<Utc>,
    /// Optional end of the display window
    pub ends_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Banner {
    /// Whether the banner should be shown on the storefront at `now`
    pub fn is_visible_at(&self, now: DateTime<Utc>) -> bool {
        self.is_active
            && self.starts_at <= now
            && self.ends_at.map(|end| end > now).unwrap_or(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn banner(is_active: bool, starts_offset: i64, ends_offset: Option<i64>) -> Banner {
        let now = Utc::now();
        Banner {
            id: Uuid::new_v4(),
            title: "Oferta".to_string(),
            subtitle: None,
            image: "https://cdn.test/banner.webp".to_string(),
            cta: "Ver más".to_string(),
            cta_link: None,
            bg_color: "from-[#FF3C3B] to-[#FF8C42]".to_string(),
            display_order: 0,
            is_active,
            starts_at: now + Duration::seconds(starts_offset),
            ends_at: ends_offset.map(|o| now + Duration::seconds(o)),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn visible_when_active_and_inside_window() {
        assert!(banner(true, -60, Some(60)).is_visible_at(Utc::now()));
        assert!(banner(true, -60, None).is_visible_at(Utc::now()));
    }

    #[test]
    fn hidden_when_inactive() {
        assert!(!banner(false, -60, Some(60)).is_visible_at(Utc::now()));
    }

    #[test]
    fn hidden_outside_window() {
        // Not started yet
        assert!(!banner(true, 60, None).is_visible_at(Utc::now()));
        // Already ended
        assert!(!banner(true, -120, Some(-60)).is_visible_at(Utc::now()));
    }
}
