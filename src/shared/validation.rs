use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

lazy_static! {
    /// Regex for validating banner background gradient classes.
    /// Must be a Tailwind-style "from-[#RRGGBB] to-[#RRGGBB]" pair, with an
    /// optional "via-[#RRGGBB]" stop in between.
    /// - Valid: "from-[#FF3C3B] to-[#FF8C42]", "from-[#000000] via-[#ff00ff] to-[#ffffff]"
    /// - Invalid: "from-[red] to-[blue]", "bg-[#FF3C3B]", "from-[#FFF] to-[#000]"
    pub static ref BG_GRADIENT_REGEX: Regex = Regex::new(
        r"^from-\[#[0-9a-fA-F]{6}\](?: via-\[#[0-9a-fA-F]{6}\])? to-\[#[0-9a-fA-F]{6}\]$"
    )
    .unwrap();
}

/// Custom validator for banner `bg_color` fields
pub fn validate_bg_gradient(value: &str) -> Result<(), ValidationError> {
    if BG_GRADIENT_REGEX.is_match(value) {
        Ok(())
    } else {
        Err(ValidationError::new("bg_gradient"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bg_gradient_regex_valid() {
        assert!(BG_GRADIENT_REGEX.is_match("from-[#FF3C3B] to-[#FF8C42]"));
        assert!(BG_GRADIENT_REGEX.is_match("from-[#000000] to-[#ffffff]"));
        assert!(BG_GRADIENT_REGEX.is_match("from-[#000000] via-[#ff00ff] to-[#ffffff]"));
    }

    #[test]
    fn test_bg_gradient_regex_invalid() {
        assert!(!BG_GRADIENT_REGEX.is_match("from-[red] to-[blue]")); // named colors
        assert!(!BG_GRADIENT_REGEX.is_match("bg-[#FF3C3B]")); // not a gradient pair
        assert!(!BG_GRADIENT_REGEX.is_match("from-[#FFF] to-[#000]")); // short hex
        assert!(!BG_GRADIENT_REGEX.is_match("from-[#FF3C3B]to-[#FF8C42]")); // missing space
        assert!(!BG_GRADIENT_REGEX.is_match("")); // empty
    }

    #[test]
    fn test_validate_bg_gradient() {
        assert!(validate_bg_gradient("from-[#FF3C3B] to-[#FF8C42]").is_ok());
        assert!(validate_bg_gradient("solid-red").is_err());
    }
}
