/// Prefix a relative link with the site origin; absolute links pass through.
pub fn absolutize(origin: &str, link: &str) -> String {
    if link.starts_with("http://") || link.starts_with("https://") {
        link.to_string()
    } else {
        format!("{}{}", origin, link)
    }
}

/// Strip trailing periods, e.g. "9,999." becomes "9,999"
pub fn strip_trailing_period(text: &str) -> String {
    text.trim_end_matches('.').to_string()
}

/// Trimmed text, or `None` when nothing but whitespace is left
pub fn non_blank(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolutize() {
        assert_eq!(
            absolutize("https://shop.test", "/item/1"),
            "https://shop.test/item/1"
        );
        assert_eq!(
            absolutize("https://shop.test", "https://other.test/item/1"),
            "https://other.test/item/1"
        );
    }

    #[test]
    fn test_strip_trailing_period() {
        assert_eq!(strip_trailing_period("9,999."), "9,999");
        assert_eq!(strip_trailing_period("9,999"), "9,999");
        assert_eq!(strip_trailing_period("1.5.."), "1.5");
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank("  In Stock \n"), Some("In Stock".to_string()));
        assert_eq!(non_blank(" \t\n"), None);
    }
}
