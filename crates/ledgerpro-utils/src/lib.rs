//! Formatting and helper functions

use rust_decimal::Decimal;

/// Format a monetary amount with two fraction digits
pub fn format_amount(value: Decimal) -> String {
    format!("{:.2}", value)
}

/// Escape text for interpolation into HTML fragments
pub fn sanitize_html(content: &str) -> String {
    content
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Render an optional field, falling back to a dash placeholder
pub fn or_dash(value: Option<&str>) -> String {
    match value {
        Some(s) if !s.trim().is_empty() => s.to_string(),
        _ => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(Decimal::new(10000, 2)), "100.00");
        assert_eq!(format_amount(Decimal::new(75, 0)), "75.00");
        assert_eq!(format_amount(Decimal::new(-305, 1)), "-30.50");
        assert_eq!(format_amount(Decimal::ZERO), "0.00");
    }

    #[test]
    fn test_sanitize_html() {
        assert_eq!(sanitize_html("a < b"), "a &lt; b");
        assert_eq!(
            sanitize_html("<script>alert(1)</script>"),
            "&lt;script&gt;alert(1)&lt;/script&gt;"
        );
        assert_eq!(sanitize_html("Fish & Chips"), "Fish &amp; Chips");
    }

    #[test]
    fn test_or_dash() {
        assert_eq!(or_dash(Some("INV-42")), "INV-42");
        assert_eq!(or_dash(Some("   ")), "-");
        assert_eq!(or_dash(None), "-");
    }
}
