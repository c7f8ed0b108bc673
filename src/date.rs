//! Date normalization for post dates.

use crate::constants::REGEXPS;

/// Reduce a rendered date to `"<Month> <Year>"`.
///
/// Empty input gives empty output. Text with no `word year` pattern comes
/// back trimmed but otherwise untouched.
///
/// ```rust
/// use albumscout::normalize_date;
///
/// assert_eq!(normalize_date("April 14, 2025"), "April 2025");
/// assert_eq!(normalize_date(" September 2025 "), "September 2025");
/// assert_eq!(normalize_date("3 days ago"), "3 days ago");
/// assert_eq!(normalize_date(""), "");
/// ```
pub fn normalize_date(raw_date: &str) -> String {
    let trimmed = raw_date.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    match REGEXPS.month_year.captures(trimmed) {
        Some(caps) => format!("{} {}", &caps[1], &caps[2]),
        None => trimmed.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_day_year() {
        assert_eq!(normalize_date("April 14, 2025"), "April 2025");
        assert_eq!(normalize_date("March 3rd, 2024"), "March 2024");
    }

    #[test]
    fn test_month_year() {
        assert_eq!(normalize_date("September 2025"), "September 2025");
    }

    #[test]
    fn test_leading_day_is_dropped() {
        assert_eq!(normalize_date("14 April 2025"), "April 2025");
        assert_eq!(normalize_date("Posted on 2 June 2023 by admin"), "June 2023");
    }

    #[test]
    fn test_non_ascii_month_kept_whole() {
        assert_eq!(normalize_date("März 2024"), "März 2024");
        assert_eq!(normalize_date("14 février 2023"), "février 2023");
    }

    #[test]
    fn test_passthrough() {
        assert_eq!(normalize_date("  2025-04-14  "), "2025-04-14");
        assert_eq!(normalize_date("yesterday"), "yesterday");
    }

    #[test]
    fn test_empty() {
        assert_eq!(normalize_date(""), "");
        assert_eq!(normalize_date("   "), "");
    }
}
