//! Shared formatting helpers for terminal output

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

const FALLBACK_DATE_FORMAT: &str = "%Y-%m-%d";

/// Format a date with a user-configured strftime pattern
///
/// An invalid pattern falls back to ISO dates instead of failing mid-print.
pub fn format_date(date: &DateTime<Utc>, pattern: &str) -> String {
    let valid = !StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error));
    let pattern = if valid { pattern } else { FALLBACK_DATE_FORMAT };
    date.format(pattern).to_string()
}

/// Create a simple bar for a fraction in `[0, 1]`
pub fn format_bar(fraction: Decimal, width: usize) -> String {
    if fraction <= Decimal::ZERO {
        return "░".repeat(width);
    }

    let filled = (fraction * Decimal::from(width))
        .round()
        .to_usize()
        .unwrap_or(width)
        .min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Format a separator line
pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

/// Truncate a string to a maximum number of characters with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        "...".chars().take(max_len).collect()
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}

/// Display width of a column, at least `min`
pub fn column_width<'a>(values: impl Iterator<Item = &'a str>, min: usize) -> usize {
    values.map(|v| v.chars().count()).max().unwrap_or(min).max(min)
}

/// Left-align text in a field of given width (counting characters)
pub fn left_align(s: &str, width: usize) -> String {
    let len = s.chars().count();
    if len >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - len))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_bar() {
        let bar = format_bar(dec!(0.5), 10);
        assert_eq!(bar.chars().filter(|c| *c == '█').count(), 5);
        assert_eq!(format_bar(dec!(0), 4), "░░░░");
        assert_eq!(format_bar(dec!(1), 4), "████");
    }

    #[test]
    fn test_format_date() {
        use chrono::TimeZone;
        let date = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        assert_eq!(format_date(&date, "%d/%m/%Y"), "01/06/2024");
        assert_eq!(format_date(&date, "%Q"), "2024-06-01");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Hello World", 5), "He...");
        assert_eq!(truncate("Hi", 5), "Hi");
        assert_eq!(truncate("Hôtel weekend", 8), "Hôtel...");
    }

    #[test]
    fn test_left_align_counts_chars() {
        assert_eq!(left_align("é", 3), "é  ");
        assert_eq!(left_align("abcd", 2), "abcd");
    }
}
