use std::sync::LazyLock;

use regex::Regex;

use crate::domain::DateBucket;

static RELATIVE_TIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+)\s+(seconds|second|minutes|minute|hours|hour|days|day|months|month|years|year)\b")
        .expect("relative time pattern")
});

/// Pull the "<n> <unit>" phrase out of text like "Posted 6 months ago".
pub fn relative_phrase(text: &str) -> Option<&str> {
    RELATIVE_TIME.find(text).map(|m| m.as_str())
}

/// Bucket a relative-time string by how long ago it was.
///
/// Text without a recognizable "<n> <unit>" phrase lands in the newest bucket.
pub fn classify(text: &str) -> DateBucket {
    let Some(caps) = RELATIVE_TIME.captures(text) else {
        return DateBucket::LessThanTwoMonths;
    };
    let count: u64 = caps[1].parse().unwrap_or(0);

    match &caps[2] {
        "years" => DateBucket::LongerThanOneYear,
        "year" | "months" if count >= 5 => DateBucket::FiveMonthsToOneYear,
        "months" if count >= 3 => DateBucket::ThreeToFiveMonths,
        _ => DateBucket::LessThanTwoMonths,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_months() {
        assert_eq!(classify("6 months ago"), DateBucket::FiveMonthsToOneYear);
        assert_eq!(classify("5 months ago"), DateBucket::FiveMonthsToOneYear);
        assert_eq!(classify("4 months ago"), DateBucket::ThreeToFiveMonths);
        assert_eq!(classify("3 months ago"), DateBucket::ThreeToFiveMonths);
        assert_eq!(classify("2 months ago"), DateBucket::LessThanTwoMonths);
        assert_eq!(classify("1 month ago"), DateBucket::LessThanTwoMonths);
    }

    #[test]
    fn test_years() {
        assert_eq!(classify("2 years ago"), DateBucket::LongerThanOneYear);
        assert_eq!(classify("11 years ago"), DateBucket::LongerThanOneYear);
    }

    #[test]
    fn test_single_year_needs_five_units() {
        // The "year" unit shares the months threshold.
        assert_eq!(classify("1 year ago"), DateBucket::LessThanTwoMonths);
        assert_eq!(classify("5 year"), DateBucket::FiveMonthsToOneYear);
    }

    #[test]
    fn test_short_units_are_newest() {
        for text in ["12 seconds ago", "1 minute ago", "5 hours ago", "29 days ago"] {
            assert_eq!(classify(text), DateBucket::LessThanTwoMonths, "{}", text);
        }
    }

    #[test]
    fn test_unrecognized_text_is_newest() {
        assert_eq!(classify(""), DateBucket::LessThanTwoMonths);
        assert_eq!(classify("yesterday"), DateBucket::LessThanTwoMonths);
        assert_eq!(classify("03/14/2023"), DateBucket::LessThanTwoMonths);
    }

    #[test]
    fn test_relative_phrase() {
        assert_eq!(relative_phrase("Posted 6 months ago"), Some("6 months"));
        assert_eq!(relative_phrase("about 1 year ago"), Some("1 year"));
        assert_eq!(relative_phrase("recently"), None);
    }
}
