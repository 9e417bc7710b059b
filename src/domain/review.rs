use serde::{Deserialize, Serialize};

use super::DetailAggregates;

/// Coarse age of a review, derived from its relative-time text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DateBucket {
    LessThanTwoMonths,
    ThreeToFiveMonths,
    FiveMonthsToOneYear,
    LongerThanOneYear,
}

impl DateBucket {
    pub fn label(&self) -> &'static str {
        match self {
            DateBucket::LessThanTwoMonths => "Less than 2 months",
            DateBucket::ThreeToFiveMonths => "3 months to 5 months ago",
            DateBucket::FiveMonthsToOneYear => "5 months to 1 year ago",
            DateBucket::LongerThanOneYear => "Longer than 1 year",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        [
            DateBucket::LessThanTwoMonths,
            DateBucket::ThreeToFiveMonths,
            DateBucket::FiveMonthsToOneYear,
            DateBucket::LongerThanOneYear,
        ]
        .into_iter()
        .find(|b| b.label() == label)
    }
}

impl std::fmt::Display for DateBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewRecord {
    pub rating: Option<f64>,
    /// Relative-time phrase as shown on the page, e.g. "6 months".
    pub date_text: String,
    pub date_bucket: DateBucket,
    pub head: String,
    pub body: String,
    /// Sub-attribute scores; older reviews have none.
    pub flavor: Option<f64>,
    pub sweetness: Option<f64>,
    pub lasting: Option<f64>,
}

/// Everything read from one product detail page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewPage {
    pub aggregates: DetailAggregates,
    pub reviews: Vec<ReviewRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_round_trip() {
        for bucket in [
            DateBucket::LessThanTwoMonths,
            DateBucket::ThreeToFiveMonths,
            DateBucket::FiveMonthsToOneYear,
            DateBucket::LongerThanOneYear,
        ] {
            assert_eq!(DateBucket::from_label(bucket.label()), Some(bucket));
        }
        assert_eq!(DateBucket::from_label("yesterday"), None);
    }

    #[test]
    fn test_display_uses_label() {
        assert_eq!(
            DateBucket::FiveMonthsToOneYear.to_string(),
            "5 months to 1 year ago"
        );
    }
}
