// Purchase day classification
//
// Maps an ISO-8601 purchase timestamp to the weekday of its written civil date.
// The offset carried by the timestamp is never used to shift the date.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Weekday};

use crate::rules::error::{RulesError, RulesResult};

/// Display labels indexed by `Weekday::num_days_from_monday`
const WEEKDAY_LABELS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Weekday of a purchase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayClassification {
    pub weekday: Weekday,
}

impl DayClassification {
    pub fn new(weekday: Weekday) -> Self {
        Self { weekday }
    }

    /// Monday = 0 .. Sunday = 6
    pub fn index(&self) -> u32 {
        self.weekday.num_days_from_monday()
    }

    pub fn label(&self) -> &'static str {
        WEEKDAY_LABELS[self.index() as usize]
    }
}

/// Classifies purchase timestamps by weekday
pub struct DayClassifier;

impl DayClassifier {
    /// Classify a timestamp string
    ///
    /// Accepted forms, tried in order:
    /// - RFC 3339 with `Z` or `±HH:MM` offset
    /// - date-time with a `±HHMM` offset
    /// - naive date-time (`T` or space separated)
    /// - bare calendar date
    ///
    /// # Errors
    /// `RulesError::MalformedTimestamp` when none of the forms match.
    pub fn classify(timestamp: &str) -> RulesResult<DayClassification> {
        let date = Self::civil_date(timestamp.trim()).ok_or_else(|| {
            tracing::debug!("Unparseable purchase timestamp: {}", timestamp);
            RulesError::MalformedTimestamp(timestamp.to_string())
        })?;

        Ok(DayClassification::new(date.weekday()))
    }

    fn civil_date(timestamp: &str) -> Option<NaiveDate> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(timestamp) {
            return Some(dt.date_naive());
        }
        if let Ok(dt) = DateTime::parse_from_str(timestamp, "%Y-%m-%dT%H:%M:%S%.f%z") {
            return Some(dt.date_naive());
        }
        for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
            if let Ok(dt) = NaiveDateTime::parse_from_str(timestamp, format) {
                return Some(dt.date());
            }
        }
        NaiveDate::parse_from_str(timestamp, "%Y-%m-%d").ok()
    }
}
