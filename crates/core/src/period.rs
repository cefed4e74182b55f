//! Period value objects - timelines and calendar weeks.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Timeline {
    from_date: NaiveDate,
    to_date: NaiveDate,
}

impl Timeline {
    /// Create a timeline. Fails when `from_date` is after `to_date`.
    pub fn new(from_date: NaiveDate, to_date: NaiveDate) -> Result<Self, ValidationError> {
        let timeline = Self { from_date, to_date };
        timeline.check()?;
        Ok(timeline)
    }

    /// Start of the range.
    pub fn from_date(&self) -> NaiveDate {
        self.from_date
    }

    /// End of the range, inclusive.
    pub fn to_date(&self) -> NaiveDate {
        self.to_date
    }

    /// Check the range ordering.
    pub fn check(&self) -> Result<(), ValidationError> {
        if self.from_date > self.to_date {
            return Err(ValidationError::new(format!(
                "Timeline start date ({}) is after its end date ({}).",
                self.from_date, self.to_date
            )));
        }
        Ok(())
    }
}

/// A Monday-to-Sunday calendar week.
///
/// Assigning either bound snaps both to the week containing the date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Week {
    start: NaiveDate,
    end: NaiveDate,
    week_number: u32,
}

impl Week {
    /// Create the week containing `date`.
    pub fn new(date: NaiveDate) -> Self {
        let start = date - Duration::days(i64::from(date.weekday().num_days_from_monday()));
        Self {
            start,
            end: start + Duration::days(6),
            week_number: start.iso_week().week(),
        }
    }

    /// Monday of the week.
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Sunday of the week.
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// ISO week number of the start date.
    pub fn week_number(&self) -> u32 {
        self.week_number
    }

    /// Move to the week containing `date`.
    pub fn set_start(&mut self, date: NaiveDate) {
        *self = Self::new(date);
    }

    /// Move to the week containing `date`.
    pub fn set_end(&mut self, date: NaiveDate) {
        *self = Self::new(date);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_timeline_rejects_reversed_range() {
        assert!(Timeline::new(date(2024, 2, 1), date(2024, 1, 1)).is_err());
        assert!(Timeline::new(date(2024, 1, 1), date(2024, 1, 1)).is_ok());
    }

    #[test]
    fn test_week_snaps_wednesday() {
        let week = Week::new(date(2024, 1, 17));
        assert_eq!(week.start(), date(2024, 1, 15));
        assert_eq!(week.end(), date(2024, 1, 21));
        assert_eq!(week.week_number(), 3);
    }

    #[test]
    fn test_week_snaps_sunday_back() {
        let week = Week::new(date(2024, 1, 21));
        assert_eq!(week.start(), date(2024, 1, 15));
    }

    #[test]
    fn test_week_setters_recompute_both_bounds() {
        let mut week = Week::new(date(2024, 1, 17));
        week.set_end(date(2024, 3, 6));
        assert_eq!(week.start(), date(2024, 3, 4));
        assert_eq!(week.end(), date(2024, 3, 10));
        assert_eq!(week.week_number(), 10);

        week.set_start(date(2023, 1, 1));
        assert_eq!(week.start(), date(2022, 12, 26));
        assert_eq!(week.week_number(), 52);
    }
}
