use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::document::{EducationEntry, ExperienceEntry};

/// End marker shown for ongoing positions.
pub const PRESENT: &str = "Present";

/// Display strings for an entry's period. At least one side is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<String>,
    pub end: Option<String>,
}

impl DateRange {
    fn from_parts(start: Option<String>, end: Option<String>) -> Option<Self> {
        if start.is_none() && end.is_none() {
            None
        } else {
            Some(DateRange { start, end })
        }
    }

    /// `Jan 2022 – Present`, or whichever side is present.
    pub fn display(&self) -> String {
        match (&self.start, &self.end) {
            (Some(start), Some(end)) => format!("{start} – {end}"),
            (Some(only), None) | (None, Some(only)) => only.clone(),
            (None, None) => String::new(),
        }
    }
}

/// `2022-01` → `Jan 2022`. Unparseable input is shown as typed; empty stays empty.
pub fn format_month(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    NaiveDate::parse_from_str(&format!("{trimmed}-01"), "%Y-%m-%d")
        .map(|date| date.format("%b %Y").to_string())
        .unwrap_or_else(|_| trimmed.to_string())
}

fn formatted(value: &str) -> Option<String> {
    Some(format_month(value)).filter(|s| !s.is_empty())
}

/// A started period with no end date is still running.
fn open_ended(start: Option<String>, end: Option<String>) -> Option<DateRange> {
    let end = match (&start, end) {
        (_, Some(end)) => Some(end),
        (Some(_), None) => Some(PRESENT.to_string()),
        (None, None) => None,
    };
    DateRange::from_parts(start, end)
}

/// `currently_working` always ends the range with "Present", whatever `end_date` holds.
pub fn experience_range(entry: &ExperienceEntry) -> Option<DateRange> {
    let end = if entry.currently_working {
        Some(PRESENT.to_string())
    } else {
        formatted(&entry.end_date)
    };
    open_ended(formatted(&entry.start_date), end)
}

pub fn education_range(entry: &EducationEntry) -> Option<DateRange> {
    open_ended(formatted(&entry.start_date), formatted(&entry.end_date))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_month() {
        assert_eq!(format_month("2022-01"), "Jan 2022");
        assert_eq!(format_month("2017-09"), "Sep 2017");
        assert_eq!(format_month(""), "");
        assert_eq!(format_month("sometime"), "sometime");
    }

    #[test]
    fn test_current_position_ends_with_present_regardless_of_end_date() {
        let entry = ExperienceEntry {
            start_date: "2022-01".to_string(),
            end_date: "2023-05".to_string(),
            currently_working: true,
            ..Default::default()
        };
        let range = experience_range(&entry).unwrap();
        assert_eq!(range.start.as_deref(), Some("Jan 2022"));
        assert_eq!(range.end.as_deref(), Some(PRESENT));
        assert_eq!(range.display(), "Jan 2022 – Present");
    }

    #[test]
    fn test_current_position_without_start_still_shows_present() {
        let entry = ExperienceEntry {
            currently_working: true,
            ..Default::default()
        };
        assert_eq!(experience_range(&entry).unwrap().display(), PRESENT);
    }

    #[test]
    fn test_past_position_uses_end_date() {
        let entry = ExperienceEntry {
            start_date: "2020-03".to_string(),
            end_date: "2021-12".to_string(),
            ..Default::default()
        };
        assert_eq!(experience_range(&entry).unwrap().display(), "Mar 2020 – Dec 2021");
    }

    #[test]
    fn test_no_dates_means_no_range() {
        assert!(experience_range(&ExperienceEntry::default()).is_none());
        assert!(education_range(&EducationEntry::default()).is_none());
    }

    #[test]
    fn test_missing_end_date_runs_to_present() {
        let exp = ExperienceEntry {
            start_date: "2020-03".to_string(),
            ..Default::default()
        };
        assert_eq!(experience_range(&exp).unwrap().display(), "Mar 2020 – Present");

        let edu = EducationEntry {
            start_date: "2017-09".to_string(),
            ..Default::default()
        };
        let range = education_range(&edu).unwrap();
        assert_eq!(range.end.as_deref(), Some(PRESENT));
        assert_eq!(range.display(), "Sep 2017 – Present");
    }

    #[test]
    fn test_end_only_stays_end_only() {
        let edu = EducationEntry {
            end_date: "2021-06".to_string(),
            ..Default::default()
        };
        assert_eq!(education_range(&edu).unwrap().display(), "Jun 2021");
    }
}
