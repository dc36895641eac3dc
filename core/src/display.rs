//! Derived display values for a `Trip`.
//!
//! All helpers are pure. Date parsing uses the `YYYY-MM-DD` calendar format;
//! when either date fails to parse, `date_range` returns the two raw strings
//! joined by `" - "` rather than an error.

use chrono::NaiveDate;

use crate::types::{Trip, DEFAULT_STATUS};

const WIRE_DATE: &str = "%Y-%m-%d";

impl Trip {
    /// `"$"` followed by the budget with two decimal places.
    pub fn formatted_budget(&self) -> String {
        format!("${:.2}", self.budget)
    }

    pub fn travelers_text(&self) -> String {
        if self.travelers == 1 {
            "1 Traveler".to_string()
        } else {
            format!("{} Travelers", self.travelers)
        }
    }

    /// `"Jan 05 - Feb 10, 2026"`; the year shown is the end date's.
    pub fn date_range(&self) -> String {
        let start = NaiveDate::parse_from_str(&self.start_date, WIRE_DATE);
        let end = NaiveDate::parse_from_str(&self.end_date, WIRE_DATE);
        match (start, end) {
            (Ok(start), Ok(end)) => format!(
                "{} - {}",
                start.format("%b %d"),
                end.format("%b %d, %Y")
            ),
            _ => format!("{} - {}", self.start_date, self.end_date),
        }
    }

    /// Upper-cased status for badges, `PLANNED` when the server sent none.
    pub fn status_label(&self) -> String {
        self.status
            .as_deref()
            .unwrap_or(DEFAULT_STATUS)
            .to_uppercase()
    }
}
