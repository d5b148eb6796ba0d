//! Date-only due dates that render as the same calendar day everywhere.

use super::TaskDomainError;
use chrono::{Local, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};
use std::fmt;

const STORAGE_FORMAT: &str = "%Y-%m-%d";
const DISPLAY_FORMAT: &str = "%d/%m/%Y";

/// Calendar day a task is due, without a time component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DueDate(NaiveDate);

impl DueDate {
    /// Parses a strict `YYYY-MM-DD` value.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidDueDate`] for any other shape or an
    /// impossible calendar day.
    pub fn parse(value: &str) -> Result<Self, TaskDomainError> {
        let trimmed = value.trim();
        if trimmed.len() != 10 {
            return Err(TaskDomainError::InvalidDueDate(value.to_owned()));
        }
        NaiveDate::parse_from_str(trimmed, STORAGE_FORMAT)
            .map(Self)
            .map_err(|_| TaskDomainError::InvalidDueDate(value.to_owned()))
    }

    /// Parses a persisted value that may carry a time component.
    ///
    /// Timestamps such as `2024-03-15T00:00:00+00:00` keep only their date
    /// part; no timezone conversion is applied.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidDueDate`] when the date part is not a
    /// valid `YYYY-MM-DD` value.
    pub fn from_persisted(value: &str) -> Result<Self, TaskDomainError> {
        let date_part = value.trim().split('T').next().unwrap_or_default();
        Self::parse(date_part).map_err(|_| TaskDomainError::InvalidDueDate(value.to_owned()))
    }

    /// Wraps an existing calendar day.
    #[must_use]
    pub const fn from_date(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Returns the calendar day.
    #[must_use]
    pub const fn date(self) -> NaiveDate {
        self.0
    }

    /// Formats the day as `DD/MM/YYYY` as seen from `zone`.
    ///
    /// The day is anchored to local midday before conversion, so the result
    /// is the stored calendar day for every offset.
    #[must_use]
    pub fn display_in<Tz: TimeZone>(self, zone: &Tz) -> String {
        let anchored = self
            .0
            .and_hms_opt(12, 0, 0)
            .and_then(|midday| zone.from_local_datetime(&midday).earliest())
            .map_or(self.0, |local| local.date_naive());
        anchored.format(DISPLAY_FORMAT).to_string()
    }

    /// Formats the day for the viewer's local timezone.
    #[must_use]
    pub fn display_local(self) -> String {
        self.display_in(&Local)
    }
}

impl fmt::Display for DueDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(STORAGE_FORMAT))
    }
}

impl TryFrom<String> for DueDate {
    type Error = TaskDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_persisted(&value)
    }
}

impl From<DueDate> for String {
    fn from(value: DueDate) -> Self {
        value.to_string()
    }
}
