//! Directory of contact records and the upcoming-birthday scan.
//!
//! # Responsibility
//! - Own the name-to-record mapping and its add/find/delete operations.
//! - Derive congratulation dates for birthdays inside the greeting window.
//!
//! # Invariants
//! - Each entry's key equals its record's name; re-adding a name replaces the
//!   prior record.
//! - Iteration order is name order (`BTreeMap`), so `records()` and the scan
//!   output are deterministic.

use crate::model::field::Birthday;
use crate::model::record::ContactRecord;
use crate::model::{DirectoryError, DirectoryResult};
use chrono::{Datelike, Duration, Local, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Days ahead of today (inclusive) a birthday qualifies for a greeting.
const GREETING_WINDOW_DAYS: i64 = 7;

const GREETING_DATE_FORMAT: &str = "%Y.%m.%d";

/// One upcoming-birthday scan result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BirthdayGreeting {
    /// Contact name the greeting is for.
    pub name: String,
    /// Weekend-adjusted greeting date in `YYYY.MM.DD` form.
    pub congratulation_date: String,
}

/// In-memory collection of contact records keyed by name.
///
/// Single-actor structure: mutations are sequential and unguarded. A
/// concurrent host must wrap it in its own mutual exclusion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<String, ContactRecord>",
    into = "BTreeMap<String, ContactRecord>"
)]
pub struct Directory {
    records: BTreeMap<String, ContactRecord>,
}

impl Directory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `record` under its own name, returning any replaced record.
    pub fn add_record(&mut self, record: ContactRecord) -> Option<ContactRecord> {
        self.records
            .insert(record.name().as_str().to_string(), record)
    }

    /// The record stored under `name`, or `None`.
    pub fn find(&self, name: &str) -> Option<&ContactRecord> {
        self.records.get(name)
    }

    /// Mutable access to the record stored under `name`.
    ///
    /// Record names are immutable, so mutation cannot desynchronize the entry
    /// from its key.
    pub fn find_mut(&mut self, name: &str) -> Option<&mut ContactRecord> {
        self.records.get_mut(name)
    }

    /// Removes and returns the record stored under `name`.
    ///
    /// # Errors
    /// Returns [`DirectoryError::NameNotFound`] when no such record exists.
    pub fn delete(&mut self, name: &str) -> DirectoryResult<ContactRecord> {
        self.records
            .remove(name)
            .ok_or_else(|| DirectoryError::NameNotFound(name.to_string()))
    }

    /// Records in name order.
    pub fn records(&self) -> impl Iterator<Item = &ContactRecord> {
        self.records.values()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the directory holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Upcoming-birthday scan relative to the current local date.
    ///
    /// See [`Directory::upcoming_birthdays_on`] for the algorithm.
    pub fn upcoming_birthdays(&self) -> Vec<BirthdayGreeting> {
        self.upcoming_birthdays_on(Local::now().date_naive())
    }

    /// Upcoming-birthday scan relative to `today`.
    ///
    /// For every record with a birthday, the occurrence in today's year is
    /// computed (birth year is ignored; Feb 29 rolls forward to March 1 in
    /// non-leap years) and qualifies when it is at most 7 days after `today`.
    /// An occurrence already behind `today` also qualifies: the delta check
    /// is `days <= 7` with no lower bound, so birthdays earlier in the year
    /// re-trigger on every scan until year end. That is long-shipped behavior
    /// and is kept; see DESIGN.md before changing it.
    ///
    /// Qualifying occurrences on a Saturday or Sunday shift the greeting to
    /// the following Monday. Results come back in name order, and repeated
    /// scans without intervening mutation return identical output.
    pub fn upcoming_birthdays_on(&self, today: NaiveDate) -> Vec<BirthdayGreeting> {
        let mut greetings = Vec::new();

        for record in self.records.values() {
            let Some(birthday) = record.birthday() else {
                continue;
            };

            let occurrence = occurrence_in_year(birthday, today.year());
            let days = (occurrence - today).num_days();
            if days <= GREETING_WINDOW_DAYS {
                let date = congratulation_date(occurrence);
                greetings.push(BirthdayGreeting {
                    name: record.name().as_str().to_string(),
                    congratulation_date: date.format(GREETING_DATE_FORMAT).to_string(),
                });
            }
        }

        greetings
    }
}

impl TryFrom<BTreeMap<String, ContactRecord>> for Directory {
    type Error = String;

    fn try_from(records: BTreeMap<String, ContactRecord>) -> Result<Self, Self::Error> {
        for (key, record) in &records {
            if key != record.name().as_str() {
                return Err(format!(
                    "directory key `{key}` does not match record name `{}`",
                    record.name()
                ));
            }
        }
        Ok(Self { records })
    }
}

impl From<Directory> for BTreeMap<String, ContactRecord> {
    fn from(value: Directory) -> Self {
        value.records
    }
}

/// This year's occurrence of a stored birthday.
fn occurrence_in_year(birthday: &Birthday, year: i32) -> NaiveDate {
    let (month, day) = birthday.month_day();
    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(date) => date,
        // Only Feb 29 can be missing from a year; roll forward to March 1.
        None => NaiveDate::from_ymd_opt(year, 3, 1).expect("March 1 exists in every year"),
    }
}

/// Weekend occurrences move to the following Monday; weekdays stay put.
fn congratulation_date(occurrence: NaiveDate) -> NaiveDate {
    match occurrence.weekday() {
        Weekday::Sat => occurrence + Duration::days(2),
        Weekday::Sun => occurrence + Duration::days(1),
        _ => occurrence,
    }
}

#[cfg(test)]
mod tests {
    use super::{congratulation_date, occurrence_in_year};
    use crate::model::field::Birthday;
    use chrono::NaiveDate;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn saturday_occurrence_shifts_two_days() {
        assert_eq!(congratulation_date(date(2024, 3, 2)), date(2024, 3, 4));
    }

    #[test]
    fn sunday_occurrence_shifts_one_day() {
        assert_eq!(congratulation_date(date(2024, 3, 3)), date(2024, 3, 4));
    }

    #[test]
    fn weekday_occurrence_is_unshifted() {
        assert_eq!(congratulation_date(date(2024, 2, 28)), date(2024, 2, 28));
    }

    #[test]
    fn occurrence_ignores_birth_year() {
        let birthday = Birthday::new("28.02.1996").unwrap();
        assert_eq!(occurrence_in_year(&birthday, 2024), date(2024, 2, 28));
    }

    #[test]
    fn feb_29_rolls_to_march_1_in_non_leap_years() {
        let birthday = Birthday::new("29.02.1996").unwrap();
        assert_eq!(occurrence_in_year(&birthday, 2025), date(2025, 3, 1));
        assert_eq!(occurrence_in_year(&birthday, 2024), date(2024, 2, 29));
    }
}
