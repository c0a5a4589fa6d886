//! Validated field values for contact records.
//!
//! # Responsibility
//! - Define the scalar value types (`Name`, `Phone`, `Birthday`) used by
//!   record and directory logic.
//! - Enforce each format invariant exactly once, at construction.
//!
//! # Invariants
//! - A constructed `Name` is never empty.
//! - A constructed `Phone` is always exactly [`PHONE_LEN`] characters.
//! - A constructed `Birthday` always parses as `DD.MM.YYYY`.
//! - Deserialization goes through the same validation as construction.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Required phone value length, counted in characters.
pub const PHONE_LEN: usize = 10;

const BIRTHDAY_FORMAT: &str = "%d.%m.%Y";

/// Result type for field value construction.
pub type FieldResult<T> = Result<T, FieldError>;

/// Validation failure for a single field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// Name value was empty.
    EmptyName,
    /// Phone value was not exactly [`PHONE_LEN`] characters.
    PhoneLength { actual: usize },
    /// Birthday value did not parse as `DD.MM.YYYY`.
    BirthdayFormat { value: String },
}

impl Display for FieldError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "name cannot be empty"),
            Self::PhoneLength { actual } => write!(
                f,
                "phone number must be exactly {PHONE_LEN} characters, got {actual}"
            ),
            Self::BirthdayFormat { value } => {
                write!(f, "invalid birthday `{value}`; expected DD.MM.YYYY")
            }
        }
    }
}

impl Error for FieldError {}

/// Non-empty contact name; the identity key of a record within a directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Name(String);

impl Name {
    /// Validates and wraps a contact name.
    ///
    /// # Errors
    /// Returns [`FieldError::EmptyName`] for an empty string. Whitespace-only
    /// names are accepted; the only rejected shape is the empty one.
    pub fn new(value: impl Into<String>) -> FieldResult<Self> {
        let value = value.into();
        if value.is_empty() {
            return Err(FieldError::EmptyName);
        }
        Ok(Self(value))
    }

    /// Stored name value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Name {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Name {
    type Error = FieldError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Name> for String {
    fn from(value: Name) -> Self {
        value.0
    }
}

/// Phone value, validated for length only.
///
/// The check is deliberately loose: any [`PHONE_LEN`]-character string is
/// accepted, digits are not required. Tightening this would reject values the
/// directory historically stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Phone(String);

impl Phone {
    /// Validates and wraps a phone value.
    ///
    /// # Errors
    /// Returns [`FieldError::PhoneLength`] when the value is not exactly
    /// [`PHONE_LEN`] characters long.
    pub fn new(value: impl Into<String>) -> FieldResult<Self> {
        let value = value.into();
        let actual = value.chars().count();
        if actual != PHONE_LEN {
            return Err(FieldError::PhoneLength { actual });
        }
        Ok(Self(value))
    }

    /// Stored phone value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Phone {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Phone {
    type Error = FieldError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Phone> for String {
    fn from(value: Phone) -> Self {
        value.0
    }
}

/// Birthday in `DD.MM.YYYY` form.
///
/// Stores the original string; the parsed date is recomputed on demand rather
/// than cached, so the stored value is the single source of truth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Birthday(String);

impl Birthday {
    /// Validates and wraps a birthday value.
    ///
    /// # Errors
    /// Returns [`FieldError::BirthdayFormat`] when the value does not parse
    /// as a real calendar date in `DD.MM.YYYY` form.
    pub fn new(value: impl Into<String>) -> FieldResult<Self> {
        let value = value.into();
        if NaiveDate::parse_from_str(&value, BIRTHDAY_FORMAT).is_err() {
            return Err(FieldError::BirthdayFormat { value });
        }
        Ok(Self(value))
    }

    /// Stored birthday value in `DD.MM.YYYY` form.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Month and day of the stored date, reparsed on demand.
    pub fn month_day(&self) -> (u32, u32) {
        let date = self.parse();
        (date.month(), date.day())
    }

    fn parse(&self) -> NaiveDate {
        NaiveDate::parse_from_str(&self.0, BIRTHDAY_FORMAT)
            .expect("stored birthday was validated at construction")
    }
}

impl Display for Birthday {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Birthday {
    type Error = FieldError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Birthday> for String {
    fn from(value: Birthday) -> Self {
        value.0
    }
}
