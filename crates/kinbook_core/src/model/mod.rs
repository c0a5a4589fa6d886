//! Contact directory domain model.
//!
//! # Responsibility
//! - Define the validated field values, the contact record, and the directory
//!   that owns the records.
//! - Host the birthday scan that derives upcoming congratulation dates.
//!
//! # Invariants
//! - Every stored field value satisfied its format check at construction.
//! - A directory never holds two records under the same name.
//! - Records are owned exclusively by their directory entry.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod directory;
pub mod field;
pub mod record;

use field::FieldError;

/// Result type for record and directory operations.
pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// Failure taxonomy for record and directory operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    /// A field value failed validation.
    Field(FieldError),
    /// Lookup or delete targeted a name the directory does not hold.
    NameNotFound(String),
    /// Phone position outside the record's phone list.
    PhoneIndexOutOfRange { index: usize, len: usize },
}

impl Display for DirectoryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Field(err) => write!(f, "{err}"),
            Self::NameNotFound(name) => write!(f, "no record named `{name}`"),
            Self::PhoneIndexOutOfRange { index, len } => {
                write!(f, "phone position {index} out of range for {len} phones")
            }
        }
    }
}

impl Error for DirectoryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Field(err) => Some(err),
            Self::NameNotFound(_) => None,
            Self::PhoneIndexOutOfRange { .. } => None,
        }
    }
}

impl From<FieldError> for DirectoryError {
    fn from(value: FieldError) -> Self {
        Self::Field(value)
    }
}
