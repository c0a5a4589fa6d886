//! Contact record model.
//!
//! # Responsibility
//! - Own one name, an ordered phone list, and an optional birthday.
//! - Provide the phone add/edit/remove/find operations.
//!
//! # Invariants
//! - `name` is immutable once the record is constructed.
//! - `phones` preserves insertion order; equal values may repeat.
//! - `birthday` holds at most one validated value; setting replaces it.

use crate::model::field::{Birthday, FieldResult, Name, Phone};
use crate::model::{DirectoryError, DirectoryResult};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// One person's stored name, phone numbers, and optional birthday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRecord {
    name: Name,
    phones: Vec<Phone>,
    birthday: Option<Birthday>,
}

impl ContactRecord {
    /// Creates a record with no phones and no birthday.
    ///
    /// # Errors
    /// Propagates [`FieldError::EmptyName`](crate::model::field::FieldError)
    /// from name validation.
    pub fn new(name: impl Into<String>) -> FieldResult<Self> {
        Ok(Self {
            name: Name::new(name)?,
            phones: Vec::new(),
            birthday: None,
        })
    }

    /// The record's identity within a directory.
    pub fn name(&self) -> &Name {
        &self.name
    }

    /// Phones in insertion order.
    pub fn phones(&self) -> &[Phone] {
        &self.phones
    }

    /// The stored birthday, if one was set.
    pub fn birthday(&self) -> Option<&Birthday> {
        self.birthday.as_ref()
    }

    /// Validates `value` and appends it to the phone list.
    ///
    /// Duplicate values are kept; the list is not deduplicated.
    ///
    /// # Errors
    /// Propagates the length check from [`Phone::new`]; an invalid value is
    /// never silently dropped.
    pub fn add_phone(&mut self, value: &str) -> FieldResult<()> {
        self.phones.push(Phone::new(value)?);
        Ok(())
    }

    /// Removes and returns the phone at `index`.
    ///
    /// # Errors
    /// Returns [`DirectoryError::PhoneIndexOutOfRange`] when `index` is not a
    /// valid position.
    pub fn remove_phone(&mut self, index: usize) -> DirectoryResult<Phone> {
        if index >= self.phones.len() {
            return Err(DirectoryError::PhoneIndexOutOfRange {
                index,
                len: self.phones.len(),
            });
        }
        Ok(self.phones.remove(index))
    }

    /// Replaces, in place, every phone equal to `old_value` with `new_value`.
    ///
    /// Finding no match is not an error; the list is left unchanged and the
    /// call still succeeds. `new_value` is validated up front either way, so
    /// the length invariant holds on every path.
    pub fn edit_phone(&mut self, old_value: &str, new_value: &str) -> FieldResult<()> {
        let replacement = Phone::new(new_value)?;
        for phone in &mut self.phones {
            if phone.as_str() == old_value {
                *phone = replacement.clone();
            }
        }
        Ok(())
    }

    /// First phone equal to `value`, or `None`.
    pub fn find_phone(&self, value: &str) -> Option<&Phone> {
        self.phones.iter().find(|phone| phone.as_str() == value)
    }

    /// Validates `value` and stores it as the birthday, replacing any prior
    /// one.
    ///
    /// # Errors
    /// Propagates the format check from [`Birthday::new`].
    pub fn set_birthday(&mut self, value: &str) -> FieldResult<()> {
        self.birthday = Some(Birthday::new(value)?);
        Ok(())
    }
}

impl Display for ContactRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let phones = self
            .phones
            .iter()
            .map(Phone::as_str)
            .collect::<Vec<_>>()
            .join("; ");
        write!(f, "Contact name: {}, phones: {}", self.name, phones)
    }
}
