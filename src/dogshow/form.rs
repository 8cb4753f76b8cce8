//! The entry form behind Add and Edit.
//!
//! A form starts blank (add) or prefilled from an existing entry (edit). The
//! UI fills fields in any order; [`EntryForm::submit`] is the OK button and
//! only succeeds once every field holds text.

use crate::error::{DogShowError, Result};
use crate::model::{DogEntry, Field};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryForm {
    entry: DogEntry,
}

impl EntryForm {
    pub fn blank() -> Self {
        Self::default()
    }

    pub fn prefilled(entry: &DogEntry) -> Self {
        Self {
            entry: entry.clone(),
        }
    }

    pub fn set(&mut self, field: Field, value: &str) {
        self.entry.set(field, value);
    }

    pub fn with(mut self, field: Field, value: &str) -> Self {
        self.set(field, value);
        self
    }

    pub fn get(&self, field: Field) -> &str {
        self.entry.get(field)
    }

    /// Fields that still need a value, in column order. Whitespace alone does
    /// not count as a value.
    pub fn missing(&self) -> Vec<Field> {
        Field::ALL
            .into_iter()
            .filter(|&field| self.get(field).trim().is_empty())
            .collect()
    }

    pub fn submit(self) -> Result<DogEntry> {
        match self.missing().first() {
            Some(&field) => Err(DogShowError::EmptyField(field)),
            None => Ok(self.entry),
        }
    }
}
