//! Row numbering as the user sees it.
//!
//! The store addresses entries by zero-based position. Everything the user
//! types or reads uses one-based row numbers, so [`RowIndex`] is the only
//! place the two meet.

use crate::error::{DogShowError, Result};
use crate::model::DogEntry;
use std::collections::BTreeSet;
use std::ops::RangeInclusive;
use std::str::FromStr;

/// A one-based row number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RowIndex(usize);

impl RowIndex {
    pub fn from_position(position: usize) -> Self {
        RowIndex(position + 1)
    }

    pub fn position(self) -> usize {
        self.0 - 1
    }

    pub fn number(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for RowIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RowIndex {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().parse::<usize>() {
            Ok(0) => Err("Row numbers start at 1".to_string()),
            Ok(n) => Ok(RowIndex(n)),
            Err(_) => Err(format!("Invalid row format: {}", s)),
        }
    }
}

/// An entry paired with its row number, as listed to the user.
#[derive(Debug, Clone)]
pub struct DisplayEntry {
    pub index: RowIndex,
    pub entry: DogEntry,
    pub selected: bool,
}

pub fn index_entries(entries: &[DogEntry], selection: &BTreeSet<usize>) -> Vec<DisplayEntry> {
    entries
        .iter()
        .enumerate()
        .map(|(position, entry)| DisplayEntry {
            index: RowIndex::from_position(position),
            entry: entry.clone(),
            selected: selection.contains(&position),
        })
        .collect()
}

/// Parses a single row ("3") or an inclusive range ("3-5") into its bounds.
pub fn parse_row_or_range(s: &str) -> std::result::Result<RangeInclusive<RowIndex>, String> {
    if let Some(dash_pos) = s.find('-') {
        if dash_pos > 0 {
            let start = RowIndex::from_str(&s[..dash_pos])?;
            let end = RowIndex::from_str(&s[dash_pos + 1..])?;
            if start > end {
                return Err(format!(
                    "Invalid range: start ({}) must be <= end ({})",
                    start, end
                ));
            }
            return Ok(start..=end);
        }
    }
    RowIndex::from_str(s).map(|row| row..=row)
}

/// Parses every argument into zero-based positions, dropping duplicates.
///
/// Each range is checked against `len` before it is expanded, so a row past
/// the end fails with [`DogShowError::IndexOutOfRange`].
pub fn parse_rows<I: AsRef<str>>(inputs: &[I], len: usize) -> Result<BTreeSet<usize>> {
    let mut positions = BTreeSet::new();
    for input in inputs {
        let range = parse_row_or_range(input.as_ref()).map_err(DogShowError::InvalidRow)?;
        let (start, end) = range.into_inner();
        if end.number() > len {
            return Err(DogShowError::IndexOutOfRange {
                index: end.position(),
                len,
            });
        }
        positions.extend(start.position()..=end.position());
    }
    Ok(positions)
}
