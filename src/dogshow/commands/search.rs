use crate::commands::{CmdMessage, CmdResult};
use crate::error::{DogShowError, Result};
use crate::model::{DogEntry, Field};
use crate::store::RecordStore;
use log::{info, warn};

/// Positions of entries whose `field` contains `query`, ignoring case.
///
/// Plain substring containment in store order; no ranking.
pub fn matching_rows(entries: &[DogEntry], field: Field, query: &str) -> Vec<usize> {
    let query_lower = query.to_lowercase();
    entries
        .iter()
        .enumerate()
        .filter(|(_, entry)| entry.get(field).to_lowercase().contains(&query_lower))
        .map(|(position, _)| position)
        .collect()
}

pub fn run(store: &RecordStore, field: Field, query: &str) -> Result<CmdResult> {
    let query = query.trim();
    if query.is_empty() {
        warn!("Search attempted with empty text");
        return Err(DogShowError::EmptyQuery);
    }

    let rows = matching_rows(store.all(), field, query);
    info!("Search for '{}' in {} matched {} rows", query, field, rows.len());

    let message = match rows.len() {
        0 => CmdMessage::info("No matches found."),
        1 => CmdMessage::success(format!("1 match for '{}' in {}", query, field)),
        n => CmdMessage::success(format!("{} matches for '{}' in {}", n, query, field)),
    };
    Ok(CmdResult::default()
        .with_selected_rows(rows)
        .with_message(message))
}
