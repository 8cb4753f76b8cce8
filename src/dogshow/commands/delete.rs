use crate::commands::{CmdMessage, CmdResult};
use crate::error::{DogShowError, Result};
use crate::store::RecordStore;
use log::{debug, info, warn};
use std::collections::BTreeSet;

pub fn run(store: &mut RecordStore, positions: &BTreeSet<usize>) -> Result<CmdResult> {
    if positions.is_empty() {
        warn!("Delete requested without a selection");
        return Err(DogShowError::InvalidSelection(
            "No rows selected for deletion.".to_string(),
        ));
    }

    debug!("Removing rows at positions {:?}", positions);
    let removed = store.remove_at(positions.iter().copied())?;
    info!("Removed {} entries", removed.len());

    let noun = if removed.len() == 1 { "entry" } else { "entries" };
    Ok(CmdResult::default()
        .with_message(CmdMessage::success(format!(
            "Deleted {} {}",
            removed.len(),
            noun
        )))
        .with_affected_entries(removed))
}
