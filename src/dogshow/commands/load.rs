use crate::commands::{display_name, CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::{xml, RecordStore};
use log::info;
use std::path::Path;

/// Replaces the store with the file's entries.
///
/// The file is decoded completely before the store is touched, so a parse
/// failure leaves the current rows in place.
pub fn run(store: &mut RecordStore, path: &Path) -> Result<CmdResult> {
    let entries = xml::read_file(path)?;
    let count = entries.len();
    store.replace_all(entries);
    info!("Loaded {} entries from {}", count, path.display());

    Ok(CmdResult::default().with_message(CmdMessage::success(format!(
        "Loaded {} entries from {}",
        count,
        display_name(path)
    ))))
}
