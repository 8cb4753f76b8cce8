use crate::commands::{display_name, CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::{xml, RecordStore};
use log::info;
use std::path::Path;

pub fn run(store: &RecordStore, path: &Path) -> Result<CmdResult> {
    xml::write_file(path, store.all())?;
    info!("Saved {} entries to {}", store.row_count(), path.display());

    Ok(CmdResult::default()
        .with_message(CmdMessage::success(format!(
            "Data saved to {}",
            display_name(path)
        )))
        .with_written_path(path.to_path_buf()))
}
