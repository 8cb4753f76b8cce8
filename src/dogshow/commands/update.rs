use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::index::RowIndex;
use crate::model::DogEntry;
use crate::store::RecordStore;
use log::debug;

pub fn run(store: &mut RecordStore, position: usize, entry: DogEntry) -> Result<CmdResult> {
    store.update(position, entry.clone())?;
    debug!("Updated row {}: {}", RowIndex::from_position(position), entry);

    Ok(CmdResult::default()
        .with_message(CmdMessage::success(format!(
            "Entry updated ({}): {}",
            RowIndex::from_position(position),
            entry.name
        )))
        .with_affected_entries(vec![entry]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DogShowError;
    use crate::store::fixtures::{entry, names, store_with};

    #[test]
    fn replaces_the_given_row() {
        let mut store = store_with(&["Rex", "Fido"]);
        let result = run(&mut store, 0, entry("Max", "Beagle")).unwrap();
        assert_eq!(names(&store), ["Max", "Fido"]);
        assert!(result.messages[0].content.contains("(1): Max"));
    }

    #[test]
    fn out_of_range_leaves_store_untouched() {
        let mut store = store_with(&["Rex"]);
        let err = run(&mut store, 3, entry("Max", "Beagle")).unwrap_err();
        assert!(matches!(err, DogShowError::IndexOutOfRange { index: 3, .. }));
        assert_eq!(names(&store), ["Rex"]);
    }
}
