use crate::commands::{CmdMessage, CmdResult};
use crate::error::{DogShowError, Result};
use crate::store::RecordStore;
use std::collections::BTreeSet;

/// Checks `positions` against the store and hands them back as the new selection.
///
/// An empty set clears the selection.
pub fn run(store: &RecordStore, positions: &BTreeSet<usize>) -> Result<CmdResult> {
    let len = store.row_count();
    if let Some(&index) = positions.iter().find(|&&p| p >= len) {
        return Err(DogShowError::IndexOutOfRange { index, len });
    }

    let message = match positions.len() {
        0 => CmdMessage::info("Selection cleared."),
        1 => CmdMessage::info("1 row selected"),
        n => CmdMessage::info(format!("{} rows selected", n)),
    };
    Ok(CmdResult::default()
        .with_selected_rows(positions.iter().copied().collect())
        .with_message(message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::fixtures::store_with;

    #[test]
    fn selects_existing_rows() {
        let store = store_with(&["A", "B", "C"]);
        let result = run(&store, &BTreeSet::from([0, 2])).unwrap();
        assert_eq!(result.selected_rows, vec![0, 2]);
        assert_eq!(result.messages[0].content, "2 rows selected");
    }

    #[test]
    fn empty_clears() {
        let store = store_with(&["A"]);
        let result = run(&store, &BTreeSet::new()).unwrap();
        assert!(result.selected_rows.is_empty());
        assert_eq!(result.messages[0].content, "Selection cleared.");
    }

    #[test]
    fn rows_past_the_end_are_rejected() {
        let store = store_with(&["A"]);
        assert!(matches!(
            run(&store, &BTreeSet::from([0, 3])),
            Err(DogShowError::IndexOutOfRange { index: 3, len: 1 })
        ));
    }
}
