use crate::commands::{CmdMessage, CmdResult};
use crate::index::index_entries;
use crate::store::RecordStore;
use std::collections::BTreeSet;

pub fn run(store: &RecordStore, selection: &BTreeSet<usize>) -> CmdResult {
    let listed = index_entries(store.all(), selection);
    let mut result = CmdResult::default();
    if listed.is_empty() {
        result.add_message(CmdMessage::info("No entries yet."));
    }
    result.with_listed_entries(listed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::fixtures::store_with;

    #[test]
    fn lists_in_store_order_with_selection() {
        let store = store_with(&["A", "B"]);
        let result = run(&store, &BTreeSet::from([1]));
        assert_eq!(result.listed_entries.len(), 2);
        assert_eq!(result.listed_entries[0].entry.name, "A");
        assert!(result.listed_entries[1].selected);
        assert!(result.messages.is_empty());
    }

    #[test]
    fn empty_store_says_so() {
        let result = run(&RecordStore::new(), &BTreeSet::new());
        assert!(result.listed_entries.is_empty());
        assert_eq!(result.messages[0].content, "No entries yet.");
    }
}
