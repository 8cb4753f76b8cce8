use crate::commands::{CmdMessage, CmdResult};
use crate::model::DogEntry;
use crate::store::RecordStore;
use log::debug;

pub fn run(store: &mut RecordStore, entry: DogEntry) -> CmdResult {
    debug!("Adding entry: {}", entry);
    store.append(entry.clone());

    CmdResult::default()
        .with_message(CmdMessage::success(format!(
            "New dog added ({}): {}",
            store.row_count(),
            entry.name
        )))
        .with_affected_entries(vec![entry])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_to_the_end() {
        let mut store = RecordStore::new();
        run(&mut store, DogEntry::new("Rex", "Lab", "Al", "J", "Best"));
        let result = run(&mut store, DogEntry::new("Max", "Pug", "Bo", "K", "Gold"));

        assert_eq!(store.row_count(), 2);
        assert_eq!(store.get(1).unwrap().name, "Max");
        assert_eq!(result.affected_entries[0].name, "Max");
        assert!(result.messages[0].content.contains("(2): Max"));
    }

    #[test]
    fn duplicates_are_allowed() {
        let mut store = RecordStore::new();
        let entry = DogEntry::new("Rex", "Lab", "Al", "J", "Best");
        run(&mut store, entry.clone());
        run(&mut store, entry.clone());
        assert_eq!(store.all(), &[entry.clone(), entry][..]);
    }
}
