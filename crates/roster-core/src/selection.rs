//! Selection tracker: the set of marked record ids.
//!
//! Selection lives here, never on the record. It survives page and search
//! changes; only deletions prune it.

use roster_common::RecordId;
use std::collections::BTreeSet;

use crate::store::RecordStore;

pub use roster_config::SelectAllScope;

#[derive(Debug, Clone, Default)]
pub struct SelectionTracker {
    ids: BTreeSet<RecordId>,
}

impl SelectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or remove one id.
    pub fn toggle(&mut self, id: &RecordId, is_selected: bool) {
        if is_selected {
            self.ids.insert(id.clone());
        } else {
            self.ids.remove(id);
        }
    }

    /// Replace the selection with exactly `ids`.
    pub fn select_all_visible<'a, I>(&mut self, ids: I)
    where
        I: IntoIterator<Item = &'a RecordId>,
    {
        self.ids = ids.into_iter().cloned().collect();
    }

    pub fn deselect_all(&mut self) {
        self.ids.clear();
    }

    pub fn count(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn is_selected(&self, id: &RecordId) -> bool {
        self.ids.contains(id)
    }

    pub fn remove(&mut self, id: &RecordId) -> bool {
        self.ids.remove(id)
    }

    /// Drop ids no longer present in the store.
    pub fn retain_existing(&mut self, store: &RecordStore) {
        self.ids.retain(|id| store.contains(id));
    }

    /// Selected ids in sorted order.
    pub fn ids(&self) -> impl Iterator<Item = &RecordId> {
        self.ids.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_common::Record;

    fn id(s: &str) -> RecordId {
        RecordId::new(s)
    }

    #[test]
    fn test_toggle_on_off() {
        let mut sel = SelectionTracker::new();
        sel.toggle(&id("1"), true);
        sel.toggle(&id("1"), true);
        assert_eq!(sel.count(), 1);
        assert!(sel.is_selected(&id("1")));
        sel.toggle(&id("1"), false);
        assert!(sel.is_empty());
        sel.toggle(&id("2"), false);
        assert!(sel.is_empty());
    }

    #[test]
    fn test_select_all_visible_replaces() {
        let mut sel = SelectionTracker::new();
        sel.toggle(&id("9"), true);
        let visible = [id("1"), id("2")];
        sel.select_all_visible(visible.iter());
        assert_eq!(sel.count(), 2);
        assert!(!sel.is_selected(&id("9")));
    }

    #[test]
    fn test_deselect_all_idempotent() {
        let mut sel = SelectionTracker::new();
        sel.toggle(&id("1"), true);
        sel.deselect_all();
        sel.deselect_all();
        assert_eq!(sel.count(), 0);
    }

    #[test]
    fn test_retain_existing() {
        let mut store = RecordStore::new();
        store.populate(vec![Record::new("1", "A", "", "")]);
        let mut sel = SelectionTracker::new();
        sel.toggle(&id("1"), true);
        sel.toggle(&id("2"), true);
        sel.retain_existing(&store);
        let ids: Vec<&str> = sel.ids().map(|i| i.as_str()).collect();
        assert_eq!(ids, vec!["1"]);
    }

    #[test]
    fn test_ids_sorted() {
        let mut sel = SelectionTracker::new();
        for s in ["c", "a", "b"] {
            sel.toggle(&id(s), true);
        }
        let ids: Vec<&str> = sel.ids().map(|i| i.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert!(sel.remove(&id("b")));
        assert!(!sel.remove(&id("b")));
    }
}
