//! Record store: the single in-memory collection of user records.
//!
//! Populated once from the record source, then mutated only by edit commits
//! and deletions. Insertion order is preserved across every mutation.

use roster_common::{Field, Record, RecordId};
use std::collections::HashSet;

/// Ordered, id-unique record collection.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<Record>,
    populated: bool,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the initial collection. Only the first call has any effect.
    ///
    /// Duplicate ids keep their first occurrence. Returns `false` when the
    /// store was already populated.
    pub fn populate(&mut self, records: Vec<Record>) -> bool {
        if self.populated {
            tracing::warn!(
                target: "roster.store",
                incoming = records.len(),
                "store already populated; ignoring second load"
            );
            return false;
        }

        let mut seen: HashSet<RecordId> = HashSet::with_capacity(records.len());
        let mut kept = Vec::with_capacity(records.len());
        let mut dropped = 0usize;
        for record in records {
            if seen.insert(record.id.clone()) {
                kept.push(record);
            } else {
                dropped += 1;
                tracing::warn!(
                    target: "roster.store",
                    id = %record.id,
                    "duplicate record id in feed; keeping first occurrence"
                );
            }
        }

        self.records = kept;
        self.populated = true;
        tracing::debug!(
            target: "roster.store",
            count = self.records.len(),
            dropped,
            "store populated"
        );
        true
    }

    pub fn is_populated(&self) -> bool {
        self.populated
    }

    /// Overwrite one field of a record. No-op if the id is absent.
    pub fn update_field(
        &mut self,
        id: &RecordId,
        field: Field,
        value: impl Into<String>,
    ) -> bool {
        match self.records.iter_mut().find(|r| &r.id == id) {
            Some(record) => {
                record.set(field, value);
                true
            }
            None => false,
        }
    }

    /// Remove a record if present.
    pub fn delete_one(&mut self, id: &RecordId) -> bool {
        match self.records.iter().position(|r| &r.id == id) {
            Some(idx) => {
                self.records.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Remove every record whose id is listed, in one pass.
    pub fn delete_many<'a, I>(&mut self, ids: I) -> usize
    where
        I: IntoIterator<Item = &'a RecordId>,
    {
        let doomed: HashSet<&RecordId> = ids.into_iter().collect();
        if doomed.is_empty() {
            return 0;
        }
        let before = self.records.len();
        self.records.retain(|r| !doomed.contains(&r.id));
        before - self.records.len()
    }

    /// All records in insertion order.
    pub fn all(&self) -> &[Record] {
        &self.records
    }

    pub fn get(&self, id: &RecordId) -> Option<&Record> {
        self.records.iter().find(|r| &r.id == id)
    }

    pub fn contains(&self, id: &RecordId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &RecordId> {
        self.records.iter().map(|r| &r.id)
    }
}
