//! Inline edit controller.
//!
//! Each row is either displayed or being edited. Entering edit mode seeds a
//! draft from the record's current values; saving hands the trimmed draft back
//! to the orchestrator, which writes it to the store. There is no cancel: the
//! only way out of edit mode is a save (or deleting the row).

use roster_common::{Field, Record, RecordId};
use std::collections::BTreeMap;
use thiserror::Error;

pub use roster_config::EditPolicy;

/// Pending values for one row in edit mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    name: String,
    email: String,
    role: String,
}

impl Draft {
    fn seeded_from(record: &Record) -> Self {
        Self {
            name: record.name.clone(),
            email: record.email.clone(),
            role: record.role.clone(),
        }
    }

    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Role => &self.role,
        }
    }

    fn value_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Role => &mut self.role,
        }
    }

    fn trimmed(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            role: self.role.trim().to_string(),
        }
    }
}

/// Why a row could not enter edit mode.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditRefusal {
    #[error("row {editing} is already being edited")]
    AnotherRowEditing { editing: RecordId },
}

/// Tracks which rows are in edit mode and their drafts.
#[derive(Debug, Clone, Default)]
pub struct EditController {
    drafts: BTreeMap<RecordId, Draft>,
    policy: EditPolicy,
}

impl EditController {
    pub fn new(policy: EditPolicy) -> Self {
        Self {
            drafts: BTreeMap::new(),
            policy,
        }
    }

    pub fn policy(&self) -> EditPolicy {
        self.policy
    }

    /// Enter edit mode for `record`. Re-entering keeps the existing draft.
    pub fn begin(&mut self, record: &Record) -> Result<(), EditRefusal> {
        if self.drafts.contains_key(&record.id) {
            return Ok(());
        }
        if self.policy == EditPolicy::Exclusive {
            if let Some(editing) = self.drafts.keys().next() {
                return Err(EditRefusal::AnotherRowEditing {
                    editing: editing.clone(),
                });
            }
        }
        self.drafts
            .insert(record.id.clone(), Draft::seeded_from(record));
        Ok(())
    }

    pub fn is_editing(&self, id: &RecordId) -> bool {
        self.drafts.contains_key(id)
    }

    pub fn draft(&self, id: &RecordId) -> Option<&Draft> {
        self.drafts.get(id)
    }

    pub fn editing_count(&self) -> usize {
        self.drafts.len()
    }

    /// Replace one draft field. No-op unless the row is editing.
    pub fn set_draft(&mut self, id: &RecordId, field: Field, value: impl Into<String>) -> bool {
        match self.drafts.get_mut(id) {
            Some(draft) => {
                *draft.value_mut(field) = value.into();
                true
            }
            None => false,
        }
    }

    pub fn push_char(&mut self, id: &RecordId, field: Field, ch: char) -> bool {
        match self.drafts.get_mut(id) {
            Some(draft) => {
                draft.value_mut(field).push(ch);
                true
            }
            None => false,
        }
    }

    pub fn pop_char(&mut self, id: &RecordId, field: Field) -> bool {
        match self.drafts.get_mut(id) {
            Some(draft) => draft.value_mut(field).pop().is_some(),
            None => false,
        }
    }

    /// Leave edit mode and return the trimmed draft.
    pub fn commit(&mut self, id: &RecordId) -> Option<Draft> {
        self.drafts.remove(id).map(Draft::trimmed)
    }

    /// Discard a row's draft without saving (used when the row is deleted).
    pub fn forget(&mut self, id: &RecordId) {
        self.drafts.remove(id);
    }

    /// Keep only drafts whose id satisfies `keep`.
    pub fn retain(&mut self, mut keep: impl FnMut(&RecordId) -> bool) {
        self.drafts.retain(|id, _| keep(id));
    }
}
