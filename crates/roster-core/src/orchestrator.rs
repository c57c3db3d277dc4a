//! Render orchestrator.
//!
//! Owns the record store, the view state (search term, page cursor,
//! selection) and the edit controller. Every mutating operation finishes by
//! re-deriving the full visible view into a [`RenderSnapshot`]; the snapshot
//! is the only render output kept between operations.
//!
//! Operations are total. Unknown ids and out-of-range pages are silent
//! no-ops reported through `bool`/count return values.

use roster_common::{Field, Record, RecordId};
use roster_config::Settings;
use serde::Serialize;

use crate::edit::{EditController, EditPolicy, EditRefusal};
use crate::selection::{SelectAllScope, SelectionTracker};
use crate::store::RecordStore;
use crate::view;

/// Gate in front of destructive operations.
pub trait Confirm {
    /// Ask the operator; `true` proceeds.
    fn confirm(&mut self, prompt: &str) -> bool;
}

/// A pre-recorded answer, e.g. the button chosen in a dialog.
impl Confirm for bool {
    fn confirm(&mut self, _prompt: &str) -> bool {
        *self
    }
}

/// Search term, page cursor and selection.
#[derive(Debug, Clone)]
pub struct ViewState {
    pub search_term: String,
    /// 1-based; clamped into range before every render.
    pub current_page: usize,
    pub selected: SelectionTracker,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            current_page: 1,
            selected: SelectionTracker::new(),
        }
    }
}

/// One visible table row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowView {
    pub id: RecordId,
    /// Draft values while editing, stored values otherwise.
    pub name: String,
    pub email: String,
    pub role: String,
    pub selected: bool,
    pub editing: bool,
}

impl RowView {
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Role => &self.role,
        }
    }
}

/// Pagination controls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginationView {
    pub current_page: usize,
    pub page_count: usize,
    /// Page-number buttons, `1..=page_count`.
    pub buttons: Vec<usize>,
    pub has_prev: bool,
    pub has_next: bool,
}

/// "N of M row(s) selected".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionSummary {
    pub selected: usize,
    /// Unfiltered record count.
    pub total: usize,
    pub text: String,
}

impl SelectionSummary {
    fn new(selected: usize, total: usize) -> Self {
        Self {
            selected,
            total,
            text: format!("{} of {} row(s) selected", selected, total),
        }
    }
}

/// Everything the screen shows, derived from state in one pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderSnapshot {
    pub search: String,
    pub rows: Vec<RowView>,
    pub pagination: PaginationView,
    pub summary: SelectionSummary,
    pub filtered_count: usize,
    pub render_count: u64,
}

/// Coordinates the engine components and produces render snapshots.
#[derive(Debug, Clone)]
pub struct Orchestrator {
    store: RecordStore,
    state: ViewState,
    edit: EditController,
    page_size: usize,
    select_all_scope: SelectAllScope,
    snapshot: RenderSnapshot,
    render_count: u64,
}

impl Orchestrator {
    /// Empty orchestrator with default policies. Renders once immediately.
    pub fn new(page_size: usize) -> Self {
        let page_size = page_size.max(1);
        let mut orchestrator = Self {
            store: RecordStore::new(),
            state: ViewState::default(),
            edit: EditController::default(),
            page_size,
            select_all_scope: SelectAllScope::default(),
            snapshot: RenderSnapshot {
                search: String::new(),
                rows: Vec::new(),
                pagination: PaginationView {
                    current_page: 1,
                    page_count: 1,
                    buttons: vec![1],
                    has_prev: false,
                    has_next: false,
                },
                summary: SelectionSummary::new(0, 0),
                filtered_count: 0,
                render_count: 0,
            },
            render_count: 0,
        };
        orchestrator.render();
        orchestrator
    }

    /// Orchestrator configured from loaded settings.
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.page_size)
            .with_select_all_scope(settings.select_all_scope)
            .with_edit_policy(settings.edit_policy)
    }

    pub fn with_select_all_scope(mut self, scope: SelectAllScope) -> Self {
        self.select_all_scope = scope;
        self
    }

    pub fn with_edit_policy(mut self, policy: EditPolicy) -> Self {
        self.edit = EditController::new(policy);
        self
    }

    // ── accessors ─────────────────────────────────────────────────────

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn edit(&self) -> &EditController {
        &self.edit
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn select_all_scope(&self) -> SelectAllScope {
        self.select_all_scope
    }

    /// The latest snapshot.
    pub fn snapshot(&self) -> &RenderSnapshot {
        &self.snapshot
    }

    /// Ids of the rows on the current page, in display order.
    pub fn visible_ids(&self) -> Vec<RecordId> {
        self.snapshot.rows.iter().map(|r| r.id.clone()).collect()
    }

    // ── rendering ─────────────────────────────────────────────────────

    /// Clamp the page, filter, paginate and rebuild the snapshot.
    pub fn render(&mut self) -> &RenderSnapshot {
        let filtered = view::filter(self.store.all(), &self.state.search_term);
        let page_count = view::page_count(filtered.len(), self.page_size);
        let current_page = view::clamp_page(self.state.current_page, page_count);

        let rows = view::paginate(&filtered, current_page, self.page_size)
            .iter()
            .map(|record| self.row_view(record))
            .collect();

        self.render_count += 1;
        let snapshot = RenderSnapshot {
            search: self.state.search_term.clone(),
            rows,
            pagination: PaginationView {
                current_page,
                page_count,
                buttons: (1..=page_count).collect(),
                has_prev: current_page > 1,
                has_next: current_page < page_count,
            },
            summary: SelectionSummary::new(self.state.selected.count(), self.store.len()),
            filtered_count: filtered.len(),
            render_count: self.render_count,
        };

        self.state.current_page = current_page;
        self.snapshot = snapshot;

        tracing::trace!(
            target: "roster.render",
            render = self.render_count,
            page = current_page,
            page_count,
            filtered = self.snapshot.filtered_count,
            selected = self.snapshot.summary.selected,
            "view rendered"
        );

        &self.snapshot
    }

    fn row_view(&self, record: &Record) -> RowView {
        let draft = self.edit.draft(&record.id);
        let value = |field: Field| -> String {
            draft
                .map(|d| d.value(field))
                .unwrap_or_else(|| record.value(field))
                .to_string()
        };
        RowView {
            id: record.id.clone(),
            name: value(Field::Name),
            email: value(Field::Email),
            role: value(Field::Role),
            selected: self.state.selected.is_selected(&record.id),
            editing: draft.is_some(),
        }
    }

    fn page_count(&self) -> usize {
        let filtered = view::filter(self.store.all(), &self.state.search_term);
        view::page_count(filtered.len(), self.page_size)
    }

    // ── loading ───────────────────────────────────────────────────────

    /// Populate the store from the source. Only the first load counts.
    pub fn load(&mut self, records: Vec<Record>) -> bool {
        let loaded = self.store.populate(records);
        self.render();
        loaded
    }

    // ── search & navigation ───────────────────────────────────────────

    /// Set the search term and return to page 1.
    pub fn search(&mut self, term: impl Into<String>) {
        self.state.search_term = term.into();
        self.state.current_page = 1;
        self.render();
    }

    /// Jump to page `n`. Out-of-range requests are ignored.
    pub fn go_to_page(&mut self, n: usize) -> bool {
        let page_count = self.page_count();
        if n < 1 || n > page_count {
            tracing::trace!(target: "roster.render", page = n, page_count, "page out of range");
            return false;
        }
        self.state.current_page = n;
        self.render();
        true
    }

    pub fn first_page(&mut self) -> bool {
        self.go_to_page(1)
    }

    pub fn prev_page(&mut self) -> bool {
        match self.state.current_page.checked_sub(1) {
            Some(n) => self.go_to_page(n),
            None => false,
        }
    }

    pub fn next_page(&mut self) -> bool {
        self.go_to_page(self.state.current_page + 1)
    }

    pub fn last_page(&mut self) -> bool {
        let last = self.page_count();
        self.go_to_page(last)
    }

    // ── selection ─────────────────────────────────────────────────────

    /// Mark or unmark one row. Ids not in the store are ignored.
    pub fn toggle_selection(&mut self, id: &RecordId, is_selected: bool) -> bool {
        if !self.store.contains(id) {
            return false;
        }
        self.state.selected.toggle(id, is_selected);
        self.render();
        true
    }

    /// Replace the selection according to the select-all scope.
    ///
    /// Returns the number of rows now selected.
    pub fn select_all(&mut self) -> usize {
        let ids: Vec<RecordId> = match self.select_all_scope {
            SelectAllScope::Page => self.visible_ids(),
            SelectAllScope::Filtered => view::filter(self.store.all(), &self.state.search_term)
                .into_iter()
                .map(|r| r.id.clone())
                .collect(),
        };
        self.state.selected.select_all_visible(ids.iter());
        self.render();
        self.state.selected.count()
    }

    pub fn deselect_all(&mut self) {
        self.state.selected.deselect_all();
        self.render();
    }

    // ── inline editing ────────────────────────────────────────────────

    /// Put a row into edit mode. Unknown ids are ignored.
    pub fn begin_edit(&mut self, id: &RecordId) -> Result<bool, EditRefusal> {
        let Some(record) = self.store.get(id) else {
            return Ok(false);
        };
        let result = self.edit.begin(record);
        self.render();
        result.map(|()| true)
    }

    /// Replace one draft field of an editing row.
    pub fn edit_input(&mut self, id: &RecordId, field: Field, value: impl Into<String>) -> bool {
        let changed = self.edit.set_draft(id, field, value);
        if changed {
            self.render();
        }
        changed
    }

    /// Write the row's draft to the store and leave edit mode.
    pub fn save_edit(&mut self, id: &RecordId) -> bool {
        let Some(draft) = self.edit.commit(id) else {
            return false;
        };
        for field in Field::ALL {
            self.store.update_field(id, field, draft.value(field));
        }
        tracing::debug!(target: "roster.store", id = %id, "edit saved");
        self.render();
        true
    }

    // ── deletion ──────────────────────────────────────────────────────

    /// Delete one row after confirmation. Declining changes nothing.
    pub fn delete_one(&mut self, id: &RecordId, confirm: &mut dyn Confirm) -> bool {
        if !self.store.contains(id) {
            return false;
        }
        if !confirm.confirm("Delete this row?") {
            return false;
        }
        self.store.delete_one(id);
        self.state.selected.remove(id);
        self.edit.forget(id);
        tracing::info!(target: "roster.store", id = %id, "record deleted");
        self.render();
        true
    }

    /// Delete every selected row after confirmation, then clear the selection.
    ///
    /// Returns the number of rows removed.
    pub fn delete_selected(&mut self, confirm: &mut dyn Confirm) -> usize {
        let count = self.state.selected.count();
        if count == 0 {
            return 0;
        }
        if !confirm.confirm(&format!("Delete {} selected row(s)?", count)) {
            return 0;
        }
        let ids: Vec<RecordId> = self.state.selected.ids().cloned().collect();
        let removed = self.store.delete_many(ids.iter());
        self.state.selected.deselect_all();
        let store = &self.store;
        self.edit.retain(|id| store.contains(id));
        tracing::info!(target: "roster.store", removed, "selected records deleted");
        self.render();
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Recorder {
        answer: bool,
        prompts: Vec<String>,
    }

    impl Confirm for Recorder {
        fn confirm(&mut self, prompt: &str) -> bool {
            self.prompts.push(prompt.to_string());
            self.answer
        }
    }

    fn id(s: &str) -> RecordId {
        RecordId::new(s)
    }

    fn alice_bob() -> Orchestrator {
        let mut orch = Orchestrator::new(10);
        orch.load(vec![
            Record::new("1", "Alice", "a@x.com", "admin"),
            Record::new("2", "Bob", "b@x.com", "member"),
        ]);
        orch
    }

    fn numbered(n: usize) -> Orchestrator {
        let mut orch = Orchestrator::new(10);
        orch.load(
            (1..=n)
                .map(|i| Record::new(i.to_string(), format!("user{i}"), "", "member"))
                .collect(),
        );
        orch
    }

    #[test]
    fn test_initial_render_is_empty() {
        let orch = Orchestrator::new(10);
        let snap = orch.snapshot();
        assert!(snap.rows.is_empty());
        assert_eq!(snap.pagination.page_count, 1);
        assert_eq!(snap.summary.text, "0 of 0 row(s) selected");
        assert_eq!(snap.render_count, 1);
    }

    #[test]
    fn test_every_mutation_renders() {
        let mut orch = alice_bob();
        let before = orch.snapshot().render_count;
        orch.search("a");
        orch.toggle_selection(&id("1"), true);
        orch.deselect_all();
        assert_eq!(orch.snapshot().render_count, before + 3);
    }

    #[test]
    fn test_search_resets_page() {
        let mut orch = numbered(25);
        assert!(orch.go_to_page(3));
        orch.search("user");
        assert_eq!(orch.snapshot().pagination.current_page, 1);
        assert_eq!(orch.snapshot().search, "user");
    }

    #[test]
    fn test_search_filters_rows() {
        let mut orch = alice_bob();
        orch.search("ali");
        let snap = orch.snapshot();
        assert_eq!(snap.rows.len(), 1);
        assert_eq!(snap.rows[0].name, "Alice");
        assert_eq!(snap.filtered_count, 1);
        assert_eq!(snap.summary.total, 2);
    }

    #[test]
    fn test_go_to_page_bounds() {
        let mut orch = numbered(46);
        assert_eq!(orch.snapshot().pagination.page_count, 5);
        assert_eq!(orch.snapshot().pagination.buttons, vec![1, 2, 3, 4, 5]);
        let renders = orch.snapshot().render_count;
        assert!(!orch.go_to_page(0));
        assert!(!orch.go_to_page(6));
        assert_eq!(orch.snapshot().render_count, renders);
        assert!(orch.go_to_page(5));
        assert_eq!(orch.snapshot().rows.len(), 6);
        assert!(!orch.snapshot().pagination.has_next);
        assert!(orch.snapshot().pagination.has_prev);
    }

    #[test]
    fn test_prev_next_first_last() {
        let mut orch = numbered(25);
        assert!(!orch.prev_page());
        assert!(orch.next_page());
        assert_eq!(orch.state().current_page, 2);
        assert!(orch.last_page());
        assert_eq!(orch.state().current_page, 3);
        assert!(!orch.next_page());
        assert!(orch.first_page());
        assert_eq!(orch.state().current_page, 1);
    }

    #[test]
    fn test_page_clamped_after_delete() {
        let mut orch = numbered(11);
        assert!(orch.go_to_page(2));
        assert!(orch.delete_one(&id("11"), &mut true));
        assert_eq!(orch.snapshot().pagination.current_page, 1);
        assert_eq!(orch.snapshot().pagination.page_count, 1);
    }

    #[test]
    fn test_selection_survives_search_and_paging() {
        let mut orch = numbered(25);
        orch.toggle_selection(&id("3"), true);
        orch.search("user2");
        orch.go_to_page(1);
        orch.search("");
        assert_eq!(orch.snapshot().summary.selected, 1);
        assert!(orch.snapshot().rows[2].selected);
    }

    #[test]
    fn test_toggle_unknown_id_ignored() {
        let mut orch = alice_bob();
        assert!(!orch.toggle_selection(&id("99"), true));
        assert_eq!(orch.state().selected.count(), 0);
    }

    #[test]
    fn test_select_all_page_scope() {
        let mut orch = numbered(25);
        assert_eq!(orch.select_all(), 10);
        assert_eq!(orch.snapshot().summary.text, "10 of 25 row(s) selected");
        orch.next_page();
        assert!(orch.snapshot().rows.iter().all(|r| !r.selected));
    }

    #[test]
    fn test_select_all_filtered_scope() {
        let mut orch = numbered(25).with_select_all_scope(SelectAllScope::Filtered);
        orch.search("user1");
        assert_eq!(orch.select_all(), 11);
    }

    #[test]
    fn test_edit_round_trip() {
        let mut orch = alice_bob();
        assert_eq!(orch.begin_edit(&id("1")), Ok(true));
        assert!(orch.snapshot().rows[0].editing);
        assert!(orch.edit_input(&id("1"), Field::Name, "Alicia"));
        assert_eq!(orch.snapshot().rows[0].name, "Alicia");
        assert_eq!(orch.store().get(&id("1")).unwrap().name, "Alice");
        assert!(orch.save_edit(&id("1")));
        assert!(!orch.snapshot().rows[0].editing);
        assert_eq!(orch.store().get(&id("1")).unwrap().name, "Alicia");
    }

    #[test]
    fn test_edit_unknown_row() {
        let mut orch = alice_bob();
        assert_eq!(orch.begin_edit(&id("99")), Ok(false));
        assert!(!orch.edit_input(&id("99"), Field::Name, "x"));
        assert!(!orch.save_edit(&id("99")));
    }

    #[test]
    fn test_exclusive_edit_refused() {
        let mut orch = alice_bob().with_edit_policy(EditPolicy::Exclusive);
        orch.begin_edit(&id("1")).unwrap();
        assert!(orch.begin_edit(&id("2")).is_err());
        assert!(!orch.snapshot().rows[1].editing);
    }

    #[test]
    fn test_delete_one_declined() {
        let mut orch = alice_bob();
        orch.toggle_selection(&id("1"), true);
        let mut no = Recorder {
            answer: false,
            prompts: Vec::new(),
        };
        assert!(!orch.delete_one(&id("1"), &mut no));
        assert_eq!(no.prompts, vec!["Delete this row?"]);
        assert_eq!(orch.store().len(), 2);
        assert_eq!(orch.state().selected.count(), 1);
    }

    #[test]
    fn test_delete_one_prunes_selection_and_draft() {
        let mut orch = alice_bob();
        orch.toggle_selection(&id("1"), true);
        orch.begin_edit(&id("1")).unwrap();
        assert!(orch.delete_one(&id("1"), &mut true));
        assert!(!orch.state().selected.is_selected(&id("1")));
        assert!(!orch.edit().is_editing(&id("1")));
        assert_eq!(orch.snapshot().summary.text, "0 of 1 row(s) selected");
        assert!(!orch.delete_one(&id("1"), &mut true));
    }

    #[test]
    fn test_delete_selected_clears_selection() {
        let mut orch = numbered(5);
        orch.toggle_selection(&id("2"), true);
        orch.toggle_selection(&id("4"), true);
        let mut yes = Recorder {
            answer: true,
            prompts: Vec::new(),
        };
        assert_eq!(orch.delete_selected(&mut yes), 2);
        assert_eq!(yes.prompts, vec!["Delete 2 selected row(s)?"]);
        assert_eq!(orch.snapshot().summary.text, "0 of 3 row(s) selected");
    }

    #[test]
    fn test_delete_selected_nothing_selected() {
        let mut orch = numbered(5);
        let mut yes = Recorder {
            answer: true,
            prompts: Vec::new(),
        };
        assert_eq!(orch.delete_selected(&mut yes), 0);
        assert!(yes.prompts.is_empty());
        assert_eq!(orch.store().len(), 5);
    }

    #[test]
    fn test_delete_selected_declined() {
        let mut orch = numbered(5);
        orch.select_all();
        assert_eq!(orch.delete_selected(&mut false), 0);
        assert_eq!(orch.store().len(), 5);
        assert_eq!(orch.state().selected.count(), 5);
    }

    #[test]
    fn test_second_load_ignored() {
        let mut orch = alice_bob();
        assert!(!orch.load(vec![Record::new("3", "C", "", "")]));
        assert_eq!(orch.store().len(), 2);
    }

    #[test]
    fn test_from_settings() {
        let settings = Settings {
            page_size: 3,
            select_all_scope: SelectAllScope::Filtered,
            edit_policy: EditPolicy::Exclusive,
            ..Settings::default()
        };
        let orch = Orchestrator::from_settings(&settings);
        assert_eq!(orch.page_size(), 3);
        assert_eq!(orch.select_all_scope(), SelectAllScope::Filtered);
        assert_eq!(orch.edit().policy(), EditPolicy::Exclusive);
    }
}
