//! Property-based and scenario tests for the record engine.
//!
//! Drives the `Orchestrator` through arbitrary operation sequences and checks
//! the invariants that must hold after every render.

use proptest::prelude::*;
use roster_common::{Field, Record, RecordId};
use roster_config::{EditPolicy, SelectAllScope};
use roster_core::orchestrator::Orchestrator;
use roster_core::view::{self, DEFAULT_PAGE_SIZE};

fn alice_bob() -> Vec<Record> {
    vec![
        Record::new("1", "Alice", "a@x.com", "admin"),
        Record::new("2", "Bob", "b@x.com", "user"),
    ]
}

fn numbered(n: usize) -> Vec<Record> {
    (1..=n)
        .map(|i| {
            let role = if i % 3 == 0 { "admin" } else { "user" };
            Record::new(i.to_string(), format!("Person {i}"), format!("p{i}@x.com"), role)
        })
        .collect()
}

fn loaded(records: Vec<Record>) -> Orchestrator {
    let mut orchestrator = Orchestrator::new(DEFAULT_PAGE_SIZE);
    orchestrator.load(records);
    orchestrator
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn filter_matches_any_field_case_insensitively() {
    let records = alice_bob();

    let ids = |term: &str| -> Vec<&str> {
        view::filter(&records, term)
            .into_iter()
            .map(|r| r.id.as_str())
            .collect()
    };

    assert_eq!(ids("ali"), ["1"]);
    assert_eq!(ids(""), ["1", "2"]);
    assert_eq!(ids("ADMIN"), ["1"]);
}

#[test]
fn edit_round_trip_updates_store() {
    let mut orchestrator = loaded(alice_bob());
    let alice = RecordId::new("1");

    assert_eq!(orchestrator.begin_edit(&alice), Ok(true));
    assert!(orchestrator.snapshot().rows[0].editing);
    assert!(orchestrator.edit_input(&alice, Field::Name, "Alicia"));

    // Draft is shown but not stored yet
    assert_eq!(orchestrator.snapshot().rows[0].name, "Alicia");
    assert_eq!(orchestrator.store().get(&alice).map(|r| r.name.as_str()), Some("Alice"));

    assert!(orchestrator.save_edit(&alice));
    assert_eq!(orchestrator.store().get(&alice).map(|r| r.name.as_str()), Some("Alicia"));
    assert!(!orchestrator.snapshot().rows[0].editing);
}

#[test]
fn bulk_delete_clears_selection() {
    let mut orchestrator = loaded(numbered(5));
    for id in ["2", "4"] {
        assert!(orchestrator.toggle_selection(&RecordId::new(id), true));
    }
    assert_eq!(orchestrator.snapshot().summary.text, "2 of 5 row(s) selected");

    let mut yes = true;
    assert_eq!(orchestrator.delete_selected(&mut yes), 2);
    assert_eq!(orchestrator.snapshot().summary.text, "0 of 3 row(s) selected");
    assert!(orchestrator.state().selected.is_empty());
}

#[test]
fn declined_delete_changes_nothing() {
    let mut orchestrator = loaded(numbered(5));
    orchestrator.toggle_selection(&RecordId::new("3"), true);
    let before = orchestrator.snapshot().clone();

    let mut no = false;
    assert!(!orchestrator.delete_one(&RecordId::new("1"), &mut no));
    assert_eq!(orchestrator.delete_selected(&mut no), 0);
    assert_eq!(orchestrator.store().len(), 5);
    assert_eq!(orchestrator.snapshot().rows, before.rows);
    assert_eq!(orchestrator.snapshot().summary, before.summary);
}

#[test]
fn deselect_all_is_idempotent() {
    let mut orchestrator = loaded(numbered(12));
    orchestrator.select_all();
    orchestrator.deselect_all();
    let once = orchestrator.snapshot().clone();
    orchestrator.deselect_all();
    let twice = orchestrator.snapshot();

    assert_eq!(once.rows, twice.rows);
    assert_eq!(once.summary, twice.summary);
    assert_eq!(twice.summary.selected, 0);
}

#[test]
fn select_all_scope_controls_reach() {
    let mut page = loaded(numbered(25));
    assert_eq!(page.select_all(), 10);

    let mut filtered = Orchestrator::new(DEFAULT_PAGE_SIZE)
        .with_select_all_scope(SelectAllScope::Filtered);
    filtered.load(numbered(25));
    assert_eq!(filtered.select_all(), 25);
}

#[test]
fn exclusive_policy_refuses_second_edit() {
    let mut orchestrator =
        Orchestrator::new(DEFAULT_PAGE_SIZE).with_edit_policy(EditPolicy::Exclusive);
    orchestrator.load(alice_bob());

    assert_eq!(orchestrator.begin_edit(&RecordId::new("1")), Ok(true));
    assert!(orchestrator.begin_edit(&RecordId::new("2")).is_err());
    assert!(orchestrator.save_edit(&RecordId::new("1")));
    assert_eq!(orchestrator.begin_edit(&RecordId::new("2")), Ok(true));
}

#[test]
fn second_load_is_ignored() {
    let mut orchestrator = loaded(alice_bob());
    assert!(!orchestrator.load(numbered(30)));
    assert_eq!(orchestrator.store().len(), 2);
}

// ============================================================================
// Properties
// ============================================================================

#[derive(Debug, Clone)]
enum Op {
    Search(String),
    GoToPage(usize),
    Next,
    Prev,
    Toggle(usize, bool),
    SelectAll,
    DeselectAll,
    DeleteOne(usize, bool),
    DeleteSelected(bool),
    BeginEdit(usize),
    EditName(usize, String),
    SaveEdit(usize),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        prop::sample::select(vec!["", "1", "person 2", "ADMIN", "x.com", "zzz"])
            .prop_map(|s| Op::Search(s.to_string())),
        (0usize..8).prop_map(Op::GoToPage),
        Just(Op::Next),
        Just(Op::Prev),
        (0usize..40, any::<bool>()).prop_map(|(i, b)| Op::Toggle(i, b)),
        Just(Op::SelectAll),
        Just(Op::DeselectAll),
        (0usize..40, any::<bool>()).prop_map(|(i, b)| Op::DeleteOne(i, b)),
        any::<bool>().prop_map(Op::DeleteSelected),
        (0usize..40).prop_map(Op::BeginEdit),
        (0usize..40, "[a-z]{0,6}").prop_map(|(i, s)| Op::EditName(i, s)),
        (0usize..40).prop_map(Op::SaveEdit),
    ]
}

/// Ids past the store size exercise the not-found paths.
fn id(i: usize) -> RecordId {
    RecordId::new(i.to_string())
}

fn apply(orchestrator: &mut Orchestrator, op: &Op) {
    match op {
        Op::Search(term) => orchestrator.search(term.clone()),
        Op::GoToPage(n) => {
            orchestrator.go_to_page(*n);
        }
        Op::Next => {
            orchestrator.next_page();
        }
        Op::Prev => {
            orchestrator.prev_page();
        }
        Op::Toggle(i, on) => {
            orchestrator.toggle_selection(&id(*i), *on);
        }
        Op::SelectAll => {
            orchestrator.select_all();
        }
        Op::DeselectAll => orchestrator.deselect_all(),
        Op::DeleteOne(i, answer) => {
            let mut answer = *answer;
            orchestrator.delete_one(&id(*i), &mut answer);
        }
        Op::DeleteSelected(answer) => {
            let mut answer = *answer;
            orchestrator.delete_selected(&mut answer);
        }
        Op::BeginEdit(i) => {
            let _ = orchestrator.begin_edit(&id(*i));
        }
        Op::EditName(i, name) => {
            orchestrator.edit_input(&id(*i), Field::Name, name.clone());
        }
        Op::SaveEdit(i) => {
            orchestrator.save_edit(&id(*i));
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Selected ids always exist in the store and the summary agrees.
    #[test]
    fn selection_stays_consistent_with_store(
        n in 0usize..30,
        ops in prop::collection::vec(op_strategy(), 0..60),
    ) {
        let mut orchestrator = loaded(numbered(n));
        for op in &ops {
            apply(&mut orchestrator, op);

            for selected in orchestrator.state().selected.ids() {
                prop_assert!(orchestrator.store().contains(selected), "{selected} not in store after {op:?}");
            }
            let snapshot = orchestrator.snapshot();
            prop_assert_eq!(snapshot.summary.selected, orchestrator.state().selected.count());
            prop_assert_eq!(snapshot.summary.total, orchestrator.store().len());
            for row in &snapshot.rows {
                prop_assert_eq!(row.selected, orchestrator.state().selected.is_selected(&row.id));
                prop_assert_eq!(row.editing, orchestrator.edit().is_editing(&row.id));
            }
        }
    }

    /// Page count follows the filtered size and the page stays in range.
    #[test]
    fn pagination_bounds_hold(
        n in 0usize..60,
        ops in prop::collection::vec(op_strategy(), 0..40),
    ) {
        let mut orchestrator = loaded(numbered(n));
        for op in &ops {
            apply(&mut orchestrator, op);

            let snapshot = orchestrator.snapshot();
            let filtered = snapshot.filtered_count;
            let expected_pages = filtered.div_ceil(DEFAULT_PAGE_SIZE).max(1);
            prop_assert_eq!(snapshot.pagination.page_count, expected_pages);
            prop_assert!(snapshot.pagination.current_page >= 1);
            prop_assert!(snapshot.pagination.current_page <= expected_pages);
            prop_assert!(snapshot.rows.len() <= DEFAULT_PAGE_SIZE);
            prop_assert_eq!(snapshot.pagination.buttons.len(), expected_pages);
        }
    }

    /// `go_to_page(n)` moves exactly when `1 <= n <= page_count`.
    #[test]
    fn go_to_page_accepts_only_valid_pages(n in 0usize..60, target in 0usize..10) {
        let mut orchestrator = loaded(numbered(n));
        let page_count = orchestrator.snapshot().pagination.page_count;
        let before = orchestrator.snapshot().pagination.current_page;

        let moved = orchestrator.go_to_page(target);
        prop_assert_eq!(moved, (1..=page_count).contains(&target));

        let after = orchestrator.snapshot().pagination.current_page;
        if moved {
            prop_assert_eq!(after, target);
        } else {
            prop_assert_eq!(after, before);
        }
    }

    /// Every visible row matches the active search term.
    #[test]
    fn visible_rows_match_search(
        n in 1usize..40,
        term in prop::sample::select(vec!["1", "2", "admin", "USER", "person 1", "@x"]),
    ) {
        let mut orchestrator = loaded(numbered(n));
        orchestrator.search(term);
        let needle = term.to_lowercase();
        for row in &orchestrator.snapshot().rows {
            let hit = [row.id.as_str(), row.name.as_str(), row.email.as_str(), row.role.as_str()]
                .iter()
                .any(|v| v.to_lowercase().contains(&needle));
            prop_assert!(hit, "row {} does not match {term}", row.id);
        }
    }
}
