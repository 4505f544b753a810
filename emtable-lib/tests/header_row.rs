use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use emtable_lib::header::HeaderCell;
use emtable_lib::header::HeaderRow;
use emtable_lib::model::FilterConfig;
use emtable_lib::model::FilterKind;
use emtable_lib::model::FilterState;
use emtable_lib::model::HeaderConfig;
use emtable_lib::model::HeaderState;
use emtable_lib::model::SortDirection;
use emtable_lib::model::SortState;

const QUIET: Duration = Duration::from_millis(10);

fn columns() -> Vec<HeaderConfig> {
    vec![
        HeaderConfig::new("name", "Name")
            .sortable()
            .with_filter(FilterConfig::new(FilterKind::Text)),
        HeaderConfig::new("age", "Age")
            .sortable()
            .with_filter(FilterConfig::new(FilterKind::Text)),
    ]
}

fn changes(row: &HeaderRow) -> (Arc<Mutex<Vec<Vec<FilterState>>>>, emtable_lib::reactive::Subscription) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let subscription = row
        .filters_changes()
        .subscribe(move |filters| sink.lock().unwrap().push(filters.clone()));
    (seen, subscription)
}

#[tokio::test(start_paused = true)]
async fn test_edits_reconcile_with_external_filters() {
    let row = HeaderRow::new(columns(), QUIET);
    let (seen, _subscription) = changes(&row);

    row.set_filters(vec![FilterState::text("name", "a")]);
    row.filter_edit(FilterState::text("age", "5"));
    assert_eq!(
        row.current_filters(),
        vec![FilterState::text("name", "a"), FilterState::text("age", "5")]
    );

    row.filter_edit(FilterState::text("name", ""));
    assert_eq!(row.current_filters(), vec![FilterState::text("age", "5")]);

    tokio::time::sleep(QUIET * 3).await;
    let seen = seen.lock().unwrap();
    assert_eq!(*seen, vec![vec![FilterState::text("age", "5")]]);
}

#[tokio::test(start_paused = true)]
async fn test_external_changes_emit_nothing() {
    let row = HeaderRow::new(columns(), QUIET);
    let (seen, _subscription) = changes(&row);

    row.set_filters(vec![FilterState::text("name", "a")]);
    row.set_filters(vec![FilterState::text("age", "1")]);
    row.set_sort(Some(SortState::ascending("name")));

    tokio::time::sleep(QUIET * 3).await;
    assert!(seen.lock().unwrap().is_empty());
    assert_eq!(row.current_sort(), Some(SortState::ascending("name")));
}

#[tokio::test(start_paused = true)]
async fn test_edits_apart_emit_separately() {
    let row = HeaderRow::new(columns(), QUIET);
    let (seen, _subscription) = changes(&row);

    row.filter_edit(FilterState::text("name", "x"));
    tokio::time::sleep(QUIET * 3).await;
    row.filter_edit(FilterState::text("age", "7"));
    tokio::time::sleep(QUIET * 3).await;

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[1], vec![FilterState::text("name", "x"), FilterState::text("age", "7")]);
}

#[tokio::test(start_paused = true)]
async fn test_clear_all_is_one_change() {
    let row = HeaderRow::new(columns(), QUIET);
    let (seen, _subscription) = changes(&row);

    row.set_filters(vec![FilterState::text("name", "a"), FilterState::text("age", "2")]);
    row.clear_all();
    assert!(row.current_filters().is_empty());

    tokio::time::sleep(QUIET * 3).await;
    assert_eq!(*seen.lock().unwrap(), vec![Vec::<FilterState>::new()]);
}

#[test]
fn test_sort_edit_overrides_external_until_replaced() {
    let row = HeaderRow::new(columns(), QUIET);
    let edits = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&edits);
    let _subscription = row.sort_changes().subscribe(move |sort| sink.lock().unwrap().push(sort.clone()));

    row.set_sort(Some(SortState::ascending("name")));
    row.sort_edit("age", SortDirection::Descending);
    assert_eq!(row.current_sort(), Some(SortState::descending("age")));
    assert_eq!(*edits.lock().unwrap(), vec![SortState::descending("age")]);

    row.set_sort(None);
    assert_eq!(row.current_sort(), None);
}

#[test]
fn test_header_states_feed_cells() {
    let row = HeaderRow::new(columns(), QUIET);
    let states = Arc::new(Mutex::new(Vec::<HeaderState>::new()));
    let sink = Arc::clone(&states);
    let _subscription = row.header_states().subscribe(move |s| *sink.lock().unwrap() = s.clone());

    row.set_sort(Some(SortState::descending("name")));
    row.set_filters(vec![FilterState::text("age", "4")]);

    let states = states.lock().unwrap();
    let mut name = HeaderCell::new(columns()[0].clone());
    name.set_state(&states[0]);
    assert_eq!(name.sort_direction(), SortDirection::Descending);
    assert!(!name.has_filter());

    let mut age = HeaderCell::new(columns()[1].clone());
    age.set_state(&states[1]);
    assert_eq!(age.sort_direction(), SortDirection::None);
    assert_eq!(age.text(), "4");
    assert!(age.has_filter());
}
