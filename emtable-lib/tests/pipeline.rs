use std::sync::Arc;
use std::sync::Mutex;

use emtable_lib::TableError;
use emtable_lib::model::Fields;
use emtable_lib::model::FilterState;
use emtable_lib::model::PageState;
use emtable_lib::model::PageVm;
use emtable_lib::model::SortDirection;
use emtable_lib::model::SortState;
use emtable_lib::model::Value;
use emtable_lib::operators::Pipeline;
use emtable_lib::reactive::State;
use emtable_lib::reactive::of;

#[derive(Debug, Clone, PartialEq)]
struct Row {
    id: u32,
    n: &'static str,
}

fn row(id: u32, n: &'static str) -> Row {
    Row { id, n }
}

fn fields() -> Fields<Row> {
    Fields::new().field("n", |r: &Row| Value::from(r.n))
}

fn ids(rows: &[Row]) -> Vec<u32> {
    rows.iter().map(|r| r.id).collect()
}

type Pages = Arc<Mutex<Vec<Result<PageVm<Row>, TableError>>>>;

fn collect(pipeline: Pipeline<Row>, page: &State<PageState>) -> (Pages, emtable_lib::reactive::Subscription) {
    let seen: Pages = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let subscription = pipeline
        .paginate(page.stream())
        .subscribe(move |vm| sink.lock().unwrap().push(vm.clone()));
    (seen, subscription)
}

#[test]
fn test_sort_then_paginate() {
    let rows = vec![row(1, "b"), row(2, "a"), row(3, "c")];
    let page = State::new(PageState::new(2, 1));
    let pipeline = Pipeline::new(of(rows), fields()).sort(of(SortState::ascending("n")));
    let (seen, _subscription) = collect(pipeline, &page);

    let seen = seen.lock().unwrap();
    let vm = seen.last().unwrap().as_ref().unwrap();
    assert_eq!(vm.item_count, 3);
    assert_eq!(ids(&vm.data), vec![2, 1]);
}

#[test]
fn test_page_change_reslices() {
    let rows = vec![row(1, "b"), row(2, "a"), row(3, "c")];
    let page = State::new(PageState::new(2, 1));
    let pipeline = Pipeline::new(of(rows), fields()).sort(of(SortState::ascending("n")));
    let (seen, _subscription) = collect(pipeline, &page);

    page.set(PageState::new(2, 2));
    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 2);
    let vm = seen[1].as_ref().unwrap();
    assert_eq!(ids(&vm.data), vec![3]);
    assert_eq!(vm.page_number, 2);
}

#[test]
fn test_sort_direction_none_keeps_order() {
    let rows = vec![row(1, "b"), row(2, "a"), row(3, "c")];
    let page = State::new(PageState::new(10, 1));
    let pipeline =
        Pipeline::new(of(rows), fields()).sort(of(SortState::new("n", SortDirection::None)));
    let (seen, _subscription) = collect(pipeline, &page);

    let seen = seen.lock().unwrap();
    assert_eq!(ids(&seen[0].as_ref().unwrap().data), vec![1, 2, 3]);
}

#[test]
fn test_pages_cover_every_row_once() {
    let rows: Vec<Row> = (0..23).map(|i| row(i, "x")).collect();
    let page = State::new(PageState::new(5, 1));
    let (seen, _subscription) = collect(Pipeline::new(of(rows), fields()), &page);

    for number in 2..=6 {
        page.set(PageState::new(5, number));
    }

    let seen = seen.lock().unwrap();
    let lengths: Vec<usize> = seen.iter().map(|vm| vm.as_ref().unwrap().data.len()).collect();
    assert_eq!(lengths, vec![5, 5, 5, 5, 3, 0]);
    let all: Vec<u32> = seen.iter().flat_map(|vm| ids(&vm.as_ref().unwrap().data)).collect();
    assert_eq!(all, (0..23).collect::<Vec<_>>());
}

#[test]
fn test_filter_is_idempotent_subset() {
    let rows = vec![row(1, "alpha"), row(2, "beta"), row(3, "gamma"), row(4, "Alpine")];
    let filters = vec![FilterState::text("n", "AL")];
    let page = State::new(PageState::new(10, 1));

    let once = Pipeline::new(of(rows.clone()), fields()).filter(of(filters.clone()));
    let (first, _first) = collect(once, &page);
    let filtered = first.lock().unwrap()[0].as_ref().unwrap().data.clone();
    assert_eq!(ids(&filtered), vec![1, 4]);
    assert!(filtered.iter().all(|r| rows.contains(r)));

    let twice = Pipeline::new(of(filtered.clone()), fields()).filter(of(filters));
    let (second, _second) = collect(twice, &page);
    assert_eq!(second.lock().unwrap()[0].as_ref().unwrap().data, filtered);
}

#[test]
fn test_unknown_field_reports_error() {
    let page = State::new(PageState::new(10, 1));
    let pipeline = Pipeline::new(of(vec![row(1, "a")]), fields()).sort(of(SortState::ascending("missing")));
    let (seen, _subscription) = collect(pipeline, &page);

    let seen = seen.lock().unwrap();
    assert!(seen[0].is_err());
}
