//! Sort operator

use std::sync::Arc;

use super::SortOverrides;
use crate::error::Result;
use crate::model::Fields;
use crate::model::SortState;
use crate::reactive::Item;
use crate::reactive::Stream;
use crate::reactive::combine_latest2;
use crate::util::table::apply_sort;

/// Sorts a copy of `rows` by `sort`.
///
/// No sort keeps the original order. A field with an override is handed to
/// the override whatever the direction.
pub fn sort_rows<T: Clone>(
    rows: &[T],
    sort: Option<&SortState>,
    fields: &Fields<T>,
    overrides: &SortOverrides<T>,
) -> Result<Vec<T>> {
    let Some(sort) = sort else {
        return Ok(rows.to_vec());
    };
    match overrides.get(&sort.field_id) {
        Some(transform) => transform(rows, sort),
        None => Ok(apply_sort(rows, sort, fields)?),
    }
}

/// Re-sorts the latest rows whenever either the rows or the sort change.
///
/// Accepts a stream of `SortState` or `Option<SortState>`.
pub fn sort<T, S>(
    rows: &Stream<Result<Vec<T>>>,
    sort: &Stream<S>,
    fields: Arc<Fields<T>>,
    overrides: Arc<SortOverrides<T>>,
) -> Stream<Result<Vec<T>>>
where
    T: Item,
    S: Item + Into<Option<SortState>>,
{
    let sort = sort.map(|state: &S| -> Option<SortState> { state.clone().into() });
    combine_latest2(rows, &sort).map(move |(rows, sort)| {
        let rows = rows.as_ref().map_err(Clone::clone)?;
        let sorted = sort_rows(rows, sort.as_ref(), &fields, &overrides);
        if let Some(sort) = sort {
            log::trace!("[pipeline] Sorted {} rows by '{}' {:?}", rows.len(), sort.field_id, sort.direction);
        }
        sorted
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SortDirection;
    use crate::model::Value;
    use crate::reactive::State;
    use crate::reactive::of;

    type Row = (u32, i64);

    fn fields() -> Arc<Fields<Row>> {
        Arc::new(Fields::new().field("n", |r: &Row| Value::from(r.1)))
    }

    fn rows() -> Vec<Row> {
        vec![(1, 3), (2, 1), (3, 2), (4, 1)]
    }

    fn ids(rows: &[Row]) -> Vec<u32> {
        rows.iter().map(|r| r.0).collect()
    }

    #[test]
    fn test_none_direction_keeps_order() {
        let sort = SortState::new("n", SortDirection::None);
        let sorted = sort_rows(&rows(), Some(&sort), &fields(), &SortOverrides::new()).unwrap();
        assert_eq!(sorted, rows());
        assert_eq!(sort_rows(&rows(), None, &fields(), &SortOverrides::new()).unwrap(), rows());
    }

    #[test]
    fn test_directions_are_reverse_without_ties() {
        let distinct: Vec<Row> = vec![(1, 3), (2, 1), (3, 2)];
        let asc = sort_rows(&distinct, Some(&SortState::ascending("n")), &fields(), &SortOverrides::new()).unwrap();
        let desc = sort_rows(&distinct, Some(&SortState::descending("n")), &fields(), &SortOverrides::new()).unwrap();
        assert_eq!(ids(&asc), vec![2, 3, 1]);
        let mut reversed = ids(&desc);
        reversed.reverse();
        assert_eq!(ids(&asc), reversed);
    }

    #[test]
    fn test_operator_follows_sort_changes() {
        let source = of(Ok(rows()));
        let state = State::new(SortState::ascending("n"));
        let stream = sort(&source, &state.stream(), fields(), Arc::new(SortOverrides::new()));

        let latest = State::new(Vec::new());
        let sink = latest.clone();
        let _subscription = stream.subscribe(move |result: &Result<Vec<Row>>| {
            if let Ok(rows) = result {
                sink.set(ids(rows));
            }
        });
        assert_eq!(latest.get(), vec![2, 4, 3, 1]);

        state.set(SortState::descending("n"));
        assert_eq!(latest.get(), vec![1, 3, 2, 4]);
    }

    #[test]
    fn test_override_replaces_builtin_sort() {
        let overrides = SortOverrides::new().with("n", |rows: &[Row], _: &SortState| {
            let mut by_id = rows.to_vec();
            by_id.sort_by(|a, b| b.0.cmp(&a.0));
            Ok(by_id)
        });
        let sorted = sort_rows(&rows(), Some(&SortState::ascending("n")), &fields(), &overrides).unwrap();
        assert_eq!(ids(&sorted), vec![4, 3, 2, 1]);
    }
}
