//! Filter operator

use std::sync::Arc;

use super::FilterOverrides;
use crate::error::Result;
use crate::model::Fields;
use crate::model::FilterState;
use crate::reactive::Item;
use crate::reactive::Stream;
use crate::reactive::combine_latest2;
use crate::util::table::apply_filter;

/// Folds `filters` over `rows` in order.
///
/// A filter whose field has an override is handed to the override, active
/// or not; every other filter goes through
/// [`apply_filter`](crate::util::table::apply_filter).
pub fn filter_rows<T: Clone>(
    rows: &[T],
    filters: &[FilterState],
    fields: &Fields<T>,
    overrides: &FilterOverrides<T>,
) -> Result<Vec<T>> {
    let mut filtered = rows.to_vec();
    for filter in filters {
        filtered = match overrides.get(filter.field_id()) {
            Some(transform) => transform(&filtered, filter)?,
            None => apply_filter(&filtered, filter, fields)?,
        };
    }
    Ok(filtered)
}

/// Re-filters the latest rows whenever either the rows or the filter set
/// change.
///
/// Without a filter stream the rows pass through untouched. Errors from
/// upstream are forwarded as-is.
pub fn filter<T: Item>(
    rows: &Stream<Result<Vec<T>>>,
    filters: Option<&Stream<Vec<FilterState>>>,
    fields: Arc<Fields<T>>,
    overrides: Arc<FilterOverrides<T>>,
) -> Stream<Result<Vec<T>>> {
    let Some(filters) = filters else {
        return rows.clone();
    };

    combine_latest2(rows, filters).map(move |(rows, filters)| {
        let rows = rows.as_ref().map_err(Clone::clone)?;
        let filtered = filter_rows(rows, filters, &fields, &overrides);
        if let Ok(kept) = &filtered {
            log::trace!(
                "[pipeline] {} filters kept {} of {} rows",
                filters.len(),
                kept.len(),
                rows.len()
            );
        }
        filtered
    })
}
