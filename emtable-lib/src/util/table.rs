//! Filter engine and sort application over row collections.
//!
//! Both transforms are pure: they never mutate the input slice and always
//! return a fresh collection of cloned rows.

use crate::error::FieldError;
use crate::model::Day;
use crate::model::Fields;
use crate::model::FilterState;
use crate::model::SortDirection;
use crate::model::SortState;
use crate::model::Value;
use crate::util::array;
use crate::util::calendar::compare_day;

/// Applies a single filter to `rows`.
///
/// An inactive filter (see [`FilterState::has_value`]) passes every row
/// through. Otherwise rows are kept when their projected field matches:
///
/// | kind | match |
/// |------|-------|
/// | text | case-insensitive substring |
/// | dropdown, radio | [`Value::loose_eq`] |
/// | checkbox | field equals one of the selected values |
/// | date | field's calendar day equals the filter day |
/// | date range | field's calendar day within `[from, to]`, open bounds always satisfied; a null field only passes an upper bound |
///
/// # Errors
///
/// - [`FieldError::Missing`] when the filter names a field without accessor.
/// - [`FieldError::TypeMismatch`] when a date or date range filter meets a
///   non-null field that is not date-like.
///
/// # Example
///
/// ```
/// use emtable_lib::model::{Fields, FilterState, Value};
/// use emtable_lib::util::table::apply_filter;
///
/// let fields = Fields::new().field("name", |s: &&str| Value::from(*s));
/// let rows = vec!["Anna", "bob", "JOANNA"];
///
/// let kept = apply_filter(&rows, &FilterState::text("name", "ann"), &fields).unwrap();
/// assert_eq!(kept, vec!["Anna", "JOANNA"]);
/// ```
pub fn apply_filter<T: Clone>(rows: &[T], filter: &FilterState, fields: &Fields<T>) -> Result<Vec<T>, FieldError> {
    if !filter.has_value() {
        return Ok(rows.to_vec());
    }

    let field = filter.field_id();
    let accessor = fields.get(field).inspect_err(|_| {
        log::warn!("[filter] No accessor registered for field '{}'", field);
    })?;

    let mut kept = Vec::with_capacity(rows.len());
    for row in rows {
        if matches(&accessor(row), filter)? {
            kept.push(row.clone());
        }
    }

    log::trace!(
        "[filter] {:?} on '{}' kept {} of {} rows",
        filter.kind(),
        field,
        kept.len(),
        rows.len()
    );
    Ok(kept)
}

fn matches(value: &Value, filter: &FilterState) -> Result<bool, FieldError> {
    let matched = match filter {
        FilterState::Text { value: needle, .. } => {
            let needle = needle.as_deref().unwrap_or_default().to_lowercase();
            !value.is_null() && value.to_string().to_lowercase().contains(&needle)
        }
        FilterState::Dropdown { value: selected, .. } | FilterState::Radio { value: selected, .. } => {
            value.loose_eq(selected)
        }
        FilterState::Checkbox { values, .. } => values.contains(value),
        FilterState::Date { field_id, value: day } => match field_day(field_id, value)? {
            Some(field_day) => Some(field_day) == *day,
            None => false,
        },
        FilterState::DateRange { field_id, from, to } => {
            // a null field sorts before every day: it fails a lower bound
            // and satisfies an upper one
            let field_day = field_day(field_id, value)?;
            from.is_none_or(|from| compare_day(Some(&from), field_day.as_ref()).is_le())
                && to.is_none_or(|to| compare_day(Some(&to), field_day.as_ref()).is_ge())
        }
    };
    Ok(matched)
}

fn field_day(field: &str, value: &Value) -> Result<Option<Day>, FieldError> {
    if value.is_null() {
        return Ok(None);
    }
    value
        .to_day()
        .map(Some)
        .ok_or_else(|| FieldError::type_mismatch(field, "date", value.type_name()))
}

/// Sorts a copy of `rows` by one field.
///
/// A direction of [`SortDirection::None`] returns the rows in their
/// original order.
///
/// # Errors
///
/// [`FieldError::Missing`] when an active sort names a field without
/// accessor.
pub fn apply_sort<T: Clone>(rows: &[T], sort: &SortState, fields: &Fields<T>) -> Result<Vec<T>, FieldError> {
    let ascending = match sort.direction {
        SortDirection::None => return Ok(rows.to_vec()),
        SortDirection::Ascending => true,
        SortDirection::Descending => false,
    };

    let accessor = fields.get(&sort.field_id).inspect_err(|_| {
        log::warn!("[sort] No accessor registered for field '{}'", sort.field_id);
    })?;

    let mut sorted = rows.to_vec();
    array::sort(&mut sorted, |row| accessor(row), ascending);
    log::trace!("[sort] Sorted {} rows by '{}' {:?}", sorted.len(), sort.field_id, sort.direction);
    Ok(sorted)
}
