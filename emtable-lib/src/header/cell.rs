//! Headless editor state of one column header

use crate::model::Day;
use crate::model::FilterKind;
use crate::model::FilterState;
use crate::model::HeaderConfig;
use crate::model::HeaderState;
use crate::model::SortDirection;
use crate::model::SortState;
use crate::model::Value;

/// Editing controls of a single column header.
///
/// Holds what a rendering layer shows in a column's sort toggle and filter
/// popup: the pending control values, whether a filter is applied and the
/// short label summarizing it. The cell never talks to a
/// [`HeaderRow`](super::HeaderRow) itself; the returned sort and filter
/// states are meant to be forwarded as edits.
///
/// # Example
///
/// ```
/// use emtable_lib::header::HeaderCell;
/// use emtable_lib::model::{Day, FilterConfig, FilterKind, FilterState, HeaderConfig};
///
/// let config = HeaderConfig::new("joined", "Joined").with_filter(FilterConfig::new(FilterKind::DateRange));
/// let mut cell = HeaderCell::new(config);
///
/// cell.set_from(Some(Day::new(2024, 3, 1)));
/// let edit = cell.apply().unwrap();
/// assert_eq!(edit, FilterState::date_range("joined", Some(Day::new(2024, 3, 1)), None));
/// assert_eq!(cell.label(), Some(">= 3/1/2024"));
///
/// cell.set_to(Some(Day::new(2024, 2, 1)));
/// assert!(cell.apply().is_none());
/// assert!(cell.has_date_range_error());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderCell {
    config: HeaderConfig,
    sort_direction: SortDirection,
    text: String,
    selected: Value,
    checked: Vec<Value>,
    date: Option<Day>,
    from: Option<Day>,
    to: Option<Day>,
    has_filter: bool,
    has_date_range_error: bool,
    label: Option<String>,
}

impl HeaderCell {
    /// Creates a cell with empty controls.
    pub fn new(config: HeaderConfig) -> Self {
        Self {
            config,
            sort_direction: SortDirection::None,
            text: String::new(),
            selected: Value::Null,
            checked: Vec::new(),
            date: None,
            from: None,
            to: None,
            has_filter: false,
            has_date_range_error: false,
            label: None,
        }
    }

    /// The column this cell renders.
    pub fn config(&self) -> &HeaderConfig {
        &self.config
    }

    /// Current sort direction of the column.
    pub fn sort_direction(&self) -> SortDirection {
        self.sort_direction
    }

    /// Whether the last applied or loaded filter constrains anything.
    pub fn has_filter(&self) -> bool {
        self.has_filter
    }

    /// Whether the last [`apply`](HeaderCell::apply) was rejected because
    /// the range starts after it ends.
    pub fn has_date_range_error(&self) -> bool {
        self.has_date_range_error
    }

    /// Summary of the applied filter, as shown next to the column title.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Pending text filter input.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Pending dropdown or radio selection; `Null` when nothing is picked.
    pub fn selected(&self) -> &Value {
        &self.selected
    }

    /// Pending checkbox values, in the order they were checked.
    pub fn checked(&self) -> &[Value] {
        &self.checked
    }

    /// Pending exact-day selection.
    pub fn date(&self) -> Option<Day> {
        self.date
    }

    /// Pending lower bound of the date range.
    pub fn range_from(&self) -> Option<Day> {
        self.from
    }

    /// Pending upper bound of the date range.
    pub fn range_to(&self) -> Option<Day> {
        self.to
    }

    /// Moves the sort to the next direction (none, ascending, descending).
    ///
    /// Returns the new sort, or `None` when the column is not sortable.
    pub fn toggle_sort(&mut self) -> Option<SortState> {
        if !self.config.is_sortable {
            return None;
        }
        self.sort_direction = self.sort_direction.next();
        Some(SortState::new(self.config.id.as_str(), self.sort_direction))
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Picks the option of a dropdown or radio filter.
    pub fn select(&mut self, key: impl Into<Value>) {
        self.selected = key.into();
    }

    /// Checks an unchecked checkbox option, or unchecks a checked one.
    pub fn toggle_option(&mut self, key: impl Into<Value>) {
        let key = key.into();
        match self.checked.iter().position(|checked| *checked == key) {
            Some(idx) => {
                self.checked.remove(idx);
            }
            None => self.checked.push(key),
        }
    }

    pub fn set_date(&mut self, date: Option<Day>) {
        self.date = date;
    }

    pub fn set_from(&mut self, from: Option<Day>) {
        self.from = from;
    }

    pub fn set_to(&mut self, to: Option<Day>) {
        self.to = to;
    }

    /// Loads state produced elsewhere without producing an edit.
    ///
    /// The sort direction always follows `state`. Controls are only
    /// overwritten when `state` carries a filter, so pending input survives
    /// a refresh that has no filter for this column.
    pub fn set_state(&mut self, state: &HeaderState) {
        self.config = state.config.clone();
        self.sort_direction = state.sort_direction;
        let Some(filter) = &state.filter else {
            return;
        };
        match filter {
            FilterState::Text { value, .. } => self.text = value.clone().unwrap_or_default(),
            FilterState::Dropdown { value, .. } | FilterState::Radio { value, .. } => self.selected = value.clone(),
            FilterState::Checkbox { values, .. } => self.checked = values.clone(),
            FilterState::Date { value, .. } => self.date = *value,
            FilterState::DateRange { from, to, .. } => {
                self.from = *from;
                self.to = *to;
            }
        }
        self.refresh();
    }

    /// Validates the controls and returns the filter to emit.
    ///
    /// Returns `None` when the column has no filter, or when a date range
    /// starts after it ends; the latter sets
    /// [`has_date_range_error`](HeaderCell::has_date_range_error).
    pub fn apply(&mut self) -> Option<FilterState> {
        let filter = self.current_filter()?;
        if let FilterState::DateRange {
            from: Some(from),
            to: Some(to),
            ..
        } = &filter
            && from > to
        {
            self.has_date_range_error = true;
            return None;
        }
        self.has_date_range_error = false;
        self.refresh();
        Some(filter)
    }

    /// Empties every control, then applies.
    pub fn clear(&mut self) -> Option<FilterState> {
        self.config.filter.as_ref()?;
        self.text.clear();
        self.selected = Value::Null;
        self.checked.clear();
        self.date = None;
        self.from = None;
        self.to = None;
        self.apply()
    }

    /// The filter described by the current controls.
    pub fn current_filter(&self) -> Option<FilterState> {
        let kind = self.config.filter.as_ref()?.kind;
        let field_id = self.config.id.clone();
        let filter = match kind {
            FilterKind::Text => FilterState::Text {
                field_id,
                value: Some(self.text.clone()).filter(|text| !text.is_empty()),
            },
            FilterKind::Dropdown => FilterState::Dropdown {
                field_id,
                value: self.selected.clone(),
            },
            FilterKind::Radio => FilterState::Radio {
                field_id,
                value: self.selected.clone(),
            },
            FilterKind::Checkbox => FilterState::Checkbox {
                field_id,
                values: self.checked.clone(),
            },
            FilterKind::Date => FilterState::Date {
                field_id,
                value: self.date,
            },
            FilterKind::DateRange => FilterState::DateRange {
                field_id,
                from: self.from,
                to: self.to,
            },
        };
        Some(filter)
    }

    fn refresh(&mut self) {
        let Some(filter) = self.current_filter() else {
            return;
        };
        self.has_filter = filter.has_value();
        self.label = self.describe(&filter);
    }

    fn describe(&self, filter: &FilterState) -> Option<String> {
        let option_name = |key: &Value| {
            self.config
                .filter
                .as_ref()
                .and_then(|config| config.option(key))
                .map(|option| option.value.clone())
        };
        match filter {
            FilterState::Text { value, .. } => value.clone(),
            FilterState::Dropdown { value, .. } | FilterState::Radio { value, .. } => option_name(value),
            FilterState::Checkbox { values, .. } => {
                let options = self.config.filter.as_ref().map(|config| config.options.as_slice()).unwrap_or_default();
                let names: Vec<&str> = options
                    .iter()
                    .filter(|option| values.iter().any(|value| option.key.loose_eq(value)))
                    .map(|option| option.value.as_str())
                    .collect();
                Some(names.join(", "))
            }
            FilterState::Date { value, .. } => value.map(|day| day.to_string()),
            FilterState::DateRange { from, to, .. } => match (from, to) {
                (Some(from), Some(to)) => Some(format!("{from} - {to}")),
                (Some(from), None) => Some(format!(">= {from}")),
                (None, Some(to)) => Some(format!("<= {to}")),
                (None, None) => None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FilterConfig;
    use crate::model::FilterOption;

    fn options(kind: FilterKind) -> HeaderConfig {
        HeaderConfig::new("role", "Role").with_filter(FilterConfig::with_options(
            kind,
            [
                FilterOption::new(0, "Admin"),
                FilterOption::new(1, "Editor"),
                FilterOption::new(2, "Viewer"),
            ],
        ))
    }

    #[test]
    fn test_toggle_sort_cycles() {
        let mut cell = HeaderCell::new(HeaderConfig::new("name", "Name").sortable());
        assert_eq!(cell.toggle_sort(), Some(SortState::ascending("name")));
        assert_eq!(cell.toggle_sort(), Some(SortState::descending("name")));
        assert_eq!(cell.toggle_sort(), Some(SortState::new("name", SortDirection::None)));

        let mut fixed = HeaderCell::new(HeaderConfig::new("id", "Id"));
        assert_eq!(fixed.toggle_sort(), None);
        assert_eq!(fixed.sort_direction(), SortDirection::None);
    }

    #[test]
    fn test_text_apply_and_clear() {
        let mut cell = HeaderCell::new(
            HeaderConfig::new("name", "Name").with_filter(FilterConfig::new(FilterKind::Text)),
        );
        cell.set_text("ann");
        assert_eq!(cell.apply(), Some(FilterState::text("name", "ann")));
        assert!(cell.has_filter());
        assert_eq!(cell.label(), Some("ann"));

        let cleared = cell.clear().unwrap();
        assert!(!cleared.has_value());
        assert!(!cell.has_filter());
        assert_eq!(cell.text(), "");
    }

    #[test]
    fn test_dropdown_label_uses_option_name() {
        let mut cell = HeaderCell::new(options(FilterKind::Dropdown));
        cell.select("1");
        let edit = cell.apply().unwrap();
        assert_eq!(edit, FilterState::dropdown("role", "1"));
        assert_eq!(cell.label(), Some("Editor"));
    }

    #[test]
    fn test_checkbox_toggle_and_label() {
        let mut cell = HeaderCell::new(options(FilterKind::Checkbox));
        cell.toggle_option(2);
        cell.toggle_option(0);
        cell.toggle_option(1);
        cell.toggle_option(1);
        assert_eq!(cell.checked(), &[Value::from(2), Value::from(0)]);

        cell.apply();
        assert_eq!(cell.label(), Some("Admin, Viewer"));
    }

    #[test]
    fn test_date_label() {
        let mut cell =
            HeaderCell::new(HeaderConfig::new("d", "Day").with_filter(FilterConfig::new(FilterKind::Date)));
        cell.set_date(Some(Day::new(2023, 11, 5)));
        assert_eq!(cell.apply(), Some(FilterState::date("d", Day::new(2023, 11, 5))));
        assert_eq!(cell.label(), Some("11/5/2023"));
    }

    #[test]
    fn test_date_range_labels_and_validation() {
        let mut cell = HeaderCell::new(
            HeaderConfig::new("d", "Day").with_filter(FilterConfig::new(FilterKind::DateRange)),
        );
        cell.set_to(Some(Day::new(2020, 1, 31)));
        cell.apply();
        assert_eq!(cell.label(), Some("<= 1/31/2020"));

        cell.set_from(Some(Day::new(2020, 1, 1)));
        cell.apply();
        assert_eq!(cell.label(), Some("1/1/2020 - 1/31/2020"));

        cell.set_from(Some(Day::new(2020, 2, 1)));
        assert_eq!(cell.apply(), None);
        assert!(cell.has_date_range_error());
        // label still shows the last accepted range
        assert_eq!(cell.label(), Some("1/1/2020 - 1/31/2020"));

        cell.set_from(None);
        assert!(cell.apply().is_some());
        assert!(!cell.has_date_range_error());
    }

    #[test]
    fn test_set_state_loads_without_edit() {
        let config = options(FilterKind::Radio);
        let mut cell = HeaderCell::new(config.clone());
        let state = HeaderState {
            config,
            sort_direction: SortDirection::Descending,
            filter: Some(FilterState::radio("role", 2)),
        };
        cell.set_state(&state);
        assert_eq!(cell.sort_direction(), SortDirection::Descending);
        assert_eq!(cell.selected(), &Value::from(2));
        assert!(cell.has_filter());
        assert_eq!(cell.label(), Some("Viewer"));
    }

    #[test]
    fn test_clear_without_filter_config() {
        let mut cell = HeaderCell::new(HeaderConfig::new("id", "Id"));
        assert_eq!(cell.clear(), None);
        assert_eq!(cell.apply(), None);
    }
}
