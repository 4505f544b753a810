//! Filter state and filter configuration types.

use serde::Deserialize;
use serde::Serialize;

use super::Day;
use super::Value;

/// The closed set of filter kinds a column can offer.
///
/// Adding a kind means updating [`FilterState`], the filter engine in
/// [`util::table`](crate::util::table) and any UI collaborator together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterKind {
    /// Free text, case-insensitive substring match.
    Text,
    /// Single option picked from a list.
    Dropdown,
    /// Any number of options picked from a list.
    Checkbox,
    /// Single option picked from a list of radio buttons.
    Radio,
    /// A single calendar day.
    Date,
    /// An inclusive range of calendar days, either end optional.
    DateRange,
}

/// The live filter applied to one field.
///
/// A filter whose value is absent or empty is *inactive*: the filter engine
/// passes rows through untouched and the header synchronizer drops it from
/// the filter set. [`FilterState::has_value`] is the single predicate for
/// both.
///
/// # Example
///
/// ```
/// use emtable_lib::model::{Day, FilterState, Value};
///
/// let text = FilterState::text("name", "ann");
/// assert!(text.has_value());
///
/// let range = FilterState::date_range("lastLogin", Some(Day::new(2024, 1, 1)), None);
/// assert!(range.has_value());
///
/// let cleared = text.cleared();
/// assert!(!cleared.has_value());
/// assert_eq!(cleared.field_id(), "name");
///
/// let json = serde_json::to_string(&FilterState::dropdown("role", Value::from(1))).unwrap();
/// assert_eq!(json, r#"{"type":"dropdown","fieldId":"role","value":1}"#);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum FilterState {
    /// Case-insensitive substring filter.
    Text {
        field_id: String,
        #[serde(default)]
        value: Option<String>,
    },
    /// Single value, loosely compared.
    Dropdown {
        field_id: String,
        #[serde(default)]
        value: Value,
    },
    /// Set membership.
    Checkbox {
        field_id: String,
        #[serde(default)]
        values: Vec<Value>,
    },
    /// Single value, loosely compared.
    Radio {
        field_id: String,
        #[serde(default)]
        value: Value,
    },
    /// Exact calendar day.
    Date {
        field_id: String,
        #[serde(default)]
        value: Option<Day>,
    },
    /// Inclusive day range; a missing bound is open.
    DateRange {
        field_id: String,
        #[serde(default)]
        from: Option<Day>,
        #[serde(default)]
        to: Option<Day>,
    },
}

impl FilterState {
    /// Creates a text filter.
    pub fn text(field_id: impl Into<String>, value: impl Into<String>) -> Self {
        FilterState::Text {
            field_id: field_id.into(),
            value: Some(value.into()),
        }
    }

    /// Creates a dropdown filter.
    pub fn dropdown(field_id: impl Into<String>, value: impl Into<Value>) -> Self {
        FilterState::Dropdown {
            field_id: field_id.into(),
            value: value.into(),
        }
    }

    /// Creates a checkbox filter.
    pub fn checkbox(field_id: impl Into<String>, values: impl IntoIterator<Item = impl Into<Value>>) -> Self {
        FilterState::Checkbox {
            field_id: field_id.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates a radio filter.
    pub fn radio(field_id: impl Into<String>, value: impl Into<Value>) -> Self {
        FilterState::Radio {
            field_id: field_id.into(),
            value: value.into(),
        }
    }

    /// Creates a single-day filter.
    pub fn date(field_id: impl Into<String>, value: Day) -> Self {
        FilterState::Date {
            field_id: field_id.into(),
            value: Some(value),
        }
    }

    /// Creates a day range filter.
    pub fn date_range(field_id: impl Into<String>, from: Option<Day>, to: Option<Day>) -> Self {
        FilterState::DateRange {
            field_id: field_id.into(),
            from,
            to,
        }
    }

    /// Creates an inactive filter of the given kind.
    pub fn empty(kind: FilterKind, field_id: impl Into<String>) -> Self {
        let field_id = field_id.into();
        match kind {
            FilterKind::Text => FilterState::Text { field_id, value: None },
            FilterKind::Dropdown => FilterState::Dropdown {
                field_id,
                value: Value::Null,
            },
            FilterKind::Checkbox => FilterState::Checkbox {
                field_id,
                values: Vec::new(),
            },
            FilterKind::Radio => FilterState::Radio {
                field_id,
                value: Value::Null,
            },
            FilterKind::Date => FilterState::Date { field_id, value: None },
            FilterKind::DateRange => FilterState::DateRange {
                field_id,
                from: None,
                to: None,
            },
        }
    }

    /// Returns the field this filter applies to.
    pub fn field_id(&self) -> &str {
        match self {
            FilterState::Text { field_id, .. }
            | FilterState::Dropdown { field_id, .. }
            | FilterState::Checkbox { field_id, .. }
            | FilterState::Radio { field_id, .. }
            | FilterState::Date { field_id, .. }
            | FilterState::DateRange { field_id, .. } => field_id,
        }
    }

    /// Returns the kind of this filter.
    pub fn kind(&self) -> FilterKind {
        match self {
            FilterState::Text { .. } => FilterKind::Text,
            FilterState::Dropdown { .. } => FilterKind::Dropdown,
            FilterState::Checkbox { .. } => FilterKind::Checkbox,
            FilterState::Radio { .. } => FilterKind::Radio,
            FilterState::Date { .. } => FilterKind::Date,
            FilterState::DateRange { .. } => FilterKind::DateRange,
        }
    }

    /// Returns `true` if the filter constrains anything.
    ///
    /// - text: a non-empty string
    /// - dropdown / radio: a value that is neither null nor an empty string
    /// - checkbox: at least one value
    /// - date: a day
    /// - date range: at least one bound
    pub fn has_value(&self) -> bool {
        match self {
            FilterState::Text { value, .. } => value.as_deref().is_some_and(|v| !v.is_empty()),
            FilterState::Dropdown { value, .. } | FilterState::Radio { value, .. } => !value.is_blank(),
            FilterState::Checkbox { values, .. } => !values.is_empty(),
            FilterState::Date { value, .. } => value.is_some(),
            FilterState::DateRange { from, to, .. } => from.is_some() || to.is_some(),
        }
    }

    /// Returns the inactive filter of the same kind on the same field.
    pub fn cleared(&self) -> Self {
        FilterState::empty(self.kind(), self.field_id())
    }
}

/// A selectable option of a dropdown, checkbox or radio filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterOption {
    /// Value compared against row fields.
    pub key: Value,
    /// Display name.
    pub value: String,
}

impl FilterOption {
    /// Creates a new option.
    pub fn new(key: impl Into<Value>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Static filter configuration of a column.
///
/// `options` is only meaningful for dropdown, checkbox and radio filters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// The kind of filter the column offers.
    #[serde(rename = "type")]
    pub kind: FilterKind,
    /// Selectable options, in display order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<FilterOption>,
}

impl FilterConfig {
    /// Creates a filter config without options.
    pub fn new(kind: FilterKind) -> Self {
        Self {
            kind,
            options: Vec::new(),
        }
    }

    /// Creates a filter config with options.
    pub fn with_options(kind: FilterKind, options: impl IntoIterator<Item = FilterOption>) -> Self {
        Self {
            kind,
            options: options.into_iter().collect(),
        }
    }

    /// Looks up the option whose key loosely equals `key`.
    pub fn option(&self, key: &Value) -> Option<&FilterOption> {
        self.options.iter().find(|option| option.key.loose_eq(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_value_per_kind() {
        assert!(!FilterState::text("a", "").has_value());
        assert!(!FilterState::empty(FilterKind::Text, "a").has_value());
        assert!(FilterState::text("a", " ").has_value());

        assert!(!FilterState::dropdown("a", "").has_value());
        assert!(!FilterState::radio("a", Value::Null).has_value());
        assert!(FilterState::radio("a", 0).has_value());

        assert!(!FilterState::checkbox("a", Vec::<Value>::new()).has_value());
        assert!(FilterState::checkbox("a", [1]).has_value());

        assert!(!FilterState::empty(FilterKind::Date, "a").has_value());
        assert!(!FilterState::date_range("a", None, None).has_value());
        assert!(FilterState::date_range("a", None, Some(Day::new(2020, 1, 1))).has_value());
    }

    #[test]
    fn test_cleared_keeps_kind_and_field() {
        let filter = FilterState::checkbox("status", [0, 1]);
        let cleared = filter.cleared();
        assert_eq!(cleared.kind(), FilterKind::Checkbox);
        assert_eq!(cleared.field_id(), "status");
        assert!(!cleared.has_value());
    }

    #[test]
    fn test_serde_shape() {
        let filter = FilterState::date_range("d", Some(Day::new(2020, 1, 2)), None);
        let json = serde_json::to_value(&filter).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": "dateRange",
                "fieldId": "d",
                "from": { "year": 2020, "month": 1, "day": 2 },
                "to": null
            })
        );

        let parsed: FilterState = serde_json::from_str(r#"{"type":"text","fieldId":"name"}"#).unwrap();
        assert_eq!(parsed, FilterState::empty(FilterKind::Text, "name"));
    }

    #[test]
    fn test_option_lookup_is_loose() {
        let config = FilterConfig::with_options(
            FilterKind::Dropdown,
            [FilterOption::new(0, "Admin"), FilterOption::new(1, "Editor")],
        );
        assert_eq!(config.option(&Value::from("1")).map(|o| o.value.as_str()), Some("Editor"));
        assert!(config.option(&Value::from(7)).is_none());
    }
}
