//! Column header configuration and derived header state.

use serde::Deserialize;
use serde::Serialize;

use super::FilterConfig;
use super::FilterState;
use super::SortDirection;
use super::SortState;

/// Static configuration of one column.
///
/// # Example
///
/// ```
/// use emtable_lib::model::{FilterConfig, FilterKind, HeaderConfig};
///
/// let name = HeaderConfig::new("name", "Name")
///     .sortable()
///     .with_filter(FilterConfig::new(FilterKind::Text))
///     .with_class("name");
/// assert!(name.is_sortable);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderConfig {
    /// Field id of the column; matches `field_id` of sort and filter states.
    pub id: String,
    /// Column title, if the column shows one.
    #[serde(default)]
    pub title: Option<String>,
    /// Whether the header toggles sorting.
    #[serde(default)]
    pub is_sortable: bool,
    /// Filter offered by the column.
    #[serde(default)]
    pub filter: Option<FilterConfig>,
    /// Extra styling hook for the rendering layer.
    #[serde(default)]
    pub class: Option<String>,
}

impl HeaderConfig {
    /// Creates an unsortable, unfiltered column.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: Some(title.into()),
            is_sortable: false,
            filter: None,
            class: None,
        }
    }

    /// Creates a column without a title.
    pub fn untitled(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: None,
            is_sortable: false,
            filter: None,
            class: None,
        }
    }

    /// Marks the column as sortable.
    pub fn sortable(mut self) -> Self {
        self.is_sortable = true;
        self
    }

    /// Sets the column's filter.
    pub fn with_filter(mut self, filter: FilterConfig) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Sets the column's styling class.
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }
}

/// Live sort and filter state overlaid on a column's configuration.
///
/// Derived fresh on every change; `filter` is `None` unless an active filter
/// targets the column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderState {
    /// Static column configuration.
    pub config: HeaderConfig,
    /// Current sort direction of this column.
    pub sort_direction: SortDirection,
    /// Active filter on this column.
    pub filter: Option<FilterState>,
}

impl HeaderState {
    /// Overlays `sort` and `filters` onto `config`.
    pub fn overlay(config: &HeaderConfig, sort: Option<&SortState>, filters: &[FilterState]) -> Self {
        let sort_direction = sort
            .filter(|s| s.field_id == config.id)
            .map(|s| s.direction)
            .unwrap_or_default();
        let filter = filters
            .iter()
            .find(|f| f.field_id() == config.id)
            .filter(|f| f.has_value())
            .cloned();
        Self {
            config: config.clone(),
            sort_direction,
            filter,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FilterKind;

    #[test]
    fn test_overlay_picks_matching_column() {
        let config = HeaderConfig::new("age", "Age").sortable();
        let sort = SortState::descending("age");
        let filters = vec![FilterState::text("name", "a"), FilterState::text("age", "4")];

        let state = HeaderState::overlay(&config, Some(&sort), &filters);
        assert_eq!(state.sort_direction, SortDirection::Descending);
        assert_eq!(state.filter, Some(FilterState::text("age", "4")));
    }

    #[test]
    fn test_overlay_hides_inactive_filter() {
        let config = HeaderConfig::new("age", "Age").with_filter(FilterConfig::new(FilterKind::Text));
        let sort = SortState::ascending("name");
        let filters = vec![FilterState::text("age", "")];

        let state = HeaderState::overlay(&config, Some(&sort), &filters);
        assert_eq!(state.sort_direction, SortDirection::None);
        assert_eq!(state.filter, None);
    }
}
