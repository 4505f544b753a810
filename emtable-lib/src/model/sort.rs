//! Sort state types.

use serde::Deserialize;
use serde::Serialize;

/// Sort direction of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortDirection {
    /// Original row order.
    #[default]
    None,
    /// Ascending order (A-Z, 0-9), nulls first.
    Ascending,
    /// Descending order (Z-A, 9-0), nulls last.
    Descending,
}

impl SortDirection {
    /// The direction a header toggle moves to next:
    /// none -> ascending -> descending -> none.
    pub fn next(self) -> Self {
        match self {
            SortDirection::None => SortDirection::Ascending,
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::None,
        }
    }
}

/// The single active sort of a table.
///
/// Replaced wholesale whenever either the hosting application or a column
/// header changes it.
///
/// # Example
///
/// ```
/// use emtable_lib::model::{SortDirection, SortState};
///
/// let sort = SortState::ascending("name");
/// assert_eq!(sort.direction, SortDirection::Ascending);
/// assert!(!SortState::new("name", SortDirection::None).is_active());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortState {
    /// Field to sort by.
    pub field_id: String,
    /// Sort direction.
    pub direction: SortDirection,
}

impl SortState {
    /// Creates a sort state.
    pub fn new(field_id: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field_id: field_id.into(),
            direction,
        }
    }

    /// Creates an ascending sort on a field.
    pub fn ascending(field_id: impl Into<String>) -> Self {
        Self::new(field_id, SortDirection::Ascending)
    }

    /// Creates a descending sort on a field.
    pub fn descending(field_id: impl Into<String>) -> Self {
        Self::new(field_id, SortDirection::Descending)
    }

    /// Returns `true` unless the direction is [`SortDirection::None`].
    pub fn is_active(&self) -> bool {
        self.direction != SortDirection::None
    }
}
