//! Table configuration

use std::time::Duration;

use serde::Deserialize;
use serde::Serialize;

use crate::error::ConfigError;
use crate::model::PageState;
use crate::model::SortState;

/// Configuration of a [`DataTable`](crate::DataTable).
///
/// Loadable from camelCase JSON; every key is optional.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use emtable_lib::TableConfig;
///
/// let config = TableConfig::from_json(r#"{ "pageSize": 25, "quietPeriodMs": 50 }"#).unwrap();
/// assert_eq!(config.page_size, 25);
/// assert_eq!(config.quiet_period, Duration::from_millis(50));
///
/// let config = TableConfig::default().with_page_size(5);
/// assert_eq!(config.initial_page().page_size, 5);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TableConfig {
    /// Quiet period after the last header filter edit before the filter
    /// change is emitted.
    ///
    /// Default: 10 milliseconds
    #[serde(rename = "quietPeriodMs", with = "duration_ms")]
    pub quiet_period: Duration,

    /// Rows per page.
    ///
    /// Default: 10
    pub page_size: usize,

    /// Page shown first, 1-indexed.
    ///
    /// Default: 1
    pub page_number: usize,

    /// Sort applied before any header edit.
    ///
    /// Default: none
    pub default_sort: Option<SortState>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            quiet_period: Duration::from_millis(10),
            page_size: 10,
            page_number: 1,
            default_sort: None,
        }
    }
}

impl TableConfig {
    /// Creates a new table config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses and validates a JSON config document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: TableConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the values describe a usable page.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::Invalid {
                key: "pageSize",
                message: "must be greater than 0".to_string(),
            });
        }
        if self.page_number == 0 {
            return Err(ConfigError::Invalid {
                key: "pageNumber",
                message: "pages are numbered from 1".to_string(),
            });
        }
        Ok(())
    }

    /// Sets the quiet period.
    pub fn with_quiet_period(mut self, quiet_period: Duration) -> Self {
        self.quiet_period = quiet_period;
        self
    }

    /// Sets the page size.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Sets the initial page number.
    pub fn with_page_number(mut self, page_number: usize) -> Self {
        self.page_number = page_number;
        self
    }

    /// Sets the initial sort.
    pub fn with_default_sort(mut self, sort: SortState) -> Self {
        self.default_sort = Some(sort);
        self
    }

    /// The page the table starts on.
    pub fn initial_page(&self) -> PageState {
        PageState::new(self.page_size, self.page_number)
    }
}

mod duration_ms {
    use std::time::Duration;

    use serde::Deserialize;
    use serde::Deserializer;
    use serde::Serializer;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
