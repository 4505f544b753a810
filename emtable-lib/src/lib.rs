//! Reactive data table core
//!
//! Derives a paginated view of in-memory rows from three independently
//! updated inputs (filters, sort, page), and keeps per-column header state in
//! sync with both programmatic and user-driven sort/filter edits.
//!
//! # Example
//!
//! ```
//! use emtable_lib::model::{Fields, PageState, SortDirection, SortState, Value};
//! use emtable_lib::operators::Pipeline;
//! use emtable_lib::reactive::State;
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct Row {
//!     id: i64,
//!     n: &'static str,
//! }
//!
//! let fields = Fields::new().field("n", |r: &Row| Value::from(r.n));
//! let rows = State::new(vec![Row { id: 1, n: "b" }, Row { id: 2, n: "a" }]);
//! let filters = State::new(Vec::new());
//! let sort = State::new(SortState::new("n", SortDirection::Ascending));
//! let page = State::new(PageState::new(10, 1));
//!
//! let view = Pipeline::new(rows.stream(), fields)
//!     .filter(filters.stream())
//!     .sort(sort.stream())
//!     .paginate(page.stream());
//!
//! let latest = State::new(None);
//! let sink = latest.clone();
//! let _subscription = view.subscribe(move |page| sink.set(Some(page.clone())));
//!
//! let page = latest.get().unwrap().unwrap();
//! assert_eq!(page.item_count, 2);
//! assert_eq!(page.data[0].id, 2);
//! ```

pub mod config;
pub mod error;
pub mod header;
pub mod model;
pub mod operators;
pub mod reactive;
pub mod util;

mod table;

pub use config::TableConfig;
pub use error::Result;
pub use error::TableError;
pub use table::*;
