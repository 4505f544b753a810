//! Table state and value models

mod date_offset;
mod day;
mod fields;
mod filter;
mod header;
mod page;
mod sort;
mod value;

pub use date_offset::*;
pub use day::*;
pub use fields::*;
pub use filter::*;
pub use header::*;
pub use page::*;
pub use sort::*;
pub use value::*;
