//! Stream operators turning raw rows into paged view models

mod filter;
mod overrides;
mod paginate;
mod pipeline;
mod sort;

pub use filter::*;
pub use overrides::*;
pub use paginate::*;
pub use pipeline::*;
pub use sort::*;
