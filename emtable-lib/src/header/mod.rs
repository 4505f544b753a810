//! Column header state: the row-wide synchronizer and per-column editors

mod cell;
mod row;

pub use cell::*;
pub use row::*;
