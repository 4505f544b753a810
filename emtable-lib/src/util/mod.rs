//! Comparison, calendar and row-collection helpers

pub mod array;
pub mod calendar;
pub mod table;
