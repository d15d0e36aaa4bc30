//! Core tabular value types shared by every other module.

mod cell;
mod dataset;

pub use cell::CellValue;
pub use dataset::{Dataset, Row};
