//! Validation report compilation.
//!
//! The result store keeps one dataset per (category, source file). This crate
//! merges the datasets of a category, orders the rows deterministically and
//! writes them as one flat CSV report per category:
//!
//! - `validation_general.csv`
//! - `validation_lesion.csv`

mod compile;
mod rows;

pub use compile::{CompiledReport, compile_all, compile_category, report_path};
pub use rows::{DATA_SEPARATOR, report_header, report_row};
