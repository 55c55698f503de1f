//! Library components of the `screencheck` binary.

pub mod logging;
pub mod pipeline;
pub mod types;
