//! Output module for rendering fetch results
//!
//! This module handles:
//! - Formatting extracted items as single-line result text
//! - Writing batch-mode output files
//! - Recording fetch cycle statistics

mod lines;
pub mod stats;
mod writer;

pub use lines::{format_result_lines, LineFormat, BREAK_MARKER};
pub use stats::FetchStats;
pub use writer::BatchWriter;
