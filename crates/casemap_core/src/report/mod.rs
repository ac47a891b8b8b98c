//! Flat-text report export.
//!
//! # Responsibility
//! - Serialize per-town summaries into the delimited report format.
//! - Define the sink capability that carries the rendered blob away.

pub mod csv;
