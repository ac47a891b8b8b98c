//! Per-town observed/expected case statistics.
//!
//! # Responsibility
//! - Turn the annotation collection into per-town summary records.
//!
//! # Invariants
//! - Aggregation is a pure function of (table, annotations, rates).
//! - No rounding happens here; formatting is an export/display concern.

pub mod aggregate;
