//! Core domain logic for casemap.
//! This crate is the single source of truth for annotation invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod reference;
pub mod report;
pub mod resolve;
pub mod service;
pub mod stats;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::annotation::{Annotation, AnnotationId, PinCandidate};
pub use model::geo::GeoPoint;
pub use model::town::{Town, TownId};
pub use reference::{builtin_reference_table, ReferenceError, ReferenceTable};
pub use report::csv::{
    format_expected_display, format_expected_report, render_report, FsReportSink, ReportError,
    ReportSink, REPORT_FILE_NAME,
};
pub use resolve::{nearest_town, ResolveError};
pub use service::map_service::MapService;
pub use stats::aggregate::{summarize, summarize_all, PrevalenceRates, TownSummary};
pub use store::annotation_store::{AnnotationStore, AppendOutcome, ANNOTATIONS_STATE_KEY};
pub use store::state_port::{SqliteStatePort, StatePort};
pub use store::{StateError, StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
