//! Map annotation use-case service.
//!
//! # Responsibility
//! - Bind the reference table, annotation store and rate configuration.
//! - Provide the entry points presentation adapters call.
//!
//! # Invariants
//! - The service never blocks on user interaction; adapters hand it
//!   already-collected input.

use crate::model::annotation::{Annotation, PinCandidate};
use crate::model::geo::GeoPoint;
use crate::reference::ReferenceTable;
use crate::report::csv::{render_report, ReportError, ReportSink, REPORT_FILE_NAME};
use crate::stats::aggregate::{summarize_all, PrevalenceRates, TownSummary};
use crate::store::annotation_store::{AnnotationStore, AppendOutcome};
use crate::store::state_port::StatePort;
use crate::store::StoreResult;

/// Facade over the annotation core for presentation adapters.
pub struct MapService<'t, P: StatePort> {
    table: &'t ReferenceTable,
    store: AnnotationStore<'t, P>,
    rates: PrevalenceRates,
}

impl<'t, P: StatePort> MapService<'t, P> {
    /// Loads persisted state through `port` and binds the rate configuration.
    pub fn new(table: &'t ReferenceTable, port: P, rates: PrevalenceRates) -> Self {
        Self {
            table,
            store: AnnotationStore::load(table, port),
            rates,
        }
    }

    /// Creates an annotation from a map click.
    ///
    /// The note may be empty (user declined input); the coordinate must be
    /// finite.
    pub fn place_pin(
        &mut self,
        point: GeoPoint,
        note: impl Into<String>,
    ) -> StoreResult<AppendOutcome> {
        self.store.append(&PinCandidate::new(point, note))
    }

    /// Ordered annotation snapshot.
    pub fn annotations(&self) -> &[Annotation] {
        self.store.annotations()
    }

    /// Per-town summaries in reference table order.
    pub fn town_summaries(&self) -> Vec<TownSummary> {
        summarize_all(self.table, self.store.annotations(), self.rates)
    }

    /// Renders the export blob without writing it anywhere.
    pub fn render_report(&self) -> String {
        render_report(self.table, self.store.annotations(), self.rates)
    }

    /// Renders the report and hands it to the sink under the fixed name.
    pub fn export_report(&self, sink: &impl ReportSink) -> Result<(), ReportError> {
        sink.write_report(REPORT_FILE_NAME, &self.render_report())
    }

    pub fn table(&self) -> &'t ReferenceTable {
        self.table
    }

    pub fn rates(&self) -> PrevalenceRates {
        self.rates
    }
}
