//! Ordered annotation collection with whole-blob persistence.
//!
//! # Responsibility
//! - Create annotations from candidate input via nearest-town resolution.
//! - Load and persist the collection through the injected state port.
//!
//! # Invariants
//! - Annotations are append-only: no update or delete operation exists.
//! - A missing, unreadable or undecodable persisted blob degrades to an
//!   empty collection; it never fails store construction.
//! - A persistence write failure does not roll back the in-memory append;
//!   the in-memory collection stays authoritative for the session.

use crate::model::annotation::{Annotation, AnnotationId, PinCandidate};
use crate::reference::ReferenceTable;
use crate::resolve::nearest_town;
use crate::store::state_port::StatePort;
use crate::store::{StoreError, StoreResult};
use log::{info, warn};

/// Fixed namespace key for the persisted annotation collection.
pub const ANNOTATIONS_STATE_KEY: &str = "annotations.v1";

/// Result of one append: the created annotation plus an optional warning
/// when the in-memory append succeeded but the state write did not.
#[derive(Debug)]
pub struct AppendOutcome {
    pub annotation: Annotation,
    pub persist_warning: Option<StoreError>,
}

/// Owner of the ordered annotation collection.
pub struct AnnotationStore<'t, P: StatePort> {
    table: &'t ReferenceTable,
    port: P,
    annotations: Vec<Annotation>,
}

impl<'t, P: StatePort> AnnotationStore<'t, P> {
    /// Loads the persisted collection through `port`.
    ///
    /// Never fails: absent state starts empty, and corrupt state is
    /// discarded with a warning instead of poisoning the session.
    pub fn load(table: &'t ReferenceTable, port: P) -> Self {
        let annotations = match port.read_state(ANNOTATIONS_STATE_KEY) {
            Ok(Some(raw)) => match decode_annotations(table, &raw) {
                Ok(annotations) => {
                    info!(
                        "event=state_load module=store status=ok count={}",
                        annotations.len()
                    );
                    annotations
                }
                Err(reason) => {
                    warn!(
                        "event=state_load module=store status=recovered error_code=deserialize_failure reason={reason}"
                    );
                    Vec::new()
                }
            },
            Ok(None) => {
                info!("event=state_load module=store status=empty");
                Vec::new()
            }
            Err(err) => {
                warn!(
                    "event=state_load module=store status=recovered error_code=read_failure error={err}"
                );
                Vec::new()
            }
        };

        Self {
            table,
            port,
            annotations,
        }
    }

    /// Resolves the candidate to a town, appends a fresh annotation and
    /// rewrites persisted state.
    ///
    /// # Errors
    /// - [`StoreError::InvalidCoordinate`] for NaN/infinite input; checked
    ///   before resolution so the resolver only ever sees finite points.
    /// - [`StoreError::Resolve`] when the reference table is empty.
    ///
    /// A failed state write is reported through
    /// [`AppendOutcome::persist_warning`], not as an `Err`.
    pub fn append(&mut self, candidate: &PinCandidate) -> StoreResult<AppendOutcome> {
        if !candidate.point.is_finite() {
            return Err(StoreError::InvalidCoordinate {
                lat: candidate.point.lat,
                lon: candidate.point.lon,
            });
        }

        let town = nearest_town(self.table.towns(), candidate.point)?;
        let annotation = Annotation {
            id: self.next_id(),
            town_id: town.id,
            note: candidate.note.clone(),
        };

        self.annotations.push(annotation.clone());
        info!(
            "event=pin_append module=store status=ok id={} town_id={}",
            annotation.id, annotation.town_id
        );

        let persist_warning = match self.persist() {
            Ok(()) => None,
            Err(err) => {
                warn!(
                    "event=state_persist module=store status=warning error_code=write_failure error={err}"
                );
                Some(err)
            }
        };

        Ok(AppendOutcome {
            annotation,
            persist_warning,
        })
    }

    /// Ordered read-only snapshot of the collection.
    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    /// Rewrites the full serialized collection through the state port.
    pub fn persist(&self) -> StoreResult<()> {
        let raw = serde_json::to_string(&self.annotations)?;
        self.port.write_state(ANNOTATIONS_STATE_KEY, &raw)?;
        Ok(())
    }

    /// Next unique id: one past the largest id ever persisted.
    ///
    /// Monotonic within a session; uniqueness across restarts follows from
    /// reloading the persisted maximum.
    fn next_id(&self) -> AnnotationId {
        self.annotations
            .iter()
            .map(|annotation| annotation.id)
            .max()
            .unwrap_or(0)
            + 1
    }
}

/// Decodes and validates a persisted blob against the reference table.
///
/// Any violation of store invariants (undecodable JSON, duplicate ids,
/// unknown town references) rejects the whole blob.
fn decode_annotations(table: &ReferenceTable, raw: &str) -> Result<Vec<Annotation>, String> {
    let annotations: Vec<Annotation> =
        serde_json::from_str(raw).map_err(|err| err.to_string())?;

    for (index, annotation) in annotations.iter().enumerate() {
        if annotations[..index]
            .iter()
            .any(|other| other.id == annotation.id)
        {
            return Err(format!("duplicate annotation id {}", annotation.id));
        }
        if table.town_by_id(annotation.town_id).is_none() {
            return Err(format!(
                "annotation {} references unknown town id {}",
                annotation.id, annotation.town_id
            ));
        }
    }

    Ok(annotations)
}
