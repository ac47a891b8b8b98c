//! Annotation domain model.
//!
//! # Responsibility
//! - Define the anonymised record persisted by the annotation store.
//! - Define the candidate shape accepted at the input boundary.
//!
//! # Invariants
//! - `town_id` is assigned by nearest-town resolution and never changes.
//! - Ids are unique within one store; insertion order is preserved.

use crate::model::geo::GeoPoint;
use crate::model::town::TownId;
use serde::{Deserialize, Serialize};

/// Unique identifier assigned to an annotation at creation time.
pub type AnnotationId = i64;

/// Anonymised point annotation, snapped to a reference town.
///
/// This is exactly the record shape written to persisted state: no raw
/// coordinates survive creation, only the resolved town binding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    /// Unique within the store; assigned on append.
    pub id: AnnotationId,
    /// Serialized as `townId` to match the external state schema.
    #[serde(rename = "townId")]
    pub town_id: TownId,
    /// Free text, may be empty; never interpreted structurally.
    pub note: String,
}

/// Candidate input for [`append`](crate::store::annotation_store::AnnotationStore::append):
/// a raw coordinate plus an optional note.
///
/// Candidates are the only way to create annotations; the store resolves the
/// point to a town and discards the coordinate afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct PinCandidate {
    pub point: GeoPoint,
    pub note: String,
}

impl PinCandidate {
    pub fn new(point: GeoPoint, note: impl Into<String>) -> Self {
        Self {
            point,
            note: note.into(),
        }
    }
}
