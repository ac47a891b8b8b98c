//! Annotation store and persistence port.
//!
//! # Responsibility
//! - Own the ordered in-memory annotation collection.
//! - Define the injected state port contract and its SQLite implementation.
//!
//! # Invariants
//! - The store is the only writer of the annotation collection; resolver,
//!   aggregator and exporter read snapshots.
//! - Persistence is whole-collection overwrite, not incremental append.

use crate::resolve::ResolveError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod annotation_store;
pub mod state_port;

pub use state_port::StateError;

pub type StoreResult<T> = Result<T, StoreError>;

/// Store-level error for annotation creation and persistence.
#[derive(Debug)]
pub enum StoreError {
    /// Candidate coordinate contains NaN or an infinity.
    InvalidCoordinate { lat: f64, lon: f64 },
    /// Nearest-town resolution failed.
    Resolve(ResolveError),
    /// State port read/write failure.
    State(StateError),
    /// Annotation collection could not be serialized.
    Encode(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCoordinate { lat, lon } => {
                write!(f, "coordinate is not finite: lat={lat} lon={lon}")
            }
            Self::Resolve(err) => write!(f, "{err}"),
            Self::State(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "failed to encode annotation state: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidCoordinate { .. } => None,
            Self::Resolve(err) => Some(err),
            Self::State(err) => Some(err),
            Self::Encode(err) => Some(err),
        }
    }
}

impl From<ResolveError> for StoreError {
    fn from(value: ResolveError) -> Self {
        Self::Resolve(value)
    }
}

impl From<StateError> for StoreError {
    fn from(value: StateError) -> Self {
        Self::State(value)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}
