//! Fixed town reference table.
//!
//! # Responsibility
//! - Hold the ordered, validated set of towns annotations snap to.
//! - Ship the built-in South African town list compiled into the binary.
//!
//! # Invariants
//! - A table is never empty and town ids are unique.
//! - Iteration order is fixed at construction time; it drives resolver
//!   tie-breaking and report row order.

use crate::model::town::{Town, TownId};
use once_cell::sync::Lazy;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Built-in town seed: id, name, latitude, longitude, child population.
///
/// Version-controlled reference data; not editable at runtime.
const SOUTH_AFRICAN_TOWNS: &[(TownId, &str, f64, f64, u64)] = &[
    (1, "Cape Town", -33.9249, 18.4241, 120_000),
    (2, "Johannesburg", -26.2041, 28.0473, 140_000),
    (3, "Durban", -29.8587, 31.0218, 90_000),
    (4, "Pretoria", -25.7479, 28.2293, 110_000),
    (5, "Gqeberha", -33.9608, 25.6022, 70_000),
    (6, "Bloemfontein", -29.0852, 26.1596, 55_000),
    (7, "East London", -33.0292, 27.8546, 50_000),
    (8, "Pietermaritzburg", -29.6006, 30.3794, 60_000),
    (9, "Polokwane", -23.9045, 29.4689, 45_000),
    (10, "Mbombela", -25.4658, 30.9853, 40_000),
    (11, "Kimberley", -28.7282, 24.7499, 30_000),
    (12, "George", -33.9630, 22.4617, 25_000),
];

static BUILTIN_TABLE: Lazy<ReferenceTable> = Lazy::new(|| {
    let towns = SOUTH_AFRICAN_TOWNS
        .iter()
        .map(|&(id, name, lat, lon, child_population)| {
            Town::new(id, name, lat, lon, child_population)
        })
        .collect();
    ReferenceTable::new(towns).expect("built-in town list is non-empty with unique ids")
});

/// Construction error for reference tables.
#[derive(Debug, PartialEq, Eq)]
pub enum ReferenceError {
    /// No towns were supplied; the resolver cannot function without targets.
    EmptyReferenceTable,
    /// Two towns share the same id.
    DuplicateTownId(TownId),
}

impl Display for ReferenceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyReferenceTable => write!(f, "reference table contains no towns"),
            Self::DuplicateTownId(id) => write!(f, "duplicate town id in reference table: {id}"),
        }
    }
}

impl Error for ReferenceError {}

/// Ordered, validated collection of reference towns.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceTable {
    towns: Vec<Town>,
}

impl ReferenceTable {
    /// Validates and wraps a town list.
    ///
    /// # Errors
    /// - [`ReferenceError::EmptyReferenceTable`] for an empty list.
    /// - [`ReferenceError::DuplicateTownId`] when ids collide.
    pub fn new(towns: Vec<Town>) -> Result<Self, ReferenceError> {
        if towns.is_empty() {
            return Err(ReferenceError::EmptyReferenceTable);
        }

        for (index, town) in towns.iter().enumerate() {
            if towns[..index].iter().any(|other| other.id == town.id) {
                return Err(ReferenceError::DuplicateTownId(town.id));
            }
        }

        Ok(Self { towns })
    }

    /// Towns in fixed table order.
    pub fn towns(&self) -> &[Town] {
        &self.towns
    }

    /// Looks up a town by id.
    pub fn town_by_id(&self, id: TownId) -> Option<&Town> {
        self.towns.iter().find(|town| town.id == id)
    }

    pub fn len(&self) -> usize {
        self.towns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.towns.is_empty()
    }
}

/// Returns the built-in South African reference table.
pub fn builtin_reference_table() -> &'static ReferenceTable {
    &BUILTIN_TABLE
}
