//! Town reference record.

/// Stable identifier for a reference town.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type TownId = u32;

/// One row of the fixed town reference table.
///
/// Towns are reference data: the table is compiled into the binary and no
/// town is ever created, mutated or deleted at runtime.
#[derive(Debug, Clone, PartialEq)]
pub struct Town {
    /// Unique id used as the annotation foreign key.
    pub id: TownId,
    /// Display name, also emitted verbatim into report rows.
    pub name: String,
    /// Latitude in decimal degrees.
    pub lat: f64,
    /// Longitude in decimal degrees.
    pub lon: f64,
    /// Number of children living in the town's catchment area.
    pub child_population: u64,
}

impl Town {
    /// Creates a town record from its raw fields.
    pub fn new(
        id: TownId,
        name: impl Into<String>,
        lat: f64,
        lon: f64,
        child_population: u64,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            lat,
            lon,
            child_population,
        }
    }
}
