//! Planar coordinate input type.

/// A raw map coordinate in decimal degrees.
///
/// Points carry no validation on construction; callers that feed user input
/// into the store must check [`GeoPoint::is_finite`] first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Returns whether both components are finite (not NaN, not infinite).
    pub fn is_finite(self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }
}
