//! Shared identity of every addressable entity.

use geo::{Distance, Haversine, Point};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Geographic point (lat/lon)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    /// Reference origin used to break ties between far-apart namesakes.
    pub const ORIGIN: GeoPoint = GeoPoint { lat: 0.0, lon: 0.0 };

    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Great-circle distance in meters.
    pub fn distance_to(&self, other: &GeoPoint) -> f64 {
        Haversine.distance(self.to_point(), other.to_point())
    }

    fn to_point(self) -> Point<f64> {
        Point::new(self.lon, self.lat)
    }
}

/// Identity, names and location common to cities, streets and buildings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapObject {
    pub id: i64,

    /// Primary name
    pub name: String,

    /// Localized names keyed by language tag: {"en": "...", "de": "..."}
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub names: BTreeMap<String, String>,

    pub location: GeoPoint,
}

impl MapObject {
    pub fn new(id: i64, name: impl Into<String>, location: GeoPoint) -> Self {
        Self {
            id,
            name: name.into(),
            names: BTreeMap::new(),
            location,
        }
    }

    /// Add a name in a specific language
    pub fn with_name(mut self, lang: &str, name: impl Into<String>) -> Self {
        self.names.insert(lang.to_string(), name.into());
        self
    }
}

impl fmt::Display for MapObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

/// Anything carrying a [`MapObject`].
pub trait Named {
    fn object(&self) -> &MapObject;

    fn name(&self) -> &str {
        &self.object().name
    }

    fn location(&self) -> GeoPoint {
        self.object().location
    }
}

impl Named for MapObject {
    fn object(&self) -> &MapObject {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_zero_for_same_point() {
        let p = GeoPoint::new(50.45, 30.52);
        assert!(p.distance_to(&p) < 1e-6);
    }

    #[test]
    fn test_distance_one_degree_latitude() {
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(1.0, 0.0);
        let d = a.distance_to(&b);
        // ~111 km per degree
        assert!(d > 110_000.0 && d < 112_500.0, "got {}", d);
    }

    #[test]
    fn test_display_includes_id() {
        let obj = MapObject::new(42, "Kyiv", GeoPoint::new(50.45, 30.52));
        assert_eq!(obj.to_string(), "Kyiv (42)");
    }
}
