//! Streets, their buildings and their intersections.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::object::{MapObject, Named};

/// A street owned by a city.
///
/// `intersections` holds copies of the neighbouring streets' identities, not
/// the neighbours themselves, so a street never owns another street.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Street {
    #[serde(flatten)]
    pub object: MapObject,

    /// Filled by the owning index on building preload
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub buildings: Vec<Building>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub intersections: Vec<MapObject>,
}

impl Street {
    pub fn new(object: MapObject) -> Self {
        Self {
            object,
            buildings: Vec::new(),
            intersections: Vec::new(),
        }
    }

    pub fn with_buildings(mut self, buildings: Vec<Building>) -> Self {
        self.buildings = buildings;
        self
    }

    pub fn with_intersections(mut self, intersections: Vec<MapObject>) -> Self {
        self.intersections = intersections;
        self
    }
}

impl Named for Street {
    fn object(&self) -> &MapObject {
        &self.object
    }
}

impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Street {}", self.object)
    }
}

/// A house on a street.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Building {
    #[serde(flatten)]
    pub object: MapObject,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postcode: Option<String>,
}

impl Building {
    pub fn new(object: MapObject, postcode: Option<String>) -> Self {
        Self { object, postcode }
    }
}

impl Named for Building {
    fn object(&self) -> &MapObject {
        &self.object
    }
}

impl fmt::Display for Building {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Building {}", self.object)
    }
}
