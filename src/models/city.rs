//! Cities and the city groups an address index is split into.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::object::{MapObject, Named};
use super::street::Street;

/// City group inside an address index, ordered from most to least specific
/// settlement class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum CityType {
    /// Cities and towns (index group 1)
    CityOrTown,
    /// Postcode areas (index group 2)
    Postcode,
    /// Villages, hamlets and suburbs (index group 3)
    Village,
}

impl CityType {
    /// Get the index group number
    pub fn code(&self) -> u8 {
        match self {
            CityType::CityOrTown => 1,
            CityType::Postcode => 2,
            CityType::Village => 3,
        }
    }

    /// All groups in index order
    pub fn all() -> &'static [CityType] {
        &[CityType::CityOrTown, CityType::Postcode, CityType::Village]
    }
}

impl fmt::Display for CityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CityType::CityOrTown => write!(f, "city_or_town"),
            CityType::Postcode => write!(f, "postcode"),
            CityType::Village => write!(f, "village"),
        }
    }
}

/// A settlement with its streets.
///
/// `streets` stays empty until the owning index preloads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    #[serde(flatten)]
    pub object: MapObject,

    #[serde(rename = "type")]
    pub city_type: CityType,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub streets: Vec<Street>,
}

impl City {
    pub fn new(object: MapObject, city_type: CityType) -> Self {
        Self {
            object,
            city_type,
            streets: Vec::new(),
        }
    }

    pub fn with_streets(mut self, streets: Vec<Street>) -> Self {
        self.streets = streets;
        self
    }

    /// Exact-name street lookup
    pub fn street_by_name(&self, name: &str) -> Option<&Street> {
        self.streets.iter().find(|s| s.object.name == name)
    }
}

impl Named for City {
    fn object(&self) -> &MapObject {
        &self.object
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "City {}", self.object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GeoPoint;

    #[test]
    fn test_city_types_in_index_order() {
        let codes: Vec<u8> = CityType::all().iter().map(CityType::code).collect();
        assert_eq!(codes, [1, 2, 3]);
    }

    #[test]
    fn test_street_by_name_is_exact() {
        let p = GeoPoint::new(1.0, 1.0);
        let city = City::new(MapObject::new(1, "Lviv", p), CityType::CityOrTown)
            .with_streets(vec![Street::new(MapObject::new(2, "Main St", p))]);

        assert!(city.street_by_name("Main St").is_some());
        assert!(city.street_by_name("main st").is_none());
    }
}
