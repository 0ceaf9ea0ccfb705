use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::city::{City, CityType};

/// Everything one address index contains, one city list per group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Region {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub cities: BTreeMap<CityType, Vec<City>>,
}

impl Region {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cities: BTreeMap::new(),
        }
    }

    /// Append a city to the list of its own group
    pub fn add_city(&mut self, city: City) {
        self.cities.entry(city.city_type).or_default().push(city);
    }
}
