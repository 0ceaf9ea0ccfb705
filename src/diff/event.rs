//! Discrepancies reported by the differ.

use std::collections::BTreeMap;
use std::fmt;

use crate::config::Category;
use crate::models::GeoPoint;

/// Which of the two compared indexes an entity came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    First,
    Second,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::First => write!(f, "1st"),
            Side::Second => write!(f, "2nd"),
        }
    }
}

/// One difference between the two indexes. Entity fields hold display labels.
#[derive(Debug, Clone, PartialEq)]
pub enum Discrepancy {
    /// City only present in `side`
    ExtraCity { side: Side, city: String },
    /// Unpaired city with a same-named neighbour inside the wider window
    PossibleDuplicate {
        side: Side,
        city: String,
        duplicate: String,
        distance_m: u64,
    },
    CityNames {
        city: String,
        first: BTreeMap<String, String>,
        second: BTreeMap<String, String>,
    },
    /// Street counts differ but every name is present on both sides
    StreetCount {
        city: String,
        first: usize,
        second: usize,
    },
    MissingStreet {
        missing_in: Side,
        city: String,
        street: String,
    },
    StreetNames {
        city: String,
        street: String,
        first: BTreeMap<String, String>,
        second: BTreeMap<String, String>,
    },
    /// Equal street counts, but streets at the same position differ
    StreetOrder {
        city: String,
        first: String,
        second: String,
    },
    BuildingCount {
        city: String,
        street: String,
        first: usize,
        second: usize,
    },
    BuildingName {
        city: String,
        street: String,
        first: String,
        second: String,
    },
    BuildingPostcode {
        city: String,
        street: String,
        first: Option<String>,
        second: Option<String>,
    },
    IntersectionCount {
        city: String,
        street: String,
        first: usize,
        second: usize,
    },
    IntersectionName {
        city: String,
        street: String,
        first: String,
        second: String,
    },
    IntersectionLocation {
        city: String,
        street: String,
        first: String,
        second: String,
        distance_m: u64,
    },
}

impl Discrepancy {
    pub fn category(&self) -> Category {
        match self {
            Discrepancy::ExtraCity { .. } | Discrepancy::PossibleDuplicate { .. } => {
                Category::Cities
            }
            Discrepancy::CityNames { .. } => Category::CityNames,
            Discrepancy::StreetCount { .. } | Discrepancy::MissingStreet { .. } => {
                Category::Streets
            }
            Discrepancy::StreetNames { .. } | Discrepancy::StreetOrder { .. } => {
                Category::StreetNames
            }
            Discrepancy::BuildingCount { .. }
            | Discrepancy::BuildingName { .. }
            | Discrepancy::BuildingPostcode { .. } => Category::Buildings,
            Discrepancy::IntersectionCount { .. }
            | Discrepancy::IntersectionName { .. }
            | Discrepancy::IntersectionLocation { .. } => Category::Intersections,
        }
    }
}

struct Names<'a>(&'a BTreeMap<String, String>);

impl fmt::Display for Names<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (lang, name)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}={}", lang, name)?;
        }
        f.write_str("}")
    }
}

struct Postcode<'a>(&'a Option<String>);

impl fmt::Display for Postcode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_deref().unwrap_or("none"))
    }
}

impl fmt::Display for Discrepancy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Discrepancy::ExtraCity { side, city } => {
                write!(f, "(1)! Extra city in {} file: {}", side, city)
            }
            Discrepancy::PossibleDuplicate {
                side,
                city,
                duplicate,
                distance_m,
            } => write!(
                f,
                "(1). Extra city in {} file: {} ({} m) possible duplicate {}",
                side, city, distance_m, duplicate
            ),
            Discrepancy::CityNames {
                city,
                first,
                second,
            } => write!(
                f,
                "(1). City names differ: {} {} != {}",
                city,
                Names(first),
                Names(second)
            ),
            Discrepancy::StreetCount {
                city,
                first,
                second,
            } => write!(
                f,
                "(2) Number of streets with same names differs: {} {} <> {}",
                city, first, second
            ),
            Discrepancy::MissingStreet {
                missing_in,
                city,
                street,
            } => write!(
                f,
                "(2) {} of {} is not present in {} file",
                street, city, missing_in
            ),
            Discrepancy::StreetNames {
                city,
                street,
                first,
                second,
            } => write!(
                f,
                "(2)- Street names differ: {}, {} {} <> {}",
                city,
                street,
                Names(first),
                Names(second)
            ),
            Discrepancy::StreetOrder {
                city,
                first,
                second,
            } => write!(f, "(3)? Street name order: {} != {} {}", first, second, city),
            Discrepancy::BuildingCount {
                city,
                street,
                first,
                second,
            } => write!(
                f,
                "(3). Buildings size: {} <> {} {}, {}",
                first, second, city, street
            ),
            Discrepancy::BuildingName {
                city,
                street,
                first,
                second,
            } => write!(
                f,
                "(4). Buildings name: {} <> {} {}, {}",
                first, second, city, street
            ),
            Discrepancy::BuildingPostcode {
                city,
                street,
                first,
                second,
            } => write!(
                f,
                "(4). Buildings postcode: {} <> {} {}, {}",
                Postcode(first),
                Postcode(second),
                city,
                street
            ),
            Discrepancy::IntersectionCount {
                city,
                street,
                first,
                second,
            } => write!(
                f,
                "(5). Intersections size: {} <> {} {}, {}",
                first, second, city, street
            ),
            Discrepancy::IntersectionName {
                city,
                street,
                first,
                second,
            } => write!(
                f,
                "(5). Intersections names <> : {} <> {} {}, {}",
                first, second, city, street
            ),
            Discrepancy::IntersectionLocation {
                city,
                street,
                first,
                second,
                distance_m,
            } => write!(
                f,
                "(5). Intersections location <> : {} <> {} ({} m) {}, {}",
                first, second, distance_m, city, street
            ),
        }
    }
}

/// A discrepancy pinned to the location of the offending entity.
#[derive(Debug, Clone, PartialEq)]
pub struct DiffEvent {
    pub location: GeoPoint,
    pub discrepancy: Discrepancy,
}

impl DiffEvent {
    pub fn new(location: GeoPoint, discrepancy: Discrepancy) -> Self {
        Self {
            location,
            discrepancy,
        }
    }

    pub fn category(&self) -> Category {
        self.discrepancy.category()
    }

    pub fn message(&self) -> String {
        self.discrepancy.to_string()
    }
}
