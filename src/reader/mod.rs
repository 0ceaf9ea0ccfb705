//! Access to the entities of one compiled address index.

mod snapshot;

pub use snapshot::SnapshotIndex;

use crate::error::Result;
use crate::models::{City, CityType, Street};

/// Lazy view over an address index.
///
/// Cities come back without streets and streets without buildings; the
/// differ asks for those only for pairs it actually descends into.
pub trait AddressIndex {
    fn list_cities(&self, city_type: CityType) -> Result<Vec<City>>;

    fn preload_streets(&self, city: &mut City) -> Result<()>;

    fn preload_buildings(&self, street: &mut Street) -> Result<()>;
}
