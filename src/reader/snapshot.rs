//! Address index backed by a serialized region snapshot.

use flate2::read::GzDecoder;
use hashbrown::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, info, warn};

use super::AddressIndex;
use crate::error::{Error, Result};
use crate::models::{Building, City, CityType, Region, Street};

/// Serves a [`Region`] with the same lazy loading as a binary index: streets
/// and buildings are split off at load time and handed out on preload.
pub struct SnapshotIndex {
    name: String,
    cities: HashMap<CityType, Vec<City>>,
    streets: HashMap<i64, Vec<Street>>,
    buildings: HashMap<i64, Vec<Building>>,
}

impl SnapshotIndex {
    /// Load a JSON snapshot, gunzipping `.gz` files
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading address index from {}", path.display());

        let file = File::open(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let reader: Box<dyn Read> = if path.extension().map_or(false, |e| e == "gz") {
            Box::new(GzDecoder::new(file))
        } else {
            Box::new(file)
        };

        let region: Region =
            serde_json::from_reader(BufReader::new(reader)).map_err(|source| Error::Decode {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(Self::from_region(region))
    }

    pub fn from_region(region: Region) -> Self {
        let mut cities = HashMap::new();
        let mut streets = HashMap::new();
        let mut buildings = HashMap::new();

        for (city_type, list) in region.cities {
            let mut shallow = Vec::with_capacity(list.len());
            for mut city in list {
                let mut city_streets = std::mem::take(&mut city.streets);
                for street in &mut city_streets {
                    let houses = std::mem::take(&mut street.buildings);
                    if buildings.insert(street.object.id, houses).is_some() {
                        warn!(
                            "Duplicate street id {} in {}; buildings of the earlier street are unreachable",
                            street.object.id, region.name
                        );
                    }
                }
                if streets.insert(city.object.id, city_streets).is_some() {
                    warn!(
                        "Duplicate city id {} in {}; streets of the earlier city are unreachable",
                        city.object.id, region.name
                    );
                }
                shallow.push(city);
            }
            cities.insert(city_type, shallow);
        }

        info!(
            "Index '{}': {} cities, {} streets",
            region.name,
            cities.values().map(Vec::len).sum::<usize>(),
            streets.values().map(Vec::len).sum::<usize>()
        );

        Self {
            name: region.name,
            cities,
            streets,
            buildings,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl AddressIndex for SnapshotIndex {
    fn list_cities(&self, city_type: CityType) -> Result<Vec<City>> {
        Ok(self.cities.get(&city_type).cloned().unwrap_or_default())
    }

    fn preload_streets(&self, city: &mut City) -> Result<()> {
        if let Some(streets) = self.streets.get(&city.object.id) {
            debug!("Preloading {} streets of {}", streets.len(), city);
            city.streets = streets.clone();
        }
        Ok(())
    }

    fn preload_buildings(&self, street: &mut Street) -> Result<()> {
        if let Some(buildings) = self.buildings.get(&street.object.id) {
            street.buildings = buildings.clone();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GeoPoint, MapObject};
    use std::io::Write;

    fn region() -> Region {
        let p = GeoPoint::new(48.5, 35.0);
        let street = Street::new(MapObject::new(10, "Main St", p))
            .with_buildings(vec![Building::new(MapObject::new(100, "1", p), None)]);
        let mut region = Region::new("test");
        region.add_city(
            City::new(MapObject::new(1, "Dnipro", p), CityType::CityOrTown)
                .with_streets(vec![street]),
        );
        region
    }

    #[test]
    fn test_lazy_loading() {
        let index = SnapshotIndex::from_region(region());

        let mut cities = index.list_cities(CityType::CityOrTown).unwrap();
        assert_eq!(cities.len(), 1);
        assert!(cities[0].streets.is_empty());
        assert!(index.list_cities(CityType::Village).unwrap().is_empty());

        index.preload_streets(&mut cities[0]).unwrap();
        assert_eq!(cities[0].streets.len(), 1);
        assert!(cities[0].streets[0].buildings.is_empty());

        index.preload_buildings(&mut cities[0].streets[0]).unwrap();
        assert_eq!(cities[0].streets[0].buildings.len(), 1);
    }

    #[test]
    fn test_open_json_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        serde_json::to_writer(&mut file, &region()).unwrap();
        file.flush().unwrap();

        let index = SnapshotIndex::open(file.path()).unwrap();
        assert_eq!(index.name(), "test");
        assert_eq!(index.list_cities(CityType::CityOrTown).unwrap().len(), 1);
    }

    #[test]
    fn test_open_gzipped_file() {
        use flate2::write::GzEncoder;
        use flate2::Compression;

        let file = tempfile::Builder::new().suffix(".json.gz").tempfile().unwrap();
        let mut encoder = GzEncoder::new(file.reopen().unwrap(), Compression::default());
        serde_json::to_writer(&mut encoder, &region()).unwrap();
        encoder.finish().unwrap();

        let index = SnapshotIndex::open(file.path()).unwrap();
        assert_eq!(index.list_cities(CityType::CityOrTown).unwrap().len(), 1);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = SnapshotIndex::open("/nonexistent/region.json").err().unwrap();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn test_garbage_is_decode_error() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(b"not json").unwrap();
        let err = SnapshotIndex::open(file.path()).err().unwrap();
        assert!(matches!(err, Error::Decode { .. }));
    }
}
