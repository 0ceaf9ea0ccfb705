//! Ordering of same-kind entities across two independently built indexes.

use std::cmp::Ordering;

use super::collate::{strip, NameCollator};
use crate::models::{GeoPoint, Named};

/// Name order first; same-named entities inside the equivalence window are
/// equal, otherwise the one closer to the reference origin sorts first.
///
/// Not transitive: A may equal B and B equal C while A and C are further
/// apart than the window. Only use it to sequence a merge, never to build
/// equivalence classes.
#[derive(Debug, Clone)]
pub struct EntityComparator {
    collator: NameCollator,
    equivalence_m: f64,
}

impl EntityComparator {
    pub fn new(equivalence_m: f64) -> Self {
        Self {
            collator: NameCollator::new(),
            equivalence_m,
        }
    }

    pub fn collator(&self) -> &NameCollator {
        &self.collator
    }

    /// `None` marks an exhausted list and sorts after every entity.
    pub fn compare<T: Named>(&self, a: Option<&T>, b: Option<&T>) -> Ordering {
        match (a, b) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(a), Some(b)) => self.compare_entities(a, b),
        }
    }

    pub fn compare_entities<T: Named>(&self, a: &T, b: &T) -> Ordering {
        let c = self.collator.compare_stripped(a.name(), b.name());
        if c != Ordering::Equal {
            return c;
        }
        let (pa, pb) = (a.location(), b.location());
        if pa.distance_to(&pb) < self.equivalence_m {
            return Ordering::Equal;
        }
        pa.distance_to(&GeoPoint::ORIGIN)
            .total_cmp(&pb.distance_to(&GeoPoint::ORIGIN))
    }

    /// Stable in-place sort of a working copy.
    ///
    /// Sorts by (collation key of the stripped name, distance from origin),
    /// a total order that agrees with [`compare_entities`](Self::compare_entities)
    /// wherever that one is strict.
    pub fn sort<T: Named>(&self, items: &mut Vec<T>) {
        let mut keyed: Vec<(String, f64, T)> = items
            .drain(..)
            .map(|item| {
                let key = self.collator.key(strip(item.name()));
                let origin = item.location().distance_to(&GeoPoint::ORIGIN);
                (key, origin, item)
            })
            .collect();
        keyed.sort_by(|a, b| a.0.cmp(&b.0).then(a.1.total_cmp(&b.1)));
        items.extend(keyed.into_iter().map(|(_, _, item)| item));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MapObject;

    fn obj(name: &str, lat: f64, lon: f64) -> MapObject {
        MapObject::new(0, name, GeoPoint::new(lat, lon))
    }

    #[test]
    fn test_different_names_order_by_name() {
        let cmp = EntityComparator::new(5500.0);
        let a = obj("Berlin", 10.0, 10.0);
        let b = obj("Aachen", 0.0, 0.0);
        assert_eq!(cmp.compare_entities(&a, &b), Ordering::Greater);
    }

    #[test]
    fn test_same_name_close_is_equal() {
        let cmp = EntityComparator::new(5500.0);
        let a = obj("Oakville (North)", 45.0, 10.0);
        let b = obj("oakville", 45.01, 10.0); // ~1.1 km
        assert_eq!(cmp.compare_entities(&a, &b), Ordering::Equal);
    }

    #[test]
    fn test_same_name_far_orders_by_origin_distance() {
        let cmp = EntityComparator::new(5500.0);
        let near = obj("Springfield", 10.0, 10.0);
        let far = obj("Springfield", 40.0, 10.0);
        assert_eq!(cmp.compare_entities(&near, &far), Ordering::Less);
        assert_eq!(cmp.compare_entities(&far, &near), Ordering::Greater);
    }

    #[test]
    fn test_exhausted_sorts_last() {
        let cmp = EntityComparator::new(5500.0);
        let a = obj("Zywiec", 1.0, 1.0);
        assert_eq!(cmp.compare(Some(&a), None), Ordering::Less);
        assert_eq!(cmp.compare(None, Some(&a)), Ordering::Greater);
        assert_eq!(cmp.compare::<MapObject>(None, None), Ordering::Equal);
    }

    #[test]
    fn test_sort_is_stable_and_name_ordered() {
        let cmp = EntityComparator::new(5500.0);
        let mut items = vec![
            obj("Cherkasy", 49.4, 32.0),
            obj("Bila Tserkva", 49.8, 30.1),
            obj("Springfield", 40.0, 10.0),
            obj("Springfield", 10.0, 10.0),
            obj("Ahtyrka", 50.3, 34.9),
        ];
        cmp.sort(&mut items);
        let names: Vec<_> = items.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(
            names,
            ["Ahtyrka", "Bila Tserkva", "Cherkasy", "Springfield", "Springfield"]
        );
        assert_eq!(items[3].location.lat, 10.0);
        for pair in items.windows(2) {
            assert_ne!(cmp.compare_entities(&pair[0], &pair[1]), Ordering::Greater);
        }
    }
}
