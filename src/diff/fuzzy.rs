//! Near-duplicate search around a city the merge pass could not pair.

use super::collate::NameCollator;
use crate::models::Named;

/// A candidate found by [`FuzzyMatcher::find`] and its distance in meters.
#[derive(Debug, Clone, Copy)]
pub struct PossibleDuplicate<'a, T> {
    pub entity: &'a T,
    pub distance_m: f64,
}

/// Bounded bidirectional scan of a sorted list.
///
/// Each direction tolerates exactly one neighbour with a different stripped
/// name, which models a single record inserted or deleted between builds.
#[derive(Debug, Clone)]
pub struct FuzzyMatcher {
    collator: NameCollator,
    window_m: f64,
}

impl FuzzyMatcher {
    pub fn new(window_m: f64) -> Self {
        Self {
            collator: NameCollator::new(),
            window_m,
        }
    }

    /// Scan `search` backward then forward from `pos` for a same-named entity
    /// within the possible-duplicate window.
    pub fn find<'a, T: Named>(
        &self,
        target: &T,
        search: &'a [T],
        pos: usize,
    ) -> Option<PossibleDuplicate<'a, T>> {
        if search.is_empty() {
            return None;
        }
        let start = pos.min(search.len() - 1);
        self.scan(target, search[..=start].iter().rev())
            .or_else(|| self.scan(target, search.iter().skip(pos)))
    }

    fn scan<'a, T: Named>(
        &self,
        target: &T,
        candidates: impl Iterator<Item = &'a T>,
    ) -> Option<PossibleDuplicate<'a, T>>
    where
        T: 'a,
    {
        let mut off_by_one = false;
        for candidate in candidates {
            if !self
                .collator
                .compare_stripped(target.name(), candidate.name())
                .is_eq()
            {
                if off_by_one {
                    break;
                }
                off_by_one = true;
                continue;
            }
            let distance_m = target.location().distance_to(&candidate.location());
            if distance_m < self.window_m {
                return Some(PossibleDuplicate {
                    entity: candidate,
                    distance_m,
                });
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GeoPoint, MapObject};

    fn obj(id: i64, name: &str, lat: f64, lon: f64) -> MapObject {
        MapObject::new(id, name, GeoPoint::new(lat, lon))
    }

    #[test]
    fn test_finds_neighbour_with_qualifier() {
        let matcher = FuzzyMatcher::new(25500.0);
        let target = obj(1, "Springfield", 40.0, -89.0);
        let list = vec![
            obj(2, "Salem", 42.0, -71.0),
            obj(3, "Springfield (East)", 40.18, -89.0), // ~20 km
            obj(4, "Trenton", 40.2, -74.7),
        ];

        let found = matcher.find(&target, &list, 1).unwrap();
        assert_eq!(found.entity.id, 3);
        assert!(found.distance_m > 5500.0 && found.distance_m < 25500.0);
    }

    #[test]
    fn test_tolerates_one_mismatch_per_direction() {
        let matcher = FuzzyMatcher::new(25500.0);
        let target = obj(1, "Ovruch", 51.3, 28.8);
        let list = vec![
            obj(2, "Ovruch", 51.32, 28.8),
            obj(3, "Ozerne", 50.0, 28.0),
            obj(4, "Pavlivka", 50.5, 29.0),
        ];

        // backward from 1: Ozerne mismatches once, Ovruch matches
        assert_eq!(matcher.find(&target, &list, 1).unwrap().entity.id, 2);
        // backward from 2: two mismatches in a row stop the scan
        assert!(matcher.find(&target, &list, 2).is_none());
    }

    #[test]
    fn test_forward_direction() {
        let matcher = FuzzyMatcher::new(25500.0);
        let target = obj(1, "Irpin", 50.52, 30.25);
        let list = vec![
            obj(2, "Hostomel", 50.57, 30.26),
            obj(4, "Irpin (town)", 50.53, 30.25),
            obj(3, "Kyiv", 50.45, 30.52),
        ];
        assert_eq!(matcher.find(&target, &list, 0).unwrap().entity.id, 4);
    }

    #[test]
    fn test_too_far_is_not_a_duplicate() {
        let matcher = FuzzyMatcher::new(25500.0);
        let target = obj(1, "Springfield", 40.0, -89.0);
        let list = vec![obj(2, "Springfield", 42.1, -72.6)];
        assert!(matcher.find(&target, &list, 0).is_none());
    }

    #[test]
    fn test_position_past_end_is_clamped() {
        let matcher = FuzzyMatcher::new(25500.0);
        let target = obj(1, "Zolochiv", 49.8, 24.9);
        let list = vec![obj(2, "Zolochiv", 49.81, 24.9)];
        assert_eq!(matcher.find(&target, &list, 1).unwrap().entity.id, 2);
        assert!(matcher.find(&target, &[] as &[MapObject], 0).is_none());
    }
}
