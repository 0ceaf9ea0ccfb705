//! Merge-join of two address indexes, city by city, cascading into streets,
//! buildings and intersections of every matched pair.

use hashbrown::HashSet;
use indicatif::ProgressBar;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use tracing::info;

use super::comparator::EntityComparator;
use super::event::{DiffEvent, Discrepancy, Side};
use super::fuzzy::FuzzyMatcher;
use crate::config::{Category, CompareOptions};
use crate::error::Result;
use crate::models::{City, CityType, Named, Street};
use crate::reader::AddressIndex;
use crate::sink::DiffSink;

/// Counters for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffSummary {
    pub events: BTreeMap<Category, usize>,
    pub cities_first: usize,
    pub cities_second: usize,
    pub matched_cities: usize,
}

impl DiffSummary {
    pub fn total_events(&self) -> usize {
        self.events.values().sum()
    }

    pub fn count(&self, category: Category) -> usize {
        self.events.get(&category).copied().unwrap_or(0)
    }
}

pub struct HierarchyDiffer {
    options: CompareOptions,
    comparator: EntityComparator,
    fuzzy: FuzzyMatcher,
    progress: ProgressBar,
}

/// Positional pairing only makes sense when both cities hold the same names.
///
/// A `false` here sends the whole city to the missing-street report, so no
/// building or intersection of that city is compared, not even for streets
/// whose names do match on both sides.
fn same_street_names(c0: &City, c1: &City) -> bool {
    let names = |c: &City| -> HashSet<String> {
        c.streets.iter().map(|s| s.object.name.clone()).collect()
    };
    c0.streets.len() == c1.streets.len() && names(c0) == names(c1)
}

/// Sink plus bookkeeping for the duration of one `run`.
struct Emitter<'s> {
    sink: &'s mut dyn DiffSink,
    summary: DiffSummary,
}

impl Emitter<'_> {
    fn emit<T: Named>(&mut self, at: &T, discrepancy: Discrepancy) -> Result<()> {
        *self.summary.events.entry(discrepancy.category()).or_insert(0) += 1;
        self.sink.emit(&DiffEvent::new(at.location(), discrepancy))?;
        Ok(())
    }

    fn comment(&mut self, text: &str) -> Result<()> {
        self.sink.comment(text)?;
        Ok(())
    }
}

impl HierarchyDiffer {
    pub fn new(options: CompareOptions) -> Self {
        let comparator = EntityComparator::new(options.thresholds.city_equivalence_m);
        let fuzzy = FuzzyMatcher::new(options.thresholds.possible_duplicate_m);
        Self {
            options,
            comparator,
            fuzzy,
            progress: ProgressBar::hidden(),
        }
    }

    /// Report merge progress on the given bar
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    /// Compare every city group of `first` against `second`.
    ///
    /// Frames the sink with `begin`/`finish`; data differences are reported
    /// through it and never returned as errors.
    pub fn run(
        &self,
        first: &dyn AddressIndex,
        second: &dyn AddressIndex,
        sink: &mut dyn DiffSink,
    ) -> Result<DiffSummary> {
        let mut out = Emitter {
            sink,
            summary: DiffSummary::default(),
        };
        out.sink.begin()?;
        for city_type in CityType::all() {
            self.compare_city_type(*city_type, first, second, &mut out)?;
        }
        out.sink.finish()?;
        self.progress.finish_and_clear();
        Ok(out.summary)
    }

    fn compare_city_type(
        &self,
        city_type: CityType,
        first: &dyn AddressIndex,
        second: &dyn AddressIndex,
        out: &mut Emitter<'_>,
    ) -> Result<()> {
        let mut ct0 = first.list_cities(city_type)?;
        let mut ct1 = second.list_cities(city_type)?;
        self.comparator.sort(&mut ct0);
        self.comparator.sort(&mut ct1);

        info!(
            "Comparing {} cities: {} vs {}",
            city_type,
            ct0.len(),
            ct1.len()
        );
        out.summary.cities_first += ct0.len();
        out.summary.cities_second += ct1.len();
        self.progress.set_length((ct0.len() + ct1.len()) as u64);
        self.progress.set_position(0);
        self.progress.set_message(city_type.to_string());

        out.comment(&format!("CITY TYPE: {} ({})", city_type, city_type.code()))?;

        let (mut i, mut j) = (0, 0);
        while i < ct0.len() || j < ct1.len() {
            match self.comparator.compare(ct0.get(i), ct1.get(j)) {
                Ordering::Less => {
                    while let Some(c0) = ct0
                        .get(i)
                        .filter(|c0| self.comparator.compare(Some(*c0), ct1.get(j)).is_lt())
                    {
                        self.report_unmatched(Side::First, c0, &ct1, j, out)?;
                        i += 1;
                        self.progress.inc(1);
                    }
                }
                Ordering::Greater => {
                    while let Some(c1) = ct1
                        .get(j)
                        .filter(|c1| self.comparator.compare(ct0.get(i), Some(*c1)).is_gt())
                    {
                        self.report_unmatched(Side::Second, c1, &ct0, i, out)?;
                        j += 1;
                        self.progress.inc(1);
                    }
                }
                Ordering::Equal => {
                    let (c0, c1) = (&mut ct0[i], &mut ct1[j]);
                    first.preload_streets(c0)?;
                    second.preload_streets(c1)?;
                    self.compare_cities(c0, c1, first, second, out)?;
                    // Matched streets are no longer needed
                    c0.streets = Vec::new();
                    c1.streets = Vec::new();
                    out.summary.matched_cities += 1;
                    i += 1;
                    j += 1;
                    self.progress.inc(2);
                }
            }
        }
        Ok(())
    }

    /// `pos` is where the merge stands in `other`.
    fn report_unmatched(
        &self,
        side: Side,
        city: &City,
        other: &[City],
        pos: usize,
        out: &mut Emitter<'_>,
    ) -> Result<()> {
        if !self.options.is_enabled(Category::Cities) {
            return Ok(());
        }
        let discrepancy = match self.fuzzy.find(city, other, pos) {
            Some(dup) => Discrepancy::PossibleDuplicate {
                side,
                city: city.to_string(),
                duplicate: dup.entity.to_string(),
                distance_m: dup.distance_m as u64,
            },
            None => Discrepancy::ExtraCity {
                side,
                city: city.to_string(),
            },
        };
        out.emit(city, discrepancy)
    }

    fn compare_cities(
        &self,
        c0: &mut City,
        c1: &mut City,
        first: &dyn AddressIndex,
        second: &dyn AddressIndex,
        out: &mut Emitter<'_>,
    ) -> Result<()> {
        if self.options.is_enabled(Category::CityNames) && c0.object.names != c1.object.names {
            out.emit(
                &*c0,
                Discrepancy::CityNames {
                    city: c1.to_string(),
                    first: c0.object.names.clone(),
                    second: c1.object.names.clone(),
                },
            )?;
        }

        if !same_street_names(c0, c1) {
            if self.options.is_enabled(Category::Streets) {
                self.compare_street_sets(c0, c1, out)?;
            }
            return Ok(());
        }

        let city = c0.to_string();
        for (s0, s1) in c0.streets.iter_mut().zip(c1.streets.iter_mut()) {
            if self.options.is_enabled(Category::StreetNames) && s0.object.names != s1.object.names
            {
                out.emit(
                    &*s0,
                    Discrepancy::StreetNames {
                        city: city.clone(),
                        street: s0.to_string(),
                        first: s0.object.names.clone(),
                        second: s1.object.names.clone(),
                    },
                )?;
            }

            if s0.object.name == s1.object.name {
                first.preload_buildings(s0)?;
                second.preload_buildings(s1)?;
                self.compare_buildings(&city, s0, s1, out)?;
                self.compare_intersections(&city, s0, s1, out)?;
            } else if self.options.is_enabled(Category::StreetNames) {
                out.emit(
                    &*s0,
                    Discrepancy::StreetOrder {
                        city: city.clone(),
                        first: s0.to_string(),
                        second: s1.to_string(),
                    },
                )?;
            }
        }
        Ok(())
    }

    /// Street lists disagree: report names missing on either side.
    fn compare_street_sets(&self, c0: &City, c1: &City, out: &mut Emitter<'_>) -> Result<()> {
        out.comment(&format!(
            "(2). City streets {}: {} <> {}",
            c1,
            c0.streets.len(),
            c1.streets.len()
        ))?;

        let missing_in_second: Vec<&Street> = c0
            .streets
            .iter()
            .filter(|s| c1.street_by_name(&s.object.name).is_none())
            .collect();
        let missing_in_first: Vec<&Street> = c1
            .streets
            .iter()
            .filter(|s| c0.street_by_name(&s.object.name).is_none())
            .collect();

        if missing_in_second.is_empty() && missing_in_first.is_empty() {
            return out.emit(
                c0,
                Discrepancy::StreetCount {
                    city: c0.to_string(),
                    first: c0.streets.len(),
                    second: c1.streets.len(),
                },
            );
        }

        for (missing_in, streets) in [
            (Side::Second, missing_in_second),
            (Side::First, missing_in_first),
        ] {
            for street in streets {
                out.emit(
                    street,
                    Discrepancy::MissingStreet {
                        missing_in,
                        city: c0.to_string(),
                        street: street.to_string(),
                    },
                )?;
            }
        }
        Ok(())
    }

    /// Positional comparison; reordered buildings are reported as renames.
    fn compare_buildings(
        &self,
        city: &str,
        s0: &Street,
        s1: &Street,
        out: &mut Emitter<'_>,
    ) -> Result<()> {
        if !self.options.is_enabled(Category::Buildings) {
            return Ok(());
        }
        if s0.buildings.len() != s1.buildings.len() {
            return out.emit(
                s0,
                Discrepancy::BuildingCount {
                    city: city.to_string(),
                    street: s0.to_string(),
                    first: s0.buildings.len(),
                    second: s1.buildings.len(),
                },
            );
        }
        for (b0, b1) in s0.buildings.iter().zip(&s1.buildings) {
            if b0.object.name != b1.object.name {
                out.emit(
                    b0,
                    Discrepancy::BuildingName {
                        city: city.to_string(),
                        street: s0.to_string(),
                        first: b0.object.name.clone(),
                        second: b1.object.name.clone(),
                    },
                )?;
            }
            if b0.postcode != b1.postcode {
                out.emit(
                    b0,
                    Discrepancy::BuildingPostcode {
                        city: city.to_string(),
                        street: s0.to_string(),
                        first: b0.postcode.clone(),
                        second: b1.postcode.clone(),
                    },
                )?;
            }
        }
        Ok(())
    }

    /// Sorts both intersection lists by name, then compares by position.
    fn compare_intersections(
        &self,
        city: &str,
        s0: &mut Street,
        s1: &mut Street,
        out: &mut Emitter<'_>,
    ) -> Result<()> {
        if !self.options.is_enabled(Category::Intersections) {
            return Ok(());
        }
        if s0.intersections.len() != s1.intersections.len() {
            return out.emit(
                &*s0,
                Discrepancy::IntersectionCount {
                    city: city.to_string(),
                    street: s0.to_string(),
                    first: s0.intersections.len(),
                    second: s1.intersections.len(),
                },
            );
        }

        let collator = self.comparator.collator();
        s0.intersections.sort_by_cached_key(|o| collator.key(&o.name));
        s1.intersections.sort_by_cached_key(|o| collator.key(&o.name));

        let street = s0.to_string();
        for (i0, i1) in s0.intersections.iter().zip(&s1.intersections) {
            if i0.name != i1.name {
                out.emit(
                    i0,
                    Discrepancy::IntersectionName {
                        city: city.to_string(),
                        street: street.clone(),
                        first: i0.to_string(),
                        second: i1.to_string(),
                    },
                )?;
            }
            let distance_m = i0.location.distance_to(&i1.location);
            if distance_m > self.options.thresholds.intersection_drift_m {
                out.emit(
                    i0,
                    Discrepancy::IntersectionLocation {
                        city: city.to_string(),
                        street: street.clone(),
                        first: i0.to_string(),
                        second: i1.to_string(),
                        distance_m: distance_m as u64,
                    },
                )?;
            }
        }
        Ok(())
    }
}
