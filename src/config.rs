//! Run configuration: enabled comparison categories and distance thresholds.

use serde::Deserialize;
use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// A comparison rule family. The numeric code is written into structured
/// output so reviewers can filter by rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Cities,
    CityNames,
    Streets,
    StreetNames,
    Buildings,
    Intersections,
}

impl Category {
    pub fn code(&self) -> u32 {
        match self {
            Category::Cities => 11,
            Category::CityNames => 12,
            Category::Streets => 21,
            Category::StreetNames => 22,
            Category::Buildings => 31,
            Category::Intersections => 41,
        }
    }

    /// Command line flag without the leading dashes
    pub fn flag(&self) -> &'static str {
        match self {
            Category::Cities => "cities",
            Category::CityNames => "city-names",
            Category::Streets => "streets",
            Category::StreetNames => "street-names",
            Category::Buildings => "buildings",
            Category::Intersections => "intersections",
        }
    }

    pub fn all() -> &'static [Category] {
        &[
            Category::Cities,
            Category::CityNames,
            Category::Streets,
            Category::StreetNames,
            Category::Buildings,
            Category::Intersections,
        ]
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.flag())
    }
}

/// Set of enabled categories, fixed for the whole run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySet(BTreeSet<Category>);

impl CategorySet {
    pub fn all() -> Self {
        Self(Category::all().iter().copied().collect())
    }

    /// Selected categories, or all of them when nothing was selected.
    pub fn from_selection<I: IntoIterator<Item = Category>>(selection: I) -> Self {
        let set: BTreeSet<Category> = selection.into_iter().collect();
        if set.is_empty() {
            Self::all()
        } else {
            Self(set)
        }
    }

    pub fn contains(&self, category: Category) -> bool {
        self.0.contains(&category)
    }

    pub fn iter(&self) -> impl Iterator<Item = Category> + '_ {
        self.0.iter().copied()
    }
}

impl Default for CategorySet {
    fn default() -> Self {
        Self::all()
    }
}

/// Distance windows in meters.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Same-named cities closer than this are the same city
    pub city_equivalence_m: f64,
    /// Wider window for the duplicate search around an unmatched city
    pub possible_duplicate_m: f64,
    /// Paired intersections further apart than this are reported
    pub intersection_drift_m: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            city_equivalence_m: 5500.0,
            possible_duplicate_m: 25500.0,
            intersection_drift_m: 1500.0,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    thresholds: Thresholds,
}

/// Everything the differ needs to know before the merge pass starts.
#[derive(Debug, Clone, Default)]
pub struct CompareOptions {
    pub categories: CategorySet,
    pub thresholds: Thresholds,
}

impl CompareOptions {
    pub fn new(categories: CategorySet) -> Self {
        Self {
            categories,
            thresholds: Thresholds::default(),
        }
    }

    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn is_enabled(&self, category: Category) -> bool {
        self.categories.contains(category)
    }
}

impl Thresholds {
    /// Read the `[thresholds]` table of a TOML file; missing keys keep defaults.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(content)?;
        Ok(file.thresholds)
    }
}
