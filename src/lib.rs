//! addrcmp - regression diff for compiled address indexes
//!
//! Compares two builds of the same region city by city and reports missing,
//! renamed or moved cities, streets, buildings and intersections.

pub mod config;
pub mod diff;
pub mod error;
pub mod models;
pub mod reader;
pub mod sink;

pub use config::{Category, CategorySet, CompareOptions, Thresholds};
pub use diff::{DiffEvent, DiffSummary, Discrepancy, HierarchyDiffer, Side};
pub use error::{Error, Result};
pub use models::{Building, City, CityType, GeoPoint, MapObject, Region, Street};
pub use reader::{AddressIndex, SnapshotIndex};
