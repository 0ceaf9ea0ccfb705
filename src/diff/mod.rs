//! Comparison engine: collation, entity ordering, duplicate search and the
//! hierarchical merge-join.

pub mod collate;
pub mod comparator;
pub mod differ;
pub mod event;
pub mod fuzzy;

pub use collate::{strip, NameCollator};
pub use comparator::EntityComparator;
pub use differ::{DiffSummary, HierarchyDiffer};
pub use event::{DiffEvent, Discrepancy, Side};
pub use fuzzy::{FuzzyMatcher, PossibleDuplicate};
