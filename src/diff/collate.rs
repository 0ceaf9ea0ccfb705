//! Primary-strength name collation.
//!
//! Names are compared after canonical decomposition with combining marks
//! removed and case folded, so "Zürich", "ZURICH" and "Zurich" collate equal.

use std::cmp::Ordering;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Drop the first parenthetical qualifier and everything after it.
///
/// `"Springfield (East)"` and `"Springfield"` both become `"Springfield"`.
pub fn strip(name: &str) -> &str {
    match name.find('(') {
        Some(idx) => name[..idx].trim(),
        None => name.trim(),
    }
}

/// Case- and diacritic-insensitive comparator.
#[derive(Debug, Clone, Copy, Default)]
pub struct NameCollator;

impl NameCollator {
    pub fn new() -> Self {
        Self
    }

    /// Sort key whose plain string order is the collation order
    pub fn key(&self, name: &str) -> String {
        name.nfd()
            .filter(|c| !is_combining_mark(*c))
            .flat_map(char::to_lowercase)
            .collect()
    }

    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        self.key(a).cmp(&self.key(b))
    }

    /// Compare with parenthetical qualifiers removed first
    pub fn compare_stripped(&self, a: &str, b: &str) -> Ordering {
        self.compare(strip(a), strip(b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_qualifier() {
        assert_eq!(strip("Springfield (East)"), "Springfield");
        assert_eq!(strip("Springfield"), "Springfield");
        assert_eq!(strip("  Oak (a) (b)"), "Oak");
        assert_eq!(strip("(only)"), "");
    }

    #[test]
    fn test_case_insensitive() {
        let c = NameCollator::new();
        assert_eq!(c.compare("MAIN street", "Main Street"), Ordering::Equal);
    }

    #[test]
    fn test_diacritic_insensitive() {
        let c = NameCollator::new();
        assert_eq!(c.compare("Zürich", "Zurich"), Ordering::Equal);
        assert_eq!(c.compare("Île-de-France", "ile-de-france"), Ordering::Equal);
    }

    #[test]
    fn test_ordering() {
        let c = NameCollator::new();
        assert_eq!(c.compare("Ábrego", "Berlin"), Ordering::Less);
        assert_eq!(c.compare("oak", "Elm"), Ordering::Greater);
    }

    #[test]
    fn test_compare_stripped() {
        let c = NameCollator::new();
        assert_eq!(
            c.compare_stripped("Springfield (East)", "springfield"),
            Ordering::Equal
        );
    }
}
