//! Labeled interval lookup
//!
//! Cytogenetic bands and similar annotations are stored as sorted,
//! non-overlapping labeled ranges per chromosome. Finding the label for a
//! position is a binary search driven by a three-way comparison of the
//! band against the position.

use std::cmp::Ordering;

/// A labeled range with 1-based inclusive bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Band {
    pub begin: u32,
    pub end: u32,
    pub name: String,
}

impl Band {
    pub fn new(begin: u32, end: u32, name: impl Into<String>) -> Self {
        Band {
            begin,
            end,
            name: name.into(),
        }
    }

    /// Order this band relative to a position: `Greater` when the band lies
    /// past the position, `Less` when it lies before it, `Equal` when the
    /// position falls inside.
    pub fn compare(&self, position: u32) -> Ordering {
        if position < self.begin {
            Ordering::Greater
        } else if position > self.end {
            Ordering::Less
        } else {
            Ordering::Equal
        }
    }
}

/// Binary-search a sorted band list for the band covering a position.
///
/// # Examples
/// ```
/// use varseek::genome::{find_band_containing, Band};
/// let bands = vec![
///     Band::new(1, 2_300_000, "p36.33"),
///     Band::new(2_300_001, 5_400_000, "p36.32"),
/// ];
/// let band = find_band_containing(&bands, 3_000_000);
/// assert_eq!(band.map(|b| b.name.as_str()), Some("p36.32"));
/// assert_eq!(find_band_containing(&bands, 9_000_000), None);
/// ```
pub fn find_band_containing(bands: &[Band], position: u32) -> Option<&Band> {
    bands
        .binary_search_by(|band| band.compare(position))
        .ok()
        .map(|found| &bands[found])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bands() -> Vec<Band> {
        vec![
            Band::new(1, 100, "p1"),
            Band::new(101, 250, "p2"),
            Band::new(251, 500, "q1"),
        ]
    }

    #[test]
    fn compare_is_three_way() {
        let band = Band::new(101, 250, "p2");
        assert_eq!(band.compare(100), Ordering::Greater);
        assert_eq!(band.compare(101), Ordering::Equal);
        assert_eq!(band.compare(250), Ordering::Equal);
        assert_eq!(band.compare(251), Ordering::Less);
    }

    #[test]
    fn boundaries_belong_to_their_band() {
        let bands = bands();
        assert_eq!(find_band_containing(&bands, 1).map(|b| b.name.as_str()), Some("p1"));
        assert_eq!(find_band_containing(&bands, 100).map(|b| b.name.as_str()), Some("p1"));
        assert_eq!(find_band_containing(&bands, 101).map(|b| b.name.as_str()), Some("p2"));
        assert_eq!(find_band_containing(&bands, 500).map(|b| b.name.as_str()), Some("q1"));
    }

    #[test]
    fn positions_outside_all_bands_find_nothing() {
        let bands = bands();
        assert_eq!(find_band_containing(&bands, 0), None);
        assert_eq!(find_band_containing(&bands, 501), None);
        assert_eq!(find_band_containing(&[], 42), None);
    }
}
