//! Hierarchical binning arithmetic
//!
//! The tabix scheme partitions each chromosome into six levels of bins:
//! level 0 is a single bin spanning the whole sequence, and every deeper
//! level splits each bin into 8 children. Bin identifiers are assigned
//! breadth-first, so level `l` starts at `(8^l - 1) / 7` and a bin's
//! coordinate span at level `l` is `2^(29 - 3l)` base pairs.
//!
//! Everything here is pure arithmetic over zero-based coordinates with
//! half-open `[begin, end)` ranges. The constants are fixed by the on-disk
//! format; changing any of them breaks compatibility with existing `.tbi`
//! files.

/// Shift for the linear-index window size (2^14 = 16,384 bp per window)
pub const WINDOW_SHIFT: u32 = 14;

/// Width of one linear-index window in base pairs
pub const WINDOW_SIZE: u32 = 1 << WINDOW_SHIFT;

/// First bin identifier of the finest level (level 5)
pub const FINEST_BIN_OFFSET: u32 = 4_681;

/// Largest valid coordinate bin identifier
pub const MAX_BIN: u32 = 37_448;

/// Bin identifier reserved for writer summary data, never coordinates
pub const SUMMARY_BIN: u32 = 37_450;

/// Largest coordinate addressable by the bin hierarchy (2^29)
pub const MAX_COORD: u32 = 1 << 29;

/// First bin identifier at a given level: (8^level - 1) / 7
#[inline]
fn level_offset(level: u32) -> u32 {
    ((1 << (3 * level)) - 1) / 7
}

/// Right-shift converting a coordinate to a bin number at a given level
#[inline]
fn level_shift(level: u32) -> u32 {
    29 - 3 * level
}

/// Finest bin fully containing the zero-based half-open range `[begin, end)`.
///
/// Checks levels from finest to coarsest and returns the first level where
/// both endpoints fall in the same bin. An empty or inverted range is
/// treated as the single position at `begin`.
///
/// # Examples
/// ```
/// use varseek::tabix::bin::bin_from_range;
/// // A short range stays in one level-5 bin.
/// assert_eq!(bin_from_range(0, 100), 4681);
/// assert_eq!(bin_from_range(16_384, 16_385), 4682);
/// // A range spanning two level-5 windows is pushed up a level.
/// assert_eq!(bin_from_range(16_000, 17_000), 585);
/// // Only the root covers a whole-chromosome range.
/// assert_eq!(bin_from_range(0, 1 << 29), 0);
/// ```
pub fn bin_from_range(begin: u32, end: u32) -> u32 {
    let end = end.max(begin.saturating_add(1)).min(MAX_COORD) - 1;
    let begin = begin.min(end);
    for level in (1..=5).rev() {
        let shift = level_shift(level);
        if begin >> shift == end >> shift {
            return level_offset(level) + (begin >> shift);
        }
    }
    0
}

/// All bins overlapping the zero-based half-open range `[begin, end)`,
/// coarse to fine.
///
/// This is the set a region query must consult: a record overlapping the
/// range may have been filed under any of these bins depending on its own
/// span.
///
/// # Examples
/// ```
/// use varseek::tabix::bin::bins_for_range;
/// assert_eq!(bins_for_range(0, 1), vec![0, 1, 9, 73, 585, 4681]);
/// assert_eq!(bins_for_range(16_000, 17_000), vec![0, 1, 9, 73, 585, 4681, 4682]);
/// ```
pub fn bins_for_range(begin: u32, end: u32) -> Vec<u32> {
    let end = end.max(begin.saturating_add(1)).min(MAX_COORD) - 1;
    let begin = begin.min(end);

    let mut bins = vec![0];
    for level in 1..=5 {
        let offset = level_offset(level);
        let shift = level_shift(level);
        for bin in (offset + (begin >> shift))..=(offset + (end >> shift)) {
            bins.push(bin);
        }
    }
    bins
}

/// Level-5 bin containing a single zero-based position.
///
/// # Examples
/// ```
/// use varseek::tabix::bin::finest_bin_containing;
/// assert_eq!(finest_bin_containing(0), 4681);
/// assert_eq!(finest_bin_containing(26_699_125), 6310);
/// ```
#[inline]
pub fn finest_bin_containing(position: u32) -> u32 {
    FINEST_BIN_OFFSET + (position >> WINDOW_SHIFT)
}

/// Parent of a bin one level up. Bin 0 is its own parent.
#[inline]
pub fn parent_bin(bin: u32) -> u32 {
    if bin == 0 {
        0
    } else {
        (bin - 1) >> 3
    }
}

/// First child of a bin one level down.
#[inline]
pub fn first_child_bin(bin: u32) -> u32 {
    (bin << 3) + 1
}

/// Whether a bin is the first among its parent's eight children.
///
/// The first child covers the same start coordinate as its parent, which is
/// what lets the offset search climb levels without skipping coordinates.
#[inline]
pub fn is_first_child(bin: u32) -> bool {
    bin % 8 == 1
}

/// Linear-index window holding a zero-based position.
#[inline]
pub fn window_index(position: u32) -> usize {
    (position >> WINDOW_SHIFT) as usize
}
