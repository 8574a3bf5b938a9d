//! Offset search algorithms
//!
//! Three pure functions cooperate to turn a query position into a place to
//! start scanning the compressed data file:
//!
//! 1. [`min_offset`] reads the linear index: a constant-time lower bound
//!    saying "no record starting in or after this window lives earlier".
//! 2. [`max_offset`] walks the bin hierarchy upward from the bin just past
//!    the query window to find the nearest recorded data *after* the query,
//!    giving an upper bound that both stops a scan early and disambiguates
//!    which chunk to start in.
//! 3. [`min_overlap_offset`] picks, from the chunks of the query's own bin,
//!    the first one intersecting `[min, max)` and clamps its begin to the
//!    lower bound.
//!
//! All functions take `&ReferenceSequence` and never mutate; concurrent
//! callers share one loaded index freely.

use crate::tabix::bin;
use crate::tabix::chunk::{Chunk, VirtualOffset};
use crate::tabix::reference::ReferenceSequence;

/// Lower bound for a scan: the linear-index entry of the window holding
/// `begin` (zero-based). Queries past the recorded windows clamp to the
/// last entry; a chromosome with no linear index yields
/// [`VirtualOffset::ZERO`], since scanning from the start is always correct.
pub fn min_offset(reference: &ReferenceSequence, begin: u32) -> VirtualOffset {
    let linear = reference.linear_index();
    if linear.is_empty() {
        return VirtualOffset::ZERO;
    }
    let window = bin::window_index(begin).min(linear.len() - 1);
    linear[window]
}

/// Upper bound for a scan: the smallest chunk begin recorded in the first
/// non-empty bin at or after the query, `end` being a zero-based exclusive
/// bound.
///
/// The walk starts at the level-5 bin immediately following the query
/// window and scans increasing bin identifiers; whenever the current bin is
/// the first child of its parent it climbs a level, because the parent
/// covers the same start coordinate with a wider span. Reaching bin 0 (or
/// starting past the binnable range) means nothing is recorded after the
/// query, and the walk degrades to [`VirtualOffset::MAX`]: scan to end of
/// file.
pub fn max_offset(reference: &ReferenceSequence, end: u32) -> VirtualOffset {
    let mut current = bin::finest_bin_containing(end.saturating_sub(1)) + 1;
    if current > bin::MAX_BIN {
        return VirtualOffset::MAX;
    }

    loop {
        while bin::is_first_child(current) {
            current = bin::parent_bin(current);
        }
        if current == 0 {
            return VirtualOffset::MAX;
        }
        if let Some(first) = reference
            .chunks_for_bin(current)
            .and_then(|chunks| chunks.iter().map(|chunk| chunk.begin).min())
        {
            return first;
        }
        current += 1;
    }
}

/// Resolve a chunk list to the starting offset of a sequential scan: the
/// first chunk intersecting `[min, max)`, with its begin clamped up to
/// `min`. `None` when the list is absent or nothing intersects, leaving the
/// caller to fall back on the lower bound alone.
pub fn min_overlap_offset(
    chunks: Option<&[Chunk]>,
    min: VirtualOffset,
    max: VirtualOffset,
) -> Option<VirtualOffset> {
    chunks?
        .iter()
        .find(|chunk| chunk.overlaps(min, max))
        .map(|chunk| chunk.begin.max(min))
}
