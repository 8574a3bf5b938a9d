//! Per-chromosome index data
//!
//! One `ReferenceSequence` holds everything the index recorded for a single
//! chromosome: the bin → chunks table and the linear index. Both are built
//! once, when the index file is loaded, and only read afterwards, so a
//! shared `&ReferenceSequence` is safe across threads with no locking.

use std::collections::HashMap;

use crate::tabix::chunk::{Chunk, VirtualOffset};

/// Index data for one chromosome.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceSequence {
    name: String,
    bins: HashMap<u32, Vec<Chunk>>,
    linear_index: Vec<VirtualOffset>,
}

impl ReferenceSequence {
    /// Assemble from loaded parts. Chunk lists keep the file order, which
    /// for indexes produced by coordinate-sorted writers is begin-sorted.
    pub fn new(
        name: impl Into<String>,
        bins: HashMap<u32, Vec<Chunk>>,
        linear_index: Vec<VirtualOffset>,
    ) -> Self {
        ReferenceSequence {
            name: name.into(),
            bins,
            linear_index,
        }
    }

    /// Chromosome name as spelled in the index file.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Chunk list recorded for one bin, if any.
    pub fn chunks_for_bin(&self, bin: u32) -> Option<&[Chunk]> {
        self.bins.get(&bin).map(Vec::as_slice)
    }

    /// The full bin → chunks table.
    pub fn bins(&self) -> &HashMap<u32, Vec<Chunk>> {
        &self.bins
    }

    /// Minimum virtual offsets, one per 16,384-bp window. Empty when the
    /// index carries no linear data for this chromosome.
    pub fn linear_index(&self) -> &[VirtualOffset] {
        &self.linear_index
    }

    /// True when neither bins nor linear index hold any data.
    pub fn is_empty(&self) -> bool {
        self.bins.is_empty() && self.linear_index.is_empty()
    }

    /// Number of distinct bins with recorded chunks.
    pub fn bin_count(&self) -> usize {
        self.bins.len()
    }

    /// Total chunks across all bins.
    pub fn chunk_count(&self) -> usize {
        self.bins.values().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ReferenceSequence {
        let mut bins = HashMap::new();
        bins.insert(4681, vec![Chunk::new(100, 200), Chunk::new(300, 400)]);
        bins.insert(585, vec![Chunk::new(50, 90)]);
        ReferenceSequence::new(
            "chr1",
            bins,
            vec![VirtualOffset::from(50), VirtualOffset::from(300)],
        )
    }

    #[test]
    fn lookup_and_stats() {
        let reference = sample();
        assert_eq!(reference.name(), "chr1");
        assert_eq!(reference.chunks_for_bin(4681).map(|c| c.len()), Some(2));
        assert!(reference.chunks_for_bin(6310).is_none());
        assert_eq!(reference.bin_count(), 2);
        assert_eq!(reference.chunk_count(), 3);
        assert_eq!(reference.linear_index().len(), 2);
        assert!(!reference.is_empty());
    }

    #[test]
    fn default_is_empty() {
        assert!(ReferenceSequence::default().is_empty());
    }
}
