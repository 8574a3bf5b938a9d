//! Varseek - Tabix index reader and virtual-offset search
//!
//! Loads tabix (`.tbi`) indexes for block-compressed, coordinate-sorted
//! genomic files and resolves chromosome + position queries to the virtual
//! offset where a sequential scan should start, without touching the data
//! file itself.
//!
//! # Features
//!
//! - Bit-exact tabix binning arithmetic (6 levels, 16 kb linear windows)
//! - Lock-free concurrent lookups over one loaded index
//! - Parallel batch queries with rayon
//! - Fail-fast validation of malformed index files
//!
//! # Example
//!
//! ```
//! use std::collections::HashMap;
//! use varseek::genome::Chromosome;
//! use varseek::tabix::{Chunk, Index, IndexHeader, ReferenceSequence, VirtualOffset};
//!
//! // Indexes normally come from read_index(); built by hand here.
//! let mut bins = HashMap::new();
//! bins.insert(4681, vec![Chunk::new(0x10000, 0x2ffff)]);
//! let reference = ReferenceSequence::new("1", bins, vec![VirtualOffset::from(0x10000)]);
//! let index = Index::new(IndexHeader::vcf(), vec![Some(reference)]);
//!
//! let chr1 = Chromosome::new("chr1", "1", 0);
//! let offset = index.seek_offset(&chr1, 12_000);
//! assert_eq!(offset.compressed(), 1);
//! ```

pub mod error;
pub mod genome;
pub mod tabix;

// Re-export commonly used types
pub use error::{IndexError, Result};
pub use genome::{chromosome_lookup, find_chromosome, Band, Chromosome};
pub use tabix::{
    read_index, read_index_with_chromosomes, Chunk, Index, IndexFormat, IndexHeader,
    ReferenceSequence, VirtualOffset,
};
