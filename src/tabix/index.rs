//! Whole-file tabix index
//!
//! An [`Index`] pairs format metadata with one [`ReferenceSequence`] slot
//! per chromosome, aligned by numeric identifier. It is constructed once by
//! the reader and never mutated, so any number of threads can resolve
//! offsets against it concurrently.

use std::fmt;

use log::debug;
use rayon::prelude::*;

use crate::error::{IndexError, Result};
use crate::genome::Chromosome;
use crate::tabix::bin;
use crate::tabix::chunk::VirtualOffset;
use crate::tabix::reference::ReferenceSequence;
use crate::tabix::search;

/// File format the index was built over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexFormat {
    /// Generic tab-delimited text
    Generic = 0,
    /// SAM alignments
    Sam = 1,
    /// VCF variant records
    Vcf = 2,
}

impl IndexFormat {
    /// Parse the on-disk format code. Callers mask off writer flag bits
    /// first; only the low half carries the format.
    pub fn from_code(code: i32) -> Result<Self> {
        match code {
            0 => Ok(IndexFormat::Generic),
            1 => Ok(IndexFormat::Sam),
            2 => Ok(IndexFormat::Vcf),
            other => Err(IndexError::UnknownFormat(other)),
        }
    }

    pub fn code(&self) -> i32 {
        *self as i32
    }
}

impl fmt::Display for IndexFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexFormat::Generic => write!(f, "generic"),
            IndexFormat::Sam => write!(f, "SAM"),
            IndexFormat::Vcf => write!(f, "VCF"),
        }
    }
}

/// Format metadata stored ahead of the per-chromosome data.
///
/// Column positions are zero-based; `-1` marks a column the format does not
/// use (VCF derives its end coordinate from the record itself). They matter
/// only when the indexed file is plain tabular text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexHeader {
    pub format: IndexFormat,
    pub sequence_column: i32,
    pub begin_column: i32,
    pub end_column: i32,
    /// Leading character of comment/meta lines, usually `#`
    pub comment_char: u8,
    /// Header lines to skip before records start
    pub lines_to_skip: u32,
}

impl IndexHeader {
    /// Conventional metadata for VCF: sequence in column 0, begin in
    /// column 1, no end column, `#` comments.
    pub fn vcf() -> Self {
        IndexHeader {
            format: IndexFormat::Vcf,
            sequence_column: 0,
            begin_column: 1,
            end_column: -1,
            comment_char: b'#',
            lines_to_skip: 0,
        }
    }
}

/// A loaded tabix index: format metadata plus per-chromosome data.
#[derive(Debug, Clone, PartialEq)]
pub struct Index {
    header: IndexHeader,
    reference_sequences: Vec<Option<ReferenceSequence>>,
    unplaced_count: Option<u64>,
}

impl Index {
    /// Assemble from loaded parts. Slot position in `reference_sequences`
    /// is the chromosome's numeric identifier; `None` slots are
    /// chromosomes the source file never mentioned.
    pub fn new(header: IndexHeader, reference_sequences: Vec<Option<ReferenceSequence>>) -> Self {
        Index {
            header,
            reference_sequences,
            unplaced_count: None,
        }
    }

    /// Attach the optional trailer count of records without coordinates.
    pub fn with_unplaced_count(mut self, unplaced_count: Option<u64>) -> Self {
        self.unplaced_count = unplaced_count;
        self
    }

    /// Records that had no coordinate at indexing time, when the writer
    /// recorded that figure.
    pub fn unplaced_count(&self) -> Option<u64> {
        self.unplaced_count
    }

    pub fn header(&self) -> &IndexHeader {
        &self.header
    }

    pub fn format(&self) -> IndexFormat {
        self.header.format
    }

    /// Number of reference slots, populated or not.
    pub fn reference_count(&self) -> usize {
        self.reference_sequences.len()
    }

    /// All slots in identifier order, for iteration and reporting.
    pub fn reference_sequences(&self) -> &[Option<ReferenceSequence>] {
        &self.reference_sequences
    }

    /// Index data for one chromosome identifier, if any was recorded.
    pub fn reference(&self, id: u16) -> Option<&ReferenceSequence> {
        self.reference_sequences
            .get(id as usize)
            .and_then(Option::as_ref)
    }

    /// Resolve a chromosome and 1-based position to the virtual offset
    /// where a sequential scan of the data file should start.
    ///
    /// Never fails: a chromosome without index data yields
    /// [`VirtualOffset::ZERO`], meaning "scan from the start of data".
    pub fn seek_offset(&self, chromosome: &Chromosome, position: u32) -> VirtualOffset {
        let Some(reference) = self.reference(chromosome.index) else {
            debug!(
                "no index data for {} (id {}), scanning from start",
                chromosome.ucsc_name, chromosome.index
            );
            return VirtualOffset::ZERO;
        };

        let begin = position.saturating_sub(1);
        let min = search::min_offset(reference, begin);
        let max = search::max_offset(reference, begin + 1);
        let chunks = reference.chunks_for_bin(bin::finest_bin_containing(begin));
        search::min_overlap_offset(chunks, min, max).unwrap_or(min)
    }

    /// Resolve a batch of queries in parallel. Lookups are independent and
    /// the index is read-only, so this is a straight data-parallel map.
    pub fn seek_offsets(&self, queries: &[(Chromosome, u32)]) -> Vec<VirtualOffset> {
        queries
            .par_iter()
            .map(|(chromosome, position)| self.seek_offset(chromosome, *position))
            .collect()
    }
}
