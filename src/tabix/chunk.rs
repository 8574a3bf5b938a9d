//! Virtual offsets and chunks
//!
//! A virtual offset addresses a byte inside a block-compressed file without
//! decompressing it: the upper 48 bits locate the start of a compressed
//! block in the file, the lower 16 bits locate a byte inside that block
//! once decompressed. Packed this way, offsets from a coordinate-sorted
//! writer compare correctly as plain integers, which is all the search
//! algorithms rely on.

use std::fmt;

/// A position in a block-compressed file: compressed block start plus
/// uncompressed offset within the block, packed into one ordered `u64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct VirtualOffset(u64);

impl VirtualOffset {
    /// Start of the file; also the "no better bound available" sentinel.
    pub const ZERO: VirtualOffset = VirtualOffset(0);

    /// Unbounded sentinel: scan to end of file.
    pub const MAX: VirtualOffset = VirtualOffset(u64::MAX);

    /// Pack a compressed block position and an uncompressed offset.
    ///
    /// # Examples
    /// ```
    /// use varseek::tabix::VirtualOffset;
    /// let v = VirtualOffset::new(54_801_075, 5_575);
    /// assert_eq!(v.compressed(), 54_801_075);
    /// assert_eq!(v.uncompressed(), 5_575);
    /// assert_eq!(v.value(), 3_591_443_256_775);
    /// ```
    #[inline]
    pub fn new(compressed: u64, uncompressed: u16) -> Self {
        VirtualOffset((compressed << 16) | uncompressed as u64)
    }

    /// Byte position of the compressed block in the file.
    #[inline]
    pub fn compressed(&self) -> u64 {
        self.0 >> 16
    }

    /// Byte offset within the decompressed block.
    #[inline]
    pub fn uncompressed(&self) -> u16 {
        (self.0 & 0xffff) as u16
    }

    /// The packed integer as stored on disk.
    #[inline]
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl From<u64> for VirtualOffset {
    #[inline]
    fn from(value: u64) -> Self {
        VirtualOffset(value)
    }
}

impl From<VirtualOffset> for u64 {
    #[inline]
    fn from(offset: VirtualOffset) -> Self {
        offset.0
    }
}

impl fmt::Display for VirtualOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.compressed(), self.uncompressed())
    }
}

/// A contiguous virtual-offset range holding records filed under one bin.
///
/// Chunks are created when an index is built or loaded and never mutated.
/// A bin can own several disjoint chunks because compression block
/// boundaries do not line up with coordinate order, and the writer only
/// merges chunks closer than its own tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk {
    /// First byte of the range
    pub begin: VirtualOffset,
    /// One past the last byte of the range
    pub end: VirtualOffset,
}

impl Chunk {
    /// Build a chunk from the raw `u64` pair stored on disk.
    #[inline]
    pub fn new(begin: u64, end: u64) -> Self {
        Chunk {
            begin: VirtualOffset::from(begin),
            end: VirtualOffset::from(end),
        }
    }

    /// Whether this chunk intersects the half-open offset range `[min, max)`.
    #[inline]
    pub fn overlaps(&self, min: VirtualOffset, max: VirtualOffset) -> bool {
        self.end > min && self.begin < max
    }
}
