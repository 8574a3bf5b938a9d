//! Tabix index core
//!
//! Data model, binning arithmetic, offset search, and the `.tbi` file
//! reader.

pub mod bin;
pub mod chunk;
pub mod index;
pub mod reader;
pub mod reference;
pub mod search;

pub use chunk::{Chunk, VirtualOffset};
pub use index::{Index, IndexFormat, IndexHeader};
pub use reader::{read_index, read_index_bytes, read_index_from, read_index_with_chromosomes};
pub use reference::ReferenceSequence;
pub use search::{max_offset, min_offset, min_overlap_offset};
