//! Genome reference model
//!
//! Chromosome identity with name-variant resolution, and labeled interval
//! (band) lookup.

pub mod band;
pub mod chromosome;

pub use band::{find_band_containing, Band};
pub use chromosome::{
    chromosome_lookup, chromosomes_from_names, find_chromosome, Chromosome, UNKNOWN_INDEX,
};
