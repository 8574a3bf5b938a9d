//! Tabix index file reader
//!
//! Reads the binary `.tbi` layout: a magic tag, format metadata, the
//! NUL-separated reference name block, then per reference the bin →
//! chunks table and the linear index, all little-endian. Index files are
//! BGZF-compressed, which is plain gzip with multiple concatenated
//! members; decoding goes through `MultiGzDecoder` so members past the
//! first are not silently dropped. Uncompressed input is accepted too,
//! detected by magic bytes.
//!
//! Loading is the one place where this crate fails fast: a malformed
//! index would otherwise send every later query to a silently wrong file
//! position. Offset lookups on the loaded [`Index`] never fail.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use log::{debug, warn};
use memchr::memchr;

use crate::error::{IndexError, Result};
use crate::genome::{find_chromosome, Chromosome};
use crate::tabix::bin::SUMMARY_BIN;
use crate::tabix::chunk::{Chunk, VirtualOffset};
use crate::tabix::index::{Index, IndexFormat, IndexHeader};
use crate::tabix::reference::ReferenceSequence;

/// Tabix index magic tag
const TBI_MAGIC: [u8; 4] = *b"TBI\x01";

/// Gzip member magic
const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Low half of the format field; the upper bits carry writer flags.
const FORMAT_MASK: i32 = 0xffff;

/// Read a tabix index from a file, decompressing if needed.
///
/// Reference slots keep the file's own ordering: the chromosome identifier
/// of slot `i` is `i`. Use [`read_index_with_chromosomes`] to align slots
/// with an external chromosome numbering instead.
pub fn read_index(path: impl AsRef<Path>) -> Result<Index> {
    read_index_from(open_index_reader(path.as_ref())?)
}

/// Read a tabix index, re-seating each reference at the slot given by the
/// caller's chromosome table. References whose name the table does not
/// know cannot be queried by identifier and are dropped with a warning.
pub fn read_index_with_chromosomes(
    path: impl AsRef<Path>,
    table: &HashMap<String, Chromosome>,
) -> Result<Index> {
    let mut reader = BufReader::new(open_index_reader(path.as_ref())?);
    let (header, references, unplaced) = parse_index(&mut reader)?;

    let mut slots: Vec<Option<ReferenceSequence>> = Vec::new();
    for reference in references {
        if reference.is_empty() {
            continue;
        }
        let chromosome = find_chromosome(table, reference.name());
        if !chromosome.is_known() {
            warn!(
                "index references {:?}, which is not in the chromosome table; dropping it",
                reference.name()
            );
            continue;
        }
        let slot = chromosome.index as usize;
        if slots.len() <= slot {
            slots.resize_with(slot + 1, || None);
        }
        if let Some(previous) = &slots[slot] {
            warn!(
                "index names {:?} and {:?} both resolve to slot {}; keeping {:?}",
                previous.name(),
                reference.name(),
                slot,
                reference.name()
            );
        }
        slots[slot] = Some(reference);
    }

    Ok(Index::new(header, slots).with_unplaced_count(unplaced))
}

/// Read a tabix index from any byte source (already decompressed).
pub fn read_index_from<R: Read>(reader: R) -> Result<Index> {
    let mut reader = BufReader::new(reader);
    let (header, references, unplaced) = parse_index(&mut reader)?;
    let populated = references.iter().filter(|r| !r.is_empty()).count();
    debug!(
        "loaded {} index: {} references, {} with data",
        header.format,
        references.len(),
        populated
    );

    let slots = references
        .into_iter()
        .map(|reference| (!reference.is_empty()).then_some(reference))
        .collect();
    Ok(Index::new(header, slots).with_unplaced_count(unplaced))
}

/// Read a tabix index from an in-memory buffer, decompressing if needed.
pub fn read_index_bytes(data: &[u8]) -> Result<Index> {
    if data.len() >= 2 && data[..2] == GZIP_MAGIC {
        read_index_from(MultiGzDecoder::new(data))
    } else {
        read_index_from(data)
    }
}

/// Open a file as a raw index byte stream, sniffing gzip magic the same
/// way chain-style text inputs are sniffed elsewhere in the ecosystem.
fn open_index_reader(path: &Path) -> Result<Box<dyn Read>> {
    let mut file = File::open(path)?;
    let mut magic = [0u8; 2];
    let bytes_read = file.read(&mut magic)?;

    // Reset file position
    drop(file);
    let file = File::open(path)?;

    if bytes_read >= 2 && magic == GZIP_MAGIC {
        Ok(Box::new(MultiGzDecoder::new(file)))
    } else {
        Ok(Box::new(file))
    }
}

fn parse_index<R: Read>(
    reader: &mut R,
) -> Result<(IndexHeader, Vec<ReferenceSequence>, Option<u64>)> {
    let mut magic = [0u8; 4];
    reader.read_exact(&mut magic)?;
    if magic != TBI_MAGIC {
        return Err(IndexError::InvalidMagic { found: magic });
    }

    let n_ref = read_count(reader, "reference")?;
    let format_code = read_i32(reader)?;
    let format = IndexFormat::from_code(format_code & FORMAT_MASK)?;
    let col_seq = read_column(reader, "sequence column")?;
    let col_beg = read_column(reader, "begin column")?;
    let col_end = read_column(reader, "end column")?;
    let meta = read_i32(reader)?;
    let comment_char = u8::try_from(meta).map_err(|_| IndexError::InvalidHeaderField {
        field: "comment character",
        value: meta,
    })?;
    let skip = read_i32(reader)?;
    let l_nm = read_count(reader, "name block byte")?;

    let header = IndexHeader {
        format,
        // Stored 1-based with 0 meaning unused; -1 marks unused here.
        sequence_column: col_seq - 1,
        begin_column: col_beg - 1,
        end_column: col_end - 1,
        comment_char,
        lines_to_skip: skip.max(0) as u32,
    };

    let mut name_block = Vec::with_capacity(l_nm.min(4096));
    reader.by_ref().take(l_nm as u64).read_to_end(&mut name_block)?;
    if name_block.len() != l_nm {
        return Err(IndexError::Truncated("reference name block"));
    }
    let names = parse_names(&name_block, n_ref)?;

    let mut references = Vec::with_capacity(n_ref);
    for name in names {
        references.push(parse_reference(reader, name)?);
    }

    Ok((header, references, read_trailer(reader)?))
}

/// Split the NUL-terminated concatenated name block.
fn parse_names(block: &[u8], declared: usize) -> Result<Vec<String>> {
    let mut names = Vec::with_capacity(declared.min(4096));
    let mut rest = block;
    while let Some(nul) = memchr(0, rest) {
        let name = std::str::from_utf8(&rest[..nul])
            .map_err(|_| IndexError::InvalidName { slot: names.len() })?;
        names.push(name.to_string());
        rest = &rest[nul + 1..];
    }
    if !rest.is_empty() {
        return Err(IndexError::Truncated("reference name block not NUL-terminated"));
    }
    if names.len() != declared {
        return Err(IndexError::NameCountMismatch {
            declared,
            found: names.len(),
        });
    }
    Ok(names)
}

fn parse_reference<R: Read>(reader: &mut R, name: String) -> Result<ReferenceSequence> {
    let n_bin = read_count(reader, "bin")?;
    let mut bins = HashMap::with_capacity(n_bin.min(4096));
    for _ in 0..n_bin {
        let bin_id = read_u32(reader)?;
        let n_chunk = read_count(reader, "chunk")?;

        if bin_id == SUMMARY_BIN {
            // Writer summary pseudo-chunks: file span and mapped/unmapped
            // record counts, not coordinate data. Skipped, and exempt from
            // the begin <= end check, which does not apply to counts.
            for _ in 0..n_chunk {
                read_u64(reader)?;
                read_u64(reader)?;
            }
            continue;
        }

        let mut chunks = Vec::with_capacity(n_chunk.min(4096));
        for _ in 0..n_chunk {
            let begin = read_u64(reader)?;
            let end = read_u64(reader)?;
            if begin > end {
                return Err(IndexError::InvalidChunk {
                    bin: bin_id,
                    begin,
                    end,
                });
            }
            chunks.push(Chunk::new(begin, end));
        }
        bins.insert(bin_id, chunks);
    }

    let n_intv = read_count(reader, "interval")?;
    let mut linear = Vec::with_capacity(n_intv.min(32_768));
    for _ in 0..n_intv {
        linear.push(VirtualOffset::from(read_u64(reader)?));
    }

    Ok(ReferenceSequence::new(name, bins, linear))
}

/// Optional trailer: the count of records without coordinates.
fn read_trailer<R: Read>(reader: &mut R) -> Result<Option<u64>> {
    let mut rest = Vec::new();
    reader.read_to_end(&mut rest)?;
    if rest.len() >= 8 {
        let mut buf = [0u8; 8];
        buf.copy_from_slice(&rest[..8]);
        Ok(Some(u64::from_le_bytes(buf)))
    } else {
        Ok(None)
    }
}

/// Read a 1-based column field, 0 meaning unused; negatives are malformed.
fn read_column<R: Read>(reader: &mut R, field: &'static str) -> Result<i32> {
    let value = read_i32(reader)?;
    if value < 0 {
        return Err(IndexError::InvalidHeaderField { field, value });
    }
    Ok(value)
}

/// Read a declared element count, rejecting negatives before they turn
/// into huge allocations or bogus loops.
fn read_count<R: Read>(reader: &mut R, field: &'static str) -> Result<usize> {
    let value = read_i32(reader)?;
    if value < 0 {
        return Err(IndexError::InvalidCount {
            field,
            value: value as i64,
        });
    }
    Ok(value as usize)
}

fn read_i32<R: Read>(reader: &mut R) -> Result<i32> {
    let mut buf = [0u8; 4];
    reader.read_exact(&mut buf)?;
    Ok(i32::from_le_bytes(buf))
}

fn read_u32<R: Read>(reader: &mut R) -> Result<u32> {
    let mut buf = [0u8; 4];
    reader.read_exact(&mut buf)?;
    Ok(u32::from_le_bytes(buf))
}

fn read_u64<R: Read>(reader: &mut R) -> Result<u64> {
    let mut buf = [0u8; 8];
    reader.read_exact(&mut buf)?;
    Ok(u64::from_le_bytes(buf))
}
