//! Integration tests for the index reader
//!
//! Each test encodes a small index, writes it to a temporary file in one
//! of the accepted framings (plain, single-member gzip, multi-member gzip
//! as BGZF writers produce), reads it back through the public API, and
//! checks the loaded structure and query behavior.

use std::collections::HashMap;
use std::io::Write;

use flate2::write::GzEncoder;
use flate2::Compression;
use tempfile::NamedTempFile;

use varseek::genome::{chromosome_lookup, Chromosome};
use varseek::tabix::{read_index, read_index_with_chromosomes, Index};
use varseek::{IndexError, IndexFormat};

struct RefFixture {
    name: &'static str,
    bins: Vec<(u32, Vec<(u64, u64)>)>,
    linear: Vec<u64>,
}

/// Encode references into the binary tabix layout (uncompressed).
fn encode_index(references: &[RefFixture], trailer: Option<u64>) -> Vec<u8> {
    let mut data = Vec::new();
    data.extend_from_slice(b"TBI\x01");
    data.extend_from_slice(&(references.len() as i32).to_le_bytes());
    for field in [2i32, 1, 2, 0, i32::from(b'#'), 0] {
        data.extend_from_slice(&field.to_le_bytes());
    }

    let mut names = Vec::new();
    for reference in references {
        names.extend_from_slice(reference.name.as_bytes());
        names.push(0);
    }
    data.extend_from_slice(&(names.len() as i32).to_le_bytes());
    data.extend_from_slice(&names);

    for reference in references {
        data.extend_from_slice(&(reference.bins.len() as i32).to_le_bytes());
        for (bin, chunks) in &reference.bins {
            data.extend_from_slice(&bin.to_le_bytes());
            data.extend_from_slice(&(chunks.len() as i32).to_le_bytes());
            for &(begin, end) in chunks {
                data.extend_from_slice(&begin.to_le_bytes());
                data.extend_from_slice(&end.to_le_bytes());
            }
        }
        data.extend_from_slice(&(reference.linear.len() as i32).to_le_bytes());
        for &offset in &reference.linear {
            data.extend_from_slice(&offset.to_le_bytes());
        }
    }

    if let Some(count) = trailer {
        data.extend_from_slice(&count.to_le_bytes());
    }
    data
}

fn sample_references() -> Vec<RefFixture> {
    vec![
        RefFixture {
            name: "chr1",
            bins: vec![
                (585, vec![(0x5_0000, 0x9_ffff)]),
                (4681, vec![(0x5_0000, 0x7_ffff), (0x8_0000, 0x9_ffff)]),
            ],
            linear: vec![0x5_0000, 0x8_0000],
        },
        RefFixture {
            name: "chr2",
            bins: vec![(4681, vec![(0xa_0000, 0xb_ffff)])],
            linear: vec![0xa_0000],
        },
    ]
}

fn write_temp(data: &[u8]) -> NamedTempFile {
    let mut temp = NamedTempFile::new().unwrap();
    temp.write_all(data).unwrap();
    temp.flush().unwrap();
    temp
}

fn gzip(data: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

#[test]
fn plain_and_gzip_files_load_identically() {
    let data = encode_index(&sample_references(), Some(7));

    let plain_file = write_temp(&data);
    let gz_file = write_temp(&gzip(&data));

    let from_plain = read_index(plain_file.path()).unwrap();
    let from_gz = read_index(gz_file.path()).unwrap();

    assert_eq!(from_plain, from_gz);
    assert_eq!(from_plain.format(), IndexFormat::Vcf);
    assert_eq!(from_plain.reference_count(), 2);
    assert_eq!(from_plain.unplaced_count(), Some(7));

    let chr1 = from_plain.reference(0).unwrap();
    assert_eq!(chr1.name(), "chr1");
    assert_eq!(chr1.bin_count(), 2);
    assert_eq!(chr1.chunk_count(), 3);
    assert_eq!(chr1.linear_index().len(), 2);
}

#[test]
fn multi_member_gzip_loads_fully() {
    // BGZF writes many small gzip members back to back. A reader that
    // stops at the first member would see a truncated index here.
    let data = encode_index(&sample_references(), None);
    let split = data.len() / 2;
    let mut members = gzip(&data[..split]);
    members.extend_from_slice(&gzip(&data[split..]));

    let file = write_temp(&members);
    let index = read_index(file.path()).unwrap();

    assert_eq!(index.reference_count(), 2);
    assert_eq!(index.reference(1).unwrap().name(), "chr2");
}

#[test]
fn chromosome_table_realigns_slots() {
    // File order: chr1, chr2. The external numbering puts chr2 at 1 and
    // chr1 at 3, leaving gaps as unpopulated slots.
    let table = chromosome_lookup(&[
        Chromosome::new("chr1", "1", 3),
        Chromosome::new("chr2", "2", 1),
    ]);
    let file = write_temp(&gzip(&encode_index(&sample_references(), None)));

    let index = read_index_with_chromosomes(file.path(), &table).unwrap();

    assert_eq!(index.reference_count(), 4);
    assert!(index.reference(0).is_none());
    assert_eq!(index.reference(1).map(|r| r.name()), Some("chr2"));
    assert!(index.reference(2).is_none());
    assert_eq!(index.reference(3).map(|r| r.name()), Some("chr1"));
}

#[test]
fn references_missing_from_table_are_dropped() {
    let table = chromosome_lookup(&[Chromosome::new("chr1", "1", 0)]);
    let file = write_temp(&encode_index(&sample_references(), None));

    let index = read_index_with_chromosomes(file.path(), &table).unwrap();

    assert_eq!(index.reference_count(), 1);
    assert_eq!(index.reference(0).map(|r| r.name()), Some("chr1"));
}

#[test]
fn colliding_table_slots_keep_the_later_reference() {
    // Both file names fold to one slot, as a table merging chrM and MT
    // spellings can produce. The later reference wins the slot.
    let table = chromosome_lookup(&[
        Chromosome::new("chr1", "1", 0),
        Chromosome::new("chr2", "2", 0),
    ]);
    let file = write_temp(&encode_index(&sample_references(), None));

    let index = read_index_with_chromosomes(file.path(), &table).unwrap();

    assert_eq!(index.reference_count(), 1);
    assert_eq!(index.reference(0).map(|r| r.name()), Some("chr2"));
}

#[test]
fn offsets_resolve_end_to_end_from_file() {
    let file = write_temp(&gzip(&encode_index(&sample_references(), None)));
    let index = read_index(file.path()).unwrap();

    // Window 0 of chr1: linear bound 0x5_0000, refined by the first chunk
    // of bin 4681.
    let chr1 = Chromosome::new("chr1", "1", 0);
    assert_eq!(index.seek_offset(&chr1, 100).value(), 0x5_0000);

    // Unknown chromosome degrades to scan-from-start.
    let unknown = Chromosome::unknown("chrZ");
    assert_eq!(index.seek_offset(&unknown, 100).value(), 0);
}

#[test]
fn corrupt_files_fail_fast() {
    let mut bad_magic = encode_index(&sample_references(), None);
    bad_magic[0] = b'X';
    let file = write_temp(&bad_magic);
    assert!(matches!(
        read_index(file.path()),
        Err(IndexError::InvalidMagic { .. })
    ));

    // Same corruption inside a gzip wrapper surfaces the same way.
    let file = write_temp(&gzip(&bad_magic));
    assert!(matches!(
        read_index(file.path()),
        Err(IndexError::InvalidMagic { .. })
    ));

    // Cut inside the name block, then inside a chunk record.
    let full = encode_index(&sample_references(), None);
    let file = write_temp(&full[..40]);
    assert!(matches!(
        read_index(file.path()),
        Err(IndexError::Truncated(_))
    ));

    let file = write_temp(&full[..60]);
    assert!(matches!(read_index(file.path()), Err(IndexError::Io(_))));
}

#[test]
fn loaded_index_supports_concurrent_batch_queries() {
    let file = write_temp(&encode_index(&sample_references(), None));
    let index: Index = read_index(file.path()).unwrap();

    let queries: Vec<(Chromosome, u32)> = (0..64)
        .map(|i| (Chromosome::new("chr1", "1", (i % 2) as u16), 1 + i * 1000))
        .collect();
    let offsets = index.seek_offsets(&queries);

    assert_eq!(offsets.len(), queries.len());
    for (query, offset) in queries.iter().zip(&offsets) {
        assert_eq!(index.seek_offset(&query.0, query.1), *offset);
    }
}

#[test]
fn empty_index_file_round_trips() {
    let file = write_temp(&encode_index(&[], None));
    let index = read_index(file.path()).unwrap();
    assert_eq!(index.reference_count(), 0);
    assert_eq!(index.unplaced_count(), None);

    let mut map: HashMap<String, Chromosome> = HashMap::new();
    map.insert("chr1".into(), Chromosome::new("chr1", "1", 0));
    let realigned = read_index_with_chromosomes(file.path(), &map).unwrap();
    assert_eq!(realigned.reference_count(), 0);
}
