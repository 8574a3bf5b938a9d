//! Varseek CLI entry point
//!
//! Inspect tabix indexes and resolve chromosome:position queries to
//! virtual offsets.

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Instant;
use varseek::genome::{chromosome_lookup, chromosomes_from_names, find_chromosome, Chromosome};
use varseek::tabix::{read_index, Index};

#[derive(Parser)]
#[command(name = "varseek")]
#[command(about = "Tabix index inspection and virtual-offset lookup")]
#[command(version)]
#[command(author = "Varseek Contributors")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show index metadata and per-chromosome statistics
    Inspect {
        /// Tabix index file (.tbi)
        index: PathBuf,
    },
    /// Resolve queries to virtual offsets in the companion data file
    Offset {
        /// Tabix index file (.tbi)
        index: PathBuf,
        /// Queries like chr2:26699126 (1-based positions, commas allowed)
        #[arg(required = true)]
        queries: Vec<String>,
    },
}

fn load_index(path: &PathBuf) -> anyhow::Result<Index> {
    let start = Instant::now();
    eprintln!("Loading index: {:?}", path);

    let index = read_index(path).with_context(|| format!("failed to load index {:?}", path))?;

    eprintln!("Index loaded in {:.2}s", start.elapsed().as_secs_f64());
    Ok(index)
}

fn parse_query(query: &str) -> anyhow::Result<(String, u32)> {
    let (name, position) = query
        .rsplit_once(':')
        .with_context(|| format!("query {:?} is not chromosome:position", query))?;
    let digits: String = position.chars().filter(|c| *c != ',').collect();
    let position = digits
        .parse()
        .with_context(|| format!("invalid position in {:?}", query))?;
    Ok((name.to_string(), position))
}

/// Name table for resolving query spellings against the index's own
/// reference names.
fn index_chromosome_table(index: &Index) -> HashMap<String, Chromosome> {
    let named = index
        .reference_sequences()
        .iter()
        .enumerate()
        .filter_map(|(slot, reference)| reference.as_ref().map(|r| (slot as u16, r.name())));
    chromosome_lookup(&chromosomes_from_names(named))
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let start = Instant::now();

    match cli.command {
        Commands::Inspect { index } => {
            let index = load_index(&index)?;
            let header = index.header();

            println!("format:        {}", index.format());
            println!(
                "columns:       seq={} begin={} end={}",
                header.sequence_column, header.begin_column, header.end_column
            );
            println!("comment char:  {}", header.comment_char as char);
            println!("lines to skip: {}", header.lines_to_skip);
            println!("references:    {}", index.reference_count());
            if let Some(unplaced) = index.unplaced_count() {
                println!("unplaced:      {}", unplaced);
            }

            println!();
            println!("{:<16} {:>8} {:>10} {:>10}", "name", "bins", "chunks", "windows");
            for reference in index.reference_sequences().iter().flatten() {
                println!(
                    "{:<16} {:>8} {:>10} {:>10}",
                    reference.name(),
                    reference.bin_count(),
                    reference.chunk_count(),
                    reference.linear_index().len()
                );
            }
        }

        Commands::Offset { index, queries } => {
            let index = load_index(&index)?;
            let table = index_chromosome_table(&index);

            let parsed = queries
                .iter()
                .map(|query| {
                    let (name, position) = parse_query(query)?;
                    Ok((find_chromosome(&table, &name), position))
                })
                .collect::<anyhow::Result<Vec<(Chromosome, u32)>>>()?;

            let offsets = index.seek_offsets(&parsed);
            for (query, offset) in queries.iter().zip(&offsets) {
                println!("{}\t{}\t{}", query, offset.value(), offset);
            }
            eprintln!(
                "{} queries resolved in {:.2}s",
                offsets.len(),
                start.elapsed().as_secs_f64()
            );
        }
    }

    Ok(())
}
