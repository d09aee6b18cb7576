//! Command-line interface for circkit.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **bed**: Build blocked features from an exon table and write them as BED12
//! - **classify**: Flag queries as colinear, chimeric or multiple-hit from PSL alignments
//! - **sites**: Deduplicate binding sites and project them back onto the genome
//!
//! ## Usage
//!
//! ```text
//! # Build features, merging overlapping exons
//! circkit bed exons.tsv --union > circs.bed
//!
//! # Classify junction sequences against the genome and the transcriptome
//! circkit classify --genome genome.psl --other mrna.psl --format json
//!
//! # Map miRanda sites back to genomic coordinates
//! circkit sites circs.bed miranda.txt.gz > sites.bed
//! ```

use clap::{Parser, Subcommand};

pub mod bed;
pub mod classify;
pub mod sites;

#[derive(Parser)]
#[command(name = "circkit")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Coordinate mapping and alignment classification for back-spliced transcripts")]
#[command(
    long_about = "circkit works with features made of blocks that are walked in transcription order, such as circular RNAs.\n\nIt provides:\n- BED12 output for exon groups\n- Colinear, chimeric and multiple-hit flags for junction sequences aligned with BLAT\n- Projection of binding sites found on circularized sequences back to the genome"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build features from an exon table and write BED12
    Bed(bed::BedArgs),

    /// Classify junction sequences from PSL alignments
    Classify(classify::ClassifyArgs),

    /// Deduplicate and project binding sites onto the genome
    Sites(sites::SitesArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}
