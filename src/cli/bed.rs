use std::path::PathBuf;

use clap::Args;
use rayon::prelude::*;
use tracing::warn;

use crate::cli::OutputFormat;
use crate::core::feature::BlockedFeature;
use crate::parsing::bed::{to_bed12, BED12_COLUMNS};
use crate::parsing::exons::parse_exon_file;

#[derive(Args)]
pub struct BedArgs {
    /// Exon table: feature_id, chrom, start, end, strand (0-based, half-open)
    #[arg(required = true)]
    pub exons: PathBuf,

    /// Merge overlapping or touching exons instead of rejecting the feature
    #[arg(long)]
    pub union: bool,
}

pub fn run(args: BedArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let groups = parse_exon_file(&args.exons)?;

    // Features are independent; build them in parallel and keep input order
    let built: Vec<_> = groups.par_iter().map(|g| g.build(args.union)).collect();

    let mut features: Vec<BlockedFeature> = Vec::with_capacity(groups.len());
    let mut failed = 0usize;
    for result in built {
        match result {
            Ok(feature) => features.push(feature),
            Err(e) => {
                warn!("Skipping feature: {e}");
                failed += 1;
            }
        }
    }

    if verbose {
        eprintln!(
            "Built {} of {} features from {}",
            features.len(),
            groups.len(),
            args.exons.display()
        );
    }

    if features.is_empty() {
        anyhow::bail!("No valid features in {}", args.exons.display());
    }
    if failed > 0 {
        eprintln!("Warning: {failed} features could not be built");
    }

    match format {
        OutputFormat::Text => print_bed(&features),
        OutputFormat::Json => print_json(&features)?,
        OutputFormat::Tsv => {
            println!("#{}", BED12_COLUMNS.join("\t"));
            print_bed(&features);
        }
    }

    Ok(())
}

fn print_bed(features: &[BlockedFeature]) {
    for feature in features {
        println!("{}", to_bed12(feature));
    }
}

fn print_json(features: &[BlockedFeature]) -> anyhow::Result<()> {
    let output: Vec<serde_json::Value> = features
        .iter()
        .map(|f| {
            serde_json::json!({
                "name": f.name(),
                "chrom": f.chrom(),
                "strand": f.strand(),
                "start": f.start(),
                "end": f.end(),
                "total_length": f.total_length(),
                "blocks": f.genomic_blocks()
                    .iter()
                    .map(|b| [b.start(), b.end()])
                    .collect::<Vec<_>>(),
                "walk": f.walk()
                    .map(|b| {
                        let iv = f.block_interval(b);
                        [iv.start(), iv.end()]
                    })
                    .collect::<Vec<_>>(),
                "relative_starts": f.relative_starts(),
            })
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
