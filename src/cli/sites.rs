use std::collections::HashMap;
use std::path::PathBuf;

use clap::Args;
use tracing::warn;

use crate::binding::{feature_lengths, ProjectedSite, SiteProjector, WrapDeduplicator};
use crate::cli::OutputFormat;
use crate::core::feature::BlockedFeature;
use crate::parsing::bed::{parse_bed_file, to_bed12, BED12_COLUMNS};
use crate::parsing::miranda::parse_miranda_file;

#[derive(Args)]
pub struct SitesArgs {
    /// Features the sequences were built from (BED12, names must match miRanda references)
    #[arg(required = true)]
    pub features: PathBuf,

    /// miRanda output run on the circularized sequences
    #[arg(required = true)]
    pub miranda: PathBuf,
}

pub fn run(args: SitesArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let bed = parse_bed_file(&args.features)?;
    if bed.records.is_empty() {
        anyhow::bail!("No valid features in {}", args.features.display());
    }

    let mut features: HashMap<String, BlockedFeature> = HashMap::with_capacity(bed.records.len());
    for feature in bed.records {
        if features.contains_key(feature.name()) {
            warn!("Duplicate feature name '{}'; keeping the first", feature.name());
            continue;
        }
        features.insert(feature.name().to_string(), feature);
    }
    let lengths = feature_lengths(features.values());

    let hits = parse_miranda_file(&args.miranda)?;
    let hit_count = hits.records.len();
    let outcome = WrapDeduplicator::new(&lengths).dedup(hits.records);
    let (sites, failed) = SiteProjector::new(&features).project_all(&outcome.kept);

    if verbose {
        eprintln!(
            "Features: {} loaded, {} rejected",
            features.len(),
            bed.rejected.len()
        );
        eprintln!(
            "Binding hits: {hit_count} read, {} rejected, {} wrap duplicates, {} out of range, {} without feature",
            hits.rejected.len(),
            outcome.wrap_duplicates,
            outcome.out_of_range,
            outcome.unknown_reference
        );
        eprintln!("Sites: {} projected, {} failed", sites.len(), failed.len());
    }

    match format {
        OutputFormat::Text => print_bed(&sites),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&sites)?),
        OutputFormat::Tsv => print_tsv(&sites),
    }

    Ok(())
}

fn print_bed(sites: &[ProjectedSite]) {
    for site in sites {
        println!(
            "{}\t{}",
            to_bed12(&site.genomic),
            u8::from(site.crosses_junction)
        );
    }
}

fn print_tsv(sites: &[ProjectedSite]) {
    println!(
        "#{}\tcross_boundary\tquery_id\treference_id\tscore\tenergy",
        BED12_COLUMNS.join("\t")
    );
    for site in sites {
        println!(
            "{}\t{}\t{}\t{}\t{:.2}\t{:.2}",
            to_bed12(&site.genomic),
            u8::from(site.crosses_junction),
            site.hit.query_id,
            site.hit.reference_id,
            site.hit.score,
            site.hit.energy
        );
    }
}
