use std::path::{Path, PathBuf};

use clap::Args;

use crate::classify::{
    AlignmentClassifier, AmbiguityReport, ClassifiedReference, ClassifierConfig,
};
use crate::cli::OutputFormat;
use crate::core::types::ReferenceKind;
use crate::parsing::psl::parse_psl_file;

#[derive(Args)]
pub struct ClassifyArgs {
    /// PSL alignments against the genome (repeat for several searches)
    #[arg(long, required = true, num_args = 1..)]
    pub genome: Vec<PathBuf>,

    /// PSL alignments against other references, e.g. a transcriptome
    #[arg(long, num_args = 1..)]
    pub other: Vec<PathBuf>,

    /// JSON file with classifier thresholds
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Identity fraction a hit must exceed to be colinear
    #[arg(long)]
    pub colinear_threshold: Option<f64>,

    /// Distance from a query end within which a hit counts as anchored there
    #[arg(long)]
    pub end_tolerance: Option<u64>,

    /// Matches the best hit at each end needs for a chimera call
    #[arg(long)]
    pub min_matches: Option<u64>,

    /// Lead the best hit needs over the runner-up at each end
    #[arg(long)]
    pub min_diff: Option<u64>,
}

/// One classified PSL input and the number of records it dropped
struct ClassifiedInput {
    path: PathBuf,
    hits: usize,
    rejected: usize,
}

pub fn run(args: ClassifyArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let config = build_config(&args)?;
    let classifier = AlignmentClassifier::new(config);

    if verbose {
        eprintln!(
            "Thresholds: colinear > {}, end tolerance {}, min matches {}, min diff {}",
            classifier.config().colinear_threshold,
            classifier.config().end_tolerance,
            classifier.config().min_matches,
            classifier.config().min_diff
        );
    }

    let inputs = args
        .genome
        .iter()
        .map(|p| (p, ReferenceKind::Genome))
        .chain(args.other.iter().map(|p| (p, ReferenceKind::Other)));

    let mut references = Vec::new();
    let mut summaries = Vec::new();
    for (path, kind) in inputs {
        let (reference, summary) = classify_file(&classifier, path, kind)?;
        if verbose {
            eprintln!(
                "{} ({kind}): {} hits, {} rejected",
                path.display(),
                summary.hits,
                summary.rejected
            );
        }
        references.push(reference);
        summaries.push(summary);
    }

    let report = AmbiguityReport::combine(references);

    match format {
        OutputFormat::Text => print_text_report(&report, &summaries),
        OutputFormat::Json => print_json_report(&report, &summaries, classifier.config())?,
        OutputFormat::Tsv => print_tsv_report(&report),
    }

    Ok(())
}

fn build_config(args: &ClassifyArgs) -> anyhow::Result<ClassifierConfig> {
    let mut config = match &args.config {
        Some(path) => ClassifierConfig::load_from_file(path)?,
        None => ClassifierConfig::default(),
    };

    if let Some(threshold) = args.colinear_threshold {
        config.colinear_threshold = threshold;
    }
    if let Some(tolerance) = args.end_tolerance {
        config.end_tolerance = tolerance;
    }
    if let Some(min_matches) = args.min_matches {
        config.min_matches = min_matches;
    }
    if let Some(min_diff) = args.min_diff {
        config.min_diff = min_diff;
    }

    config.validate()?;
    Ok(config)
}

fn classify_file(
    classifier: &AlignmentClassifier,
    path: &Path,
    kind: ReferenceKind,
) -> anyhow::Result<(ClassifiedReference, ClassifiedInput)> {
    let batch = parse_psl_file(path)?;
    let result = classifier.classify(&batch.records);

    let reference = ClassifiedReference {
        label: path.display().to_string(),
        kind,
        result,
    };
    let summary = ClassifiedInput {
        path: path.to_path_buf(),
        hits: batch.records.len(),
        rejected: batch.rejected.len(),
    };

    Ok((reference, summary))
}

fn print_text_report(report: &AmbiguityReport, summaries: &[ClassifiedInput]) {
    println!("Classification Results");
    println!("{}", "=".repeat(60));

    for (reference, summary) in report.references.iter().zip(summaries) {
        println!("\n{} ({})", summary.path.display(), reference.kind);
        println!("  Hits: {}", summary.hits);
        if summary.rejected > 0 {
            println!("  Rejected records: {}", summary.rejected);
        }
        println!("  Colinear: {}", reference.result.colinear.len());
        println!("  Chimeric: {}", reference.result.chimeric.len());
        println!("  Multiple hits: {}", reference.result.multiple_hits.len());
    }

    let queries = report.queries();
    let ambiguous = queries
        .iter()
        .filter(|q| report.flags(q).is_ambiguous())
        .count();

    println!("\nCombined:");
    println!("  Queries: {}", queries.len());
    println!("  Colinear: {}", report.colinear.len());
    println!("  Multiple hits: {}", report.multiple_hits.len());
    println!("  Chimeric: {}", report.chimeric.len());
    println!("  Ambiguous: {ambiguous}");

    if ambiguous > 0 {
        println!("\nAmbiguous queries:");
        for query in queries {
            let flags = report.flags(query);
            if !flags.is_ambiguous() {
                continue;
            }
            let mut reasons = Vec::new();
            if flags.colinear {
                reasons.push("colinear");
            }
            if flags.multiple_hits {
                reasons.push("multiple hits");
            }
            println!("  {query}: {}", reasons.join(", "));
        }
    }
}

fn print_json_report(
    report: &AmbiguityReport,
    summaries: &[ClassifiedInput],
    config: &ClassifierConfig,
) -> anyhow::Result<()> {
    let references: Vec<serde_json::Value> = report
        .references
        .iter()
        .zip(summaries)
        .map(|(reference, summary)| {
            serde_json::json!({
                "path": summary.path.display().to_string(),
                "kind": reference.kind,
                "hits": summary.hits,
                "rejected": summary.rejected,
                "colinear": reference.result.colinear,
                "chimeric": reference.result.chimeric,
                "multiple_hits": reference.result.multiple_hits,
            })
        })
        .collect();

    let queries: Vec<serde_json::Value> = report
        .queries()
        .into_iter()
        .map(|query| {
            let flags = report.flags(query);
            serde_json::json!({
                "query": query,
                "colinear": flags.colinear,
                "multiple_hits": flags.multiple_hits,
                "chimeric": flags.chimeric,
                "ambiguous": flags.is_ambiguous(),
            })
        })
        .collect();

    let output = serde_json::json!({
        "config": config,
        "references": references,
        "queries": queries,
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv_report(report: &AmbiguityReport) {
    println!("query\tcolinear\tmultiple_hits\tchimeric\tambiguous");
    for query in report.queries() {
        let flags = report.flags(query);
        println!(
            "{query}\t{}\t{}\t{}\t{}",
            flags.colinear,
            flags.multiple_hits,
            flags.chimeric,
            flags.is_ambiguous()
        );
    }
}
