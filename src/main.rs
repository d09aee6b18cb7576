use clap::Parser;
use tracing_subscriber::EnvFilter;

use circkit::cli;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("circkit=debug,info")
    } else {
        EnvFilter::new("circkit=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        cli::Commands::Bed(args) => {
            cli::bed::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Classify(args) => {
            cli::classify::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Sites(args) => {
            cli::sites::run(args, cli.format, cli.verbose)?;
        }
    }

    Ok(())
}
