use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser;
use sigma_ecs::{transform_directory, CaselessMatch, MappingConfig, TransformError};
use tracing::{debug, Level};

#[derive(Parser)]
#[command(name = "transform_rules")]
#[command(about = "Rewrite Sigma rules to ECS field names with caseless values")]
#[command(version)]
struct Cli {
    /// Directory containing Sigma YAML rules (searched recursively)
    input_dir: PathBuf,

    /// Directory the rewritten rules are written to
    output_dir: PathBuf,

    /// YAML file with additional or replacement field mappings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// How mapped keys are tested against the caseless set (full-key, first-segment)
    #[arg(long)]
    caseless_match: Option<CaselessMatch>,

    /// Log every rewritten field to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => err.exit(),
            _ => {
                let _ = err.print();
                process::exit(1);
            }
        },
    };

    init_logging(cli.verbose);

    if let Err(err) = run(cli) {
        match err.downcast_ref::<TransformError>() {
            Some(TransformError::MissingInput(path)) => {
                eprintln!("Input directory does not exist: {}", path.display());
            }
            _ => eprintln!("Error: {err:#}"),
        }
        process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => MappingConfig::load(path)
            .with_context(|| format!("loading mapping config {}", path.display()))?,
        None => MappingConfig::default(),
    };
    let mut mapper = config.into_mapper();
    if let Some(caseless_match) = cli.caseless_match {
        mapper = mapper.with_caseless_match(caseless_match);
    }
    debug!(
        fields = mapper.len(),
        caseless_match = %mapper.caseless_match(),
        "Field mapper ready"
    );

    transform_directory(&cli.input_dir, &cli.output_dir, &mapper, |file| {
        println!(
            "Transforming: {} -> {}",
            file.input.display(),
            file.output.display()
        );
    })?;

    println!(
        "Done. Transformed rules written to: {}",
        cli.output_dir.display()
    );
    Ok(())
}
