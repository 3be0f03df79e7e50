//! Command line entry point: analyses one CSV file and prints the labeled report.

use anyhow::Context;
use clap::Parser;
use diabetes_insight::config::{DEFAULT_INPUT_FILE, PipelineConfig};
use diabetes_insight::pipeline;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "diabetes-insight")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Descriptive analysis and baseline models for the diabetes prediction dataset")]
#[command(long_about = None)]
struct Cli {
    /// CSV file with the diabetes prediction table
    #[arg(default_value = DEFAULT_INPUT_FILE)]
    input: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = PipelineConfig::with_input(cli.input);

    let report = pipeline::run(&config)
        .with_context(|| format!("analysis of {} failed", config.input_path.display()))?;
    print!("{}", report);

    Ok(())
}
