//! single: one domain, one process.
//!
//! Builds the population described by a TOML file, runs it for
//! `run.n_steps` steps and writes the per-step summary to
//! `<output_directory>/<experiment>/run_<NNNN>/<output_file>.csv`, next to a
//! `RunParameters.toml` snapshot of the resolved configuration.
//!
//! ```bash
//! cargo run -p single --release -- --config demos/single/config.toml \
//!     --set run.n_agents=6000 --set disease.shed_load=0.002
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cg_core::SimConfig;
use cg_output::{CsvSummaryWriter, RunDirectory, SummaryObserver};
use cg_sim::SimBuilder;

#[derive(Parser, Debug)]
#[command(name = "single", version, about, long_about = None)]
struct Args {
    /// TOML configuration file.  Keys it omits take their defaults.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override one setting, e.g. `--set run.n_agents=1000`.  Repeatable.
    #[arg(long = "set", value_name = "KEY=VALUE")]
    overrides: Vec<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => SimConfig::load(path, &args.overrides)
            .with_context(|| format!("loading {}", path.display()))?,
        None => SimConfig::from_toml_with_overrides("", &args.overrides)?,
    };

    let run = RunDirectory::create(&config.experiment)?;
    run.save_parameters(&config)?;
    let writer = CsvSummaryWriter::create(run.path(), &config.experiment.output_file)?;
    let summary_path = writer.path().to_path_buf();
    let mut observer = SummaryObserver::new(writer);

    let mut sim = SimBuilder::new(config).build()?;
    sim.run(&mut observer)?;
    if let Some(e) = observer.take_error() {
        return Err(e).context("writing the step summary");
    }

    info!(rows = observer.rows(), path = %summary_path.display(), "summary written");
    Ok(())
}
