//! Run-directory naming.
//!
//! Every run writes into `<output_directory>/<experiment name>/run_<NNNN>`.
//! The number is zero-padded to one digit fewer than `run_prefix` has
//! (`10000` gives `run_0000` .. `run_9999`; larger numbers simply grow).
//! An explicit `run_number >= 0` is used as given; otherwise the first
//! number whose directory does not exist yet is taken.

use std::fs;
use std::path::{Path, PathBuf};

use cg_core::{ExperimentConfig, SimConfig};
use tracing::info;

use crate::{OutputError, OutputResult};

/// File the resolved configuration is saved to inside the run directory.
pub const PARAMETERS_FILE: &str = "RunParameters.toml";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunDirectory {
    path:   PathBuf,
    number: u64,
}

impl RunDirectory {
    /// Resolve the run directory without touching the filesystem beyond
    /// existence checks.
    pub fn resolve(experiment: &ExperimentConfig) -> OutputResult<Self> {
        let base = Path::new(&experiment.output_directory).join(&experiment.name);
        let width = padding(experiment.run_prefix)?;
        let number = match u64::try_from(experiment.run_number) {
            Ok(n) => n,
            Err(_) => (0..)
                .find(|&n| !base.join(run_name(n, width)).exists())
                .ok_or_else(|| OutputError::RunDirectory("no free run number".into()))?,
        };
        Ok(RunDirectory { path: base.join(run_name(number, width)), number })
    }

    /// Resolve and create the run directory.
    pub fn create(experiment: &ExperimentConfig) -> OutputResult<Self> {
        let run = Self::resolve(experiment)?;
        fs::create_dir_all(&run.path)?;
        info!(path = %run.path.display(), "output directory ready");
        Ok(run)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn number(&self) -> u64 {
        self.number
    }

    /// Save `config` as [`PARAMETERS_FILE`], with the run number resolved.
    pub fn save_parameters(&self, config: &SimConfig) -> OutputResult<PathBuf> {
        let mut resolved = config.clone();
        resolved.experiment.run_number = self.number as i64;
        let path = self.path.join(PARAMETERS_FILE);
        fs::write(&path, resolved.to_toml_string()?)?;
        Ok(path)
    }
}

fn padding(run_prefix: u64) -> OutputResult<usize> {
    if run_prefix < 10 {
        return Err(OutputError::RunDirectory(format!("run_prefix {run_prefix} must be at least 10")));
    }
    Ok(run_prefix.to_string().len() - 1)
}

fn run_name(number: u64, width: usize) -> String {
    format!("run_{number:0width$}")
}
