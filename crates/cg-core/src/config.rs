//! Run configuration.
//!
//! A `SimConfig` is decoded from a TOML document.  Every key has a default,
//! so an empty file is a valid single-domain run of 600 agents for one step.
//! Unknown keys are rejected so typos fail loudly instead of silently taking
//! a default.
//!
//! ```toml
//! [run]
//! n_steps   = 720
//! n_agents  = 6000
//! n_threads = 4
//!
//! [disease]
//! shed_load = 0.002
//!
//! [[travel.destinations]]
//! name   = "harbour"
//! domain = "east"
//! ```
//!
//! Command-line style overrides (`run.n_agents=1000`) are applied to the raw
//! TOML table before typed decoding, so they go through exactly the same
//! validation as file values.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{CoreError, CoreResult, HazardClock, PopulationKind, ScheduleKind, TimeUnit};

// ── Sections ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    pub n_steps:     u64,
    pub n_agents:    usize,
    pub n_threads:   usize,
    pub random_seed: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig { n_steps: 1, n_agents: 600, n_threads: 1, random_seed: 0 }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TimeStepConfig {
    pub units: TimeUnit,
    pub dt:    f64,
}

impl Default for TimeStepConfig {
    fn default() -> Self {
        TimeStepConfig { units: TimeUnit::Hours, dt: 1.0 }
    }
}

/// Hazards are per simulated hour.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiseaseConfig {
    pub recovery_rate:    f64,
    pub death_rate:       f64,
    pub shed_load:        f64,
    pub initial_infected: usize,
}

impl Default for DiseaseConfig {
    fn default() -> Self {
        DiseaseConfig {
            recovery_rate:    0.0007,
            death_rate:       0.0007,
            shed_load:        0.001,
            initial_infected: 1,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlacesConfig {
    /// Exponential decay rate of contamination, per hour.
    pub fractional_decrement: f64,
    /// Zero every place's contamination at the start of each step.
    pub clean_every_step:     bool,
}

impl Default for PlacesConfig {
    fn default() -> Self {
        PlacesConfig { fractional_decrement: 1.0, clean_every_step: false }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScheduleConfig {
    pub kind: ScheduleKind,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModelConfig {
    pub kind: PopulationKind,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExperimentConfig {
    pub output_directory: String,
    pub name:             String,
    /// File stem of the per-step summary CSV.
    pub output_file:      String,
    /// Explicit run number; negative means "next unused".
    pub run_number:       i64,
    /// Zero-padding template: run numbers get `digits(run_prefix) - 1` digits.
    pub run_prefix:       u64,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        ExperimentConfig {
            output_directory: "./output".into(),
            name:             "default".into(),
            output_file:      "diseaseSummary".into(),
            run_number:       -1,
            run_prefix:       10000,
        }
    }
}

/// One named travel destination and the domain that hosts it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DestinationConfig {
    pub name:   String,
    pub domain: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TravelConfig {
    pub destinations:   Vec<DestinationConfig>,
    /// Number of local agents given a trip.
    pub travellers:     usize,
    /// Destination name for those trips.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination:    Option<String>,
    /// First step at which a traveller leaves home.
    pub departure_step: u64,
}

/// Identity of this process within a multi-domain run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DomainConfig {
    pub name:    String,
    /// All participating domains in rank order.  Empty means single-domain.
    pub members: Vec<String>,
}

impl Default for DomainConfig {
    fn default() -> Self {
        DomainConfig { name: "main".into(), members: Vec::new() }
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimConfig {
    pub run:        RunConfig,
    pub time_step:  TimeStepConfig,
    pub disease:    DiseaseConfig,
    pub places:     PlacesConfig,
    pub schedule:   ScheduleConfig,
    pub model:      ModelConfig,
    pub experiment: ExperimentConfig,
    pub travel:     TravelConfig,
    pub domain:     DomainConfig,
}

impl SimConfig {
    /// Decode and validate a TOML document.
    pub fn from_toml_str(text: &str) -> CoreResult<Self> {
        Self::from_toml_with_overrides::<&str>(text, &[])
    }

    /// Decode a TOML document after applying `dotted.key=value` overrides.
    pub fn from_toml_with_overrides<S: AsRef<str>>(text: &str, overrides: &[S]) -> CoreResult<Self> {
        let mut table: toml::Table = toml::from_str(text)?;
        for ov in overrides {
            apply_override(&mut table, ov.as_ref())?;
        }
        let cfg: SimConfig = toml::Value::Table(table).try_into()?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, override and validate a configuration file.
    pub fn load<S: AsRef<str>>(path: &Path, overrides: &[S]) -> CoreResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_with_overrides(&text, overrides)
    }

    pub fn to_toml_string(&self) -> CoreResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Hazard clock for this run's step length.
    pub fn clock(&self) -> CoreResult<HazardClock> {
        HazardClock::new(self.time_step.dt, self.time_step.units)
    }

    /// More than one domain participates.
    pub fn is_distributed(&self) -> bool {
        self.domain.members.len() > 1
    }

    /// All domain names in rank order; a single-domain run has just its own.
    pub fn domain_names(&self) -> Vec<String> {
        if self.domain.members.is_empty() {
            vec![self.domain.name.clone()]
        } else {
            self.domain.members.clone()
        }
    }

    /// Position of this domain in `domain.members`.
    pub fn rank(&self) -> CoreResult<usize> {
        self.domain_names()
            .iter()
            .position(|n| *n == self.domain.name)
            .ok_or_else(|| {
                CoreError::Config(format!("domain {:?} is not listed in domain.members", self.domain.name))
            })
    }

    /// Reject values that would make the run meaningless before any stepping.
    pub fn validate(&self) -> CoreResult<()> {
        if self.run.n_threads == 0 {
            return Err(CoreError::Config("run.n_threads must be at least 1".into()));
        }
        self.clock()?;

        let rates = [
            ("disease.recovery_rate", self.disease.recovery_rate),
            ("disease.death_rate", self.disease.death_rate),
            ("disease.shed_load", self.disease.shed_load),
            ("places.fractional_decrement", self.places.fractional_decrement),
        ];
        for (key, v) in rates {
            if !v.is_finite() || v < 0.0 {
                return Err(CoreError::Config(format!("{key} must be a non-negative number, got {v}")));
            }
        }

        if self.experiment.output_file.trim().is_empty() {
            return Err(CoreError::Config("experiment.output_file must not be empty".into()));
        }
        if self.experiment.run_prefix < 10 {
            return Err(CoreError::Config("experiment.run_prefix must be at least 10".into()));
        }

        self.rank()?;
        let names = self.domain_names();
        for (i, name) in names.iter().enumerate() {
            if names[..i].contains(name) {
                return Err(CoreError::Config(format!("domain {name:?} listed twice")));
            }
        }

        for (i, dest) in self.travel.destinations.iter().enumerate() {
            if !names.contains(&dest.domain) {
                return Err(CoreError::Config(format!(
                    "destination {:?} refers to unknown domain {:?}",
                    dest.name, dest.domain
                )));
            }
            if self.travel.destinations[..i].iter().any(|d| d.name == dest.name) {
                return Err(CoreError::Config(format!("destination {:?} defined twice", dest.name)));
            }
            // Records carry no destination, so a receiving domain can only
            // place visitors at the one destination it hosts.
            let shared = self.travel.destinations[..i].iter().find(|d| d.domain == dest.domain);
            if let (true, Some(other)) = (self.is_distributed(), shared) {
                return Err(CoreError::Config(format!(
                    "domain {:?} hosts both {:?} and {:?}; at most one destination per domain",
                    dest.domain, other.name, dest.name
                )));
            }
        }
        if self.travel.travellers > 0 {
            let Some(target) = &self.travel.destination else {
                return Err(CoreError::Config(
                    "travel.travellers is set but travel.destination is missing".into(),
                ));
            };
            if !self.travel.destinations.iter().any(|d| &d.name == target) {
                return Err(CoreError::Config(format!("travel.destination {target:?} is not defined")));
            }
        }
        Ok(())
    }
}

// ── Overrides ─────────────────────────────────────────────────────────────────

/// Set `dotted.key=value` in a raw TOML table.
///
/// The value is parsed as a TOML literal when possible (`12`, `0.5`, `true`,
/// `"text"`, `[1, 2]`); anything else is taken as a bare string.
pub fn apply_override(table: &mut toml::Table, spec: &str) -> CoreResult<()> {
    let (key, raw) = spec.split_once('=').ok_or_else(|| CoreError::Override(spec.to_string()))?;
    let key = key.trim();
    if key.is_empty() || key.split('.').any(str::is_empty) {
        return Err(CoreError::Override(spec.to_string()));
    }
    let value = parse_literal(raw.trim());

    let mut parts: Vec<&str> = key.split('.').collect();
    let leaf = parts.pop().ok_or_else(|| CoreError::Override(spec.to_string()))?;
    let mut cursor = table;
    for part in parts {
        let entry = cursor
            .entry(part.to_string())
            .or_insert_with(|| toml::Value::Table(toml::Table::new()));
        cursor = match entry {
            toml::Value::Table(t) => t,
            _ => return Err(CoreError::Override(spec.to_string())),
        };
    }
    cursor.insert(leaf.to_string(), value);
    Ok(())
}

fn parse_literal(raw: &str) -> toml::Value {
    toml::from_str::<toml::Table>(&format!("v = {raw}"))
        .ok()
        .and_then(|mut t| t.remove("v"))
        .unwrap_or_else(|| toml::Value::String(raw.to_string()))
}
