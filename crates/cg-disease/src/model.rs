//! Stochastic disease transitions.
//!
//! All rates are hazards **per simulated hour**, converted to a per-step
//! probability by multiplying with the step length:
//!
//! | Transition | Condition                                  |
//! |------------|--------------------------------------------|
//! | death      | `draw < death_rate * hours`                |
//! | recovery   | `draw < recovery_rate * hours`             |
//! | infection  | `draw < contamination`                     |
//! | shedding   | adds `shed_load * hours` to current place  |
//!
//! Each test takes a fresh draw.  A rate whose per-step probability reaches 1
//! fires regardless of the draw, and so does a contamination level ≥ 1.

use cg_core::{DiseaseConfig, WorkerRng};

use crate::Health;

/// What happened to an agent in one progression step.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Transition {
    None,
    Infected,
    Recovered,
    Died,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DiseaseModel {
    pub recovery_rate: f64,
    pub death_rate:    f64,
    pub shed_load:     f64,
}

impl Default for DiseaseModel {
    fn default() -> Self {
        DiseaseModel { recovery_rate: 0.0008, death_rate: 0.0, shed_load: 0.001 }
    }
}

impl From<&DiseaseConfig> for DiseaseModel {
    fn from(cfg: &DiseaseConfig) -> Self {
        DiseaseModel {
            recovery_rate: cfg.recovery_rate,
            death_rate:    cfg.death_rate,
            shed_load:     cfg.shed_load,
        }
    }
}

impl DiseaseModel {
    #[inline]
    pub fn dies(&self, hours: f64, draw: f64) -> bool {
        draw < self.death_rate * hours
    }

    #[inline]
    pub fn recovers(&self, hours: f64, draw: f64) -> bool {
        draw < self.recovery_rate * hours
    }

    #[inline]
    pub fn infected_by(&self, contamination: f64, draw: f64) -> bool {
        draw < contamination
    }

    /// Contamination one diseased agent sheds per step.
    #[inline]
    pub fn shed(&self, hours: f64) -> f64 {
        self.shed_load * hours
    }

    /// One progression step for one agent.
    ///
    /// A diseased agent first tests death, and only if it survives tests
    /// recovery.  A susceptible agent tests infection against the
    /// contamination of the place it is in.  Dead and immune agents are left
    /// untouched and consume no draws.
    pub fn progress(&self, health: &mut Health, contamination: f64, hours: f64, rng: &mut WorkerRng) -> Transition {
        if !health.alive {
            return Transition::None;
        }
        if health.diseased {
            if self.dies(hours, rng.draw()) {
                health.die();
                return Transition::Died;
            }
            if self.recovers(hours, rng.draw()) {
                health.recover();
                return Transition::Recovered;
            }
            return Transition::None;
        }
        if !health.immune && self.infected_by(contamination, rng.draw()) {
            health.infect();
            return Transition::Infected;
        }
        Transition::None
    }
}
