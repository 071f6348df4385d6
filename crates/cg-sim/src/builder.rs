//! Fluent builder for constructing a [`Sim`].

use cg_agent::{Population, build_population};
use cg_core::{SimConfig, WorkerRng};
use cg_disease::DiseaseModel;
use cg_exchange::{Channel, Exchange};
use cg_schedule::ScheduleLibrary;
use rayon::ThreadPoolBuilder;
use tracing::info;

use crate::{Sim, SimError, SimResult};

/// Fluent builder for [`Sim`].
///
/// # Required inputs
///
/// - [`SimConfig`]: run length, seed, thread count, rates, population kind,
///   travel and domain layout.
///
/// # Optional inputs (have defaults)
///
/// | Method            | Default                                            |
/// |-------------------|----------------------------------------------------|
/// | `.schedules(l)`   | `ScheduleLibrary::builtin()`                       |
/// | `.population(p)`  | `build_population(&config, &schedules)`            |
/// | `.channel(c)`     | none; required when `domain.members` lists several |
///
/// # Example
///
/// ```rust,ignore
/// let mut endpoints = ChannelMesh::new(2);
/// let mut sim = SimBuilder::new(config)
///     .channel(endpoints.remove(0))
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder {
    config:     SimConfig,
    schedules:  Option<ScheduleLibrary>,
    population: Option<Population>,
    channel:    Option<Box<dyn Channel>>,
}

impl SimBuilder {
    pub fn new(config: SimConfig) -> Self {
        Self {
            config,
            schedules:  None,
            population: None,
            channel:    None,
        }
    }

    /// Replace the built-in schedule templates.
    pub fn schedules(mut self, schedules: ScheduleLibrary) -> Self {
        self.schedules = Some(schedules);
        self
    }

    /// Supply a ready-made population instead of building one from
    /// `model.kind`.
    pub fn population(mut self, population: Population) -> Self {
        self.population = Some(population);
        self
    }

    /// Connect this domain to its peers.  The endpoint's rank must match the
    /// domain's position in `domain.members`.
    pub fn channel(mut self, channel: impl Channel + 'static) -> Self {
        self.channel = Some(Box::new(channel));
        self
    }

    /// Validate the configuration, build the population and worker pool, and
    /// return a ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim> {
        let config = self.config;
        config.validate()?;
        let clock = config.clock()?;

        let schedules = self.schedules.unwrap_or_else(ScheduleLibrary::builtin);
        let population = match self.population {
            Some(p) => p,
            None => build_population(&config, &schedules)?,
        };

        // ── Exchange ──────────────────────────────────────────────────────
        let exchange = match self.channel {
            Some(channel) => Some(Exchange::new(channel, config.rank()?, config.domain_names())?),
            None if config.is_distributed() => {
                return Err(SimError::Config(format!(
                    "domain '{}' is one of {} domains but no channel was supplied",
                    config.domain.name,
                    config.domain.members.len()
                )));
            }
            None => None,
        };

        // ── Workers ───────────────────────────────────────────────────────
        let n_threads = config.run.n_threads;
        let pool = ThreadPoolBuilder::new()
            .num_threads(n_threads)
            .thread_name(|i| format!("cg-worker-{i}"))
            .build()?;
        let rngs = WorkerRng::streams(config.run.random_seed, n_threads);

        info!(
            domain       = %config.domain.name,
            agents       = population.agents.locals.len(),
            places       = population.places.len(),
            destinations = population.destinations.len(),
            threads      = n_threads,
            step_hours   = clock.step_hours(),
            distributed  = exchange.is_some(),
            "simulation ready"
        );

        Ok(Sim {
            disease:      DiseaseModel::from(&config.disease),
            clock,
            config,
            schedules,
            agents:       population.agents,
            places:       population.places,
            destinations: population.destinations,
            rngs,
            pool,
            exchange,
        })
    }
}
