//! The `Sim` struct and its step loop.

use std::time::Instant;

use cg_agent::{Agent, AgentStore, Census, StepContext};
use cg_core::{HazardClock, SimConfig, WorkerRng};
use cg_disease::DiseaseModel;
use cg_exchange::{Channel, Exchange};
use cg_place::{DestinationRegistry, PlaceStore};
use cg_schedule::ScheduleLibrary;
use rayon::ThreadPool;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::{SimBuilder, SimObserver, SimResult, StepSummary};

// ── Sim ───────────────────────────────────────────────────────────────────────

/// One domain's simulation.
///
/// `Sim` owns every place and agent of the domain and drives the five-phase
/// step described in the crate docs, followed by the exchange when the
/// domain is one of several.
///
/// Create via [`SimBuilder`][crate::SimBuilder] or [`Sim::from_config`].
pub struct Sim {
    /// The resolved configuration this run was built from.
    pub config: SimConfig,

    /// Step counter and hazard rescaling.
    pub clock: HazardClock,

    /// Shared, read-only schedule templates.
    pub schedules: ScheduleLibrary,

    /// Per-hour disease hazards.
    pub disease: DiseaseModel,

    /// Local agents and traveller placeholders.
    pub agents: AgentStore,

    /// Every place of the domain, destinations included.
    pub places: PlaceStore,

    /// Travel destinations, identical on every domain.
    pub destinations: DestinationRegistry,

    /// One stream per chunk; chunk `k` of each collection draws from
    /// `rngs[k]`.
    pub(crate) rngs: Vec<WorkerRng>,

    pub(crate) pool: ThreadPool,

    /// Present only when this domain exchanges agents with others.
    pub(crate) exchange: Option<Exchange<Box<dyn Channel>>>,
}

impl Sim {
    /// Build with every optional input defaulted.
    pub fn from_config(config: SimConfig) -> SimResult<Sim> {
        SimBuilder::new(config).build()
    }

    /// Run `run.n_steps` steps from the current position.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let started = Instant::now();
        let remaining = self.config.run.n_steps.saturating_sub(self.clock.current_step());
        self.run_steps(remaining, observer)?;
        observer.on_sim_end(self.clock.current_step());

        let census = self.census();
        info!(
            domain      = %self.config.domain.name,
            steps       = self.clock.current_step(),
            hours       = self.clock.elapsed_hours(),
            susceptible = census.susceptible,
            infected    = census.infected,
            recovered   = census.recovered,
            dead        = census.dead,
            elapsed_ms  = started.elapsed().as_millis() as u64,
            "run finished"
        );
        Ok(())
    }

    /// Run exactly `n` steps from the current position (ignores `n_steps`).
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_steps<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            observer.on_step_start(self.clock.current_step());
            let summary = self.step()?;
            observer.on_step_end(&summary);
        }
        Ok(())
    }

    /// Census of the active agents as they stand now.
    pub fn census(&self) -> Census {
        self.agents.census()
    }

    pub fn is_distributed(&self) -> bool {
        self.exchange.is_some()
    }

    pub fn n_threads(&self) -> usize {
        self.rngs.len()
    }

    // ── Core step processing ──────────────────────────────────────────────

    /// Run one full step, exchange included, and advance the clock.
    pub fn step(&mut self) -> SimResult<StepSummary> {
        let step = self.clock.current_step();
        let hours = self.clock.step_hours();
        let time_hours = self.clock.elapsed_hours();

        // Explicit field borrows so the borrow checker sees disjoint access.
        let pool = &self.pool;
        let disease = &self.disease;
        let rngs = &mut self.rngs;
        let agents = &mut self.agents;
        let mut marks = [Instant::now(); 6];

        // ── Phase 1: place contamination decays or resets ─────────────────
        let places = &mut self.places;
        pool.install(|| places.as_mut_slice().par_iter_mut().for_each(|p| p.update(hours)));
        marks[1] = Instant::now();

        // ── Phase 2: diseased agents shed into their current place ────────
        //
        // Places are only read from here on; shedding goes through each
        // place's atomic accumulator.
        let places = &*places;
        pool.install(|| {
            agents
                .locals
                .par_iter()
                .chain(agents.travellers.par_iter())
                .filter(|a| a.active)
                .try_for_each(|a| a.shed(disease, hours, places))
        })?;
        marks[2] = Instant::now();

        // ── Phase 3: death, recovery and infection ────────────────────────
        pool.install(|| -> SimResult<()> {
            progress_chunks(&mut agents.locals, rngs, disease, hours, places)?;
            progress_chunks(&mut agents.travellers, rngs, disease, hours, places)
        })?;
        marks[3] = Instant::now();

        // ── Phase 4: counts over active agents ────────────────────────────
        let census = pool.install(|| {
            agents
                .locals
                .par_iter()
                .chain(agents.travellers.par_iter())
                .filter(|a| a.active)
                .fold(Census::default, |c, a| c.record(&a.health))
                .reduce(Census::default, Census::merge)
        });
        marks[4] = Instant::now();

        // ── Phase 5: schedules, journeys and leaver flags ─────────────────
        let ctx = StepContext::new(step, hours, &self.schedules, &self.destinations);
        pool.install(|| {
            agents
                .locals
                .par_iter_mut()
                .chain(agents.travellers.par_iter_mut())
                .filter(|a| a.active)
                .try_for_each(|a| a.update(&ctx))
        })?;
        marks[5] = Instant::now();

        // ── Exchange ──────────────────────────────────────────────────────
        let exchange = match self.exchange.as_mut() {
            Some(ex) => Some(ex.run(step, agents, &self.destinations, &self.schedules)?),
            None => None,
        };

        if step == 0 {
            let us = |a: usize, b: usize| marks[b].duration_since(marks[a]).as_micros() as u64;
            debug!(
                places_us   = us(0, 1),
                shed_us     = us(1, 2),
                disease_us  = us(2, 3),
                count_us    = us(3, 4),
                update_us   = us(4, 5),
                exchange_us = marks[5].elapsed().as_micros() as u64,
                "step 0 phase timings"
            );
        }

        self.clock.advance();
        Ok(StepSummary { step, time_hours, census, exchange })
    }
}

/// Disease progression over one collection.  The collection is cut into
/// `rngs.len()` contiguous chunks and chunk `k` draws only from `rngs[k]`,
/// so the outcome does not depend on which worker runs which chunk.
fn progress_chunks(
    agents:  &mut [Agent],
    rngs:    &mut [WorkerRng],
    disease: &DiseaseModel,
    hours:   f64,
    places:  &PlaceStore,
) -> SimResult<()> {
    if agents.is_empty() || rngs.is_empty() {
        return Ok(());
    }
    let chunk_len = agents.len().div_ceil(rngs.len());
    agents
        .par_chunks_mut(chunk_len)
        .zip(rngs.par_iter_mut())
        .try_for_each(|(chunk, rng)| {
            for agent in chunk.iter_mut().filter(|a| a.active) {
                agent.process_disease(disease, hours, places, rng)?;
            }
            Ok(())
        })
}
