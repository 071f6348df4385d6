//! Population initializers.
//!
//! Each `PopulationKind` is a pure function from configuration to the
//! initial agents, places and destinations of one domain.
//!
//! | Kind               | Places created (in order)                        |
//! |--------------------|--------------------------------------------------|
//! | `simple_one_place` | 1 shared place                                   |
//! | `simple_mobile`    | ⌈n/3⌉ homes, ⌈n/10⌉ workplaces, ⌈n/30⌉ vehicles  |
//!
//! Destination vehicles and lodgings are appended after the population's own
//! places, in configuration order, on every domain alike.
//!
//! All randomness (work/vehicle shuffle, initial infections, traveller
//! choice) comes from one `SimRng` seeded by `run.random_seed`, consumed in
//! that order, so construction is reproducible.

use cg_core::{PlaceSlot, PopulationKind, SimConfig, SimRng};
use cg_place::{DestinationRegistry, PlaceCategory, PlaceSettings, PlaceStore};
use cg_schedule::ScheduleLibrary;
use tracing::info;

use crate::{Agent, AgentStore, PopulationResult, TripPlan};

/// Agents per household.
pub const HOUSEHOLD_SIZE: usize = 3;
/// Agents per workplace.
pub const WORKPLACE_SIZE: usize = 10;
/// Agents per vehicle.
pub const VEHICLE_SIZE: usize = 30;

/// The initial state of one domain.
#[derive(Debug)]
pub struct Population {
    pub agents:       AgentStore,
    pub places:       PlaceStore,
    pub destinations: DestinationRegistry,
}

/// Build the domain's population as configured by `model.kind`.
pub fn build_population(cfg: &SimConfig, schedules: &ScheduleLibrary) -> PopulationResult<Population> {
    let mut rng = SimRng::new(cfg.run.random_seed);
    let settings = PlaceSettings::from(&cfg.places);
    let n = cfg.run.n_agents;
    let schedule = schedules.get(cfg.schedule.kind);

    let mut agents = AgentStore::new(Vec::with_capacity(n));
    for _ in 0..n {
        agents.push_local(|id| Agent::new(id, schedule))?;
    }

    let mut places = match cfg.model.kind {
        PopulationKind::SimpleOnePlace => one_place(&mut agents, settings)?,
        PopulationKind::SimpleMobile => mobile(&mut agents, settings, &mut rng)?,
    };

    let destinations = DestinationRegistry::build(&cfg.travel.destinations, &cfg.domain.name, &mut places, settings)?;

    let infected = rng.sample_indices(n, cfg.disease.initial_infected);
    for &i in &infected {
        agents.locals[i].health.infect();
    }

    if let Some(name) = cfg.travel.destination.as_deref().filter(|_| cfg.travel.travellers > 0) {
        let destination = destinations.find(name)?.id;
        for i in rng.sample_indices(n, cfg.travel.travellers) {
            agents.locals[i].trip = Some(TripPlan { destination, depart_step: cfg.travel.departure_step });
        }
    }

    info!(
        domain       = %cfg.domain.name,
        kind         = %cfg.model.kind,
        agents       = n,
        places       = places.len(),
        destinations = destinations.len(),
        infected     = infected.len(),
        "population built"
    );

    Ok(Population { agents, places, destinations })
}

/// Every slot of every agent is the same single place.
fn one_place(agents: &mut AgentStore, settings: PlaceSettings) -> PopulationResult<PlaceStore> {
    let mut places = PlaceStore::with_capacity(1);
    let shared = places.add(PlaceCategory::Shared, settings)?;
    for agent in &mut agents.locals {
        for slot in PlaceSlot::ALL {
            agent.set_place(slot, shared);
        }
    }
    Ok(places)
}

/// Households by index; workplaces and vehicles filled in shuffled order.
fn mobile(agents: &mut AgentStore, settings: PlaceSettings, rng: &mut SimRng) -> PopulationResult<PlaceStore> {
    let n = agents.locals.len();
    let n_homes = n.div_ceil(HOUSEHOLD_SIZE).max(1);
    let n_works = n.div_ceil(WORKPLACE_SIZE).max(1);
    let n_vehicles = n.div_ceil(VEHICLE_SIZE).max(1);

    let mut places = PlaceStore::with_capacity(n_homes + n_works + n_vehicles);
    let homes = places.add_many(n_homes, PlaceCategory::Home, settings)?;
    let works = places.add_many(n_works, PlaceCategory::Work, settings)?;
    let vehicles = places.add_many(n_vehicles, PlaceCategory::Vehicle, settings)?;

    for (i, agent) in agents.locals.iter_mut().enumerate() {
        agent.set_place(PlaceSlot::Home, homes[i / HOUSEHOLD_SIZE]);
    }

    let mut order: Vec<usize> = (0..n).collect();
    rng.shuffle(&mut order);
    for (k, &i) in order.iter().enumerate() {
        let agent = &mut agents.locals[i];
        agent.set_place(PlaceSlot::Work, works[k / WORKPLACE_SIZE]);
        agent.set_place(PlaceSlot::Vehicle, vehicles[k / VEHICLE_SIZE]);
    }
    Ok(places)
}
