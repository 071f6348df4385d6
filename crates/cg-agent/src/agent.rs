//! Per-agent state and the operations that advance it one step.
//!
//! # Journeys
//!
//! ```text
//!            trip due, at home
//!  Settled ─────────────────────▶ Away ──(remote)──▶ leaver, leaves domain
//!     ▲                            │                         │
//!     │ return_trip cycle done     │ remote_travel cycle     │ returns via exchange
//!     │                            ▼ done (local trip)       ▼
//!     └──────────────────────── Returning ◀───────────────────┘
//! ```
//!
//! A traveller placeholder is `Visiting`: it follows the `remote_travel`
//! schedule on this domain's copy of the destination and raises `leaver` when
//! that cycle completes.

use cg_core::{AgentId, DestinationId, PlaceId, PlaceSlot, ScheduleKind, WorkerRng};
use cg_disease::{DiseaseModel, Health, Transition};
use cg_place::{PlaceStore, TravelDestination};
use cg_schedule::{ScheduleCursor, ScheduleTemplate};

use crate::{PopulationError, PopulationResult, StepContext};

// ── Journey ───────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Journey {
    /// Following its everyday schedule.
    #[default]
    Settled,
    /// Outbound or staying at `destination`.
    Away { destination: DestinationId },
    /// On the way back from a trip.
    Returning,
    /// Placeholder for an agent whose home domain has rank `origin`.
    Visiting { origin: usize },
}

/// A trip an agent will take once it is at home on or after `depart_step`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TripPlan {
    pub destination: DestinationId,
    pub depart_step: u64,
}

// ── Agent ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Agent {
    pub id:            AgentId,
    pub health:        Health,
    /// Concrete place for every slot, indexed by `PlaceSlot::index()`.
    pub places:        [PlaceId; PlaceSlot::COUNT],
    /// Everyday places saved while a journey overrides `places`.
    pub place_cache:   [PlaceId; PlaceSlot::COUNT],
    /// Slot the agent currently occupies.
    pub slot:          PlaceSlot,
    pub cursor:        ScheduleCursor,
    /// Schedule restored when a journey ends.
    pub base_schedule: ScheduleKind,
    pub trip:          Option<TripPlan>,
    pub journey:       Journey,
    /// Inactive agents are dormant copies: skipped by every pipeline phase.
    pub active:        bool,
    /// Set when the agent must cross to another domain at the next exchange.
    pub leaver:        bool,
}

impl Agent {
    /// A susceptible, settled agent with no places assigned yet.
    pub fn new(id: AgentId, schedule: &ScheduleTemplate) -> Self {
        let cursor = ScheduleCursor::start(schedule);
        Agent {
            id,
            health:        Health::SUSCEPTIBLE,
            places:        [PlaceId::INVALID; PlaceSlot::COUNT],
            place_cache:   [PlaceId::INVALID; PlaceSlot::COUNT],
            slot:          cursor.slot(schedule),
            cursor,
            base_schedule: schedule.kind(),
            trip:          None,
            journey:       Journey::Settled,
            active:        true,
            leaver:        false,
        }
    }

    /// A placeholder for the remote agent `id`, visiting `destination`.
    pub fn visitor(
        id:          AgentId,
        origin:      usize,
        destination: &TravelDestination,
        schedule:    &ScheduleTemplate,
        health:      Health,
    ) -> Self {
        let mut agent = Agent::new(id, schedule);
        agent.health = health;
        agent.begin_visit(origin, destination, schedule);
        agent
    }

    // ── Places ────────────────────────────────────────────────────────────

    #[inline]
    pub fn place(&self, slot: PlaceSlot) -> PlaceId {
        self.places[slot.index()]
    }

    #[inline]
    pub fn set_place(&mut self, slot: PlaceSlot, place: PlaceId) {
        self.places[slot.index()] = place;
    }

    /// Handle of the place the agent is in now.
    pub fn current_place(&self) -> PopulationResult<PlaceId> {
        let place = self.place(self.slot);
        if place.is_valid() {
            Ok(place)
        } else {
            Err(PopulationError::UnsetPlace { agent: self.id, slot: self.slot })
        }
    }

    // ── Schedules ─────────────────────────────────────────────────────────

    /// Make `schedule` the everyday schedule and restart on it.
    pub fn set_base_schedule(&mut self, schedule: &ScheduleTemplate) {
        self.base_schedule = schedule.kind();
        self.switch_schedule(schedule);
    }

    /// Hard switch to `schedule`: position and countdown restart.
    pub fn switch_schedule(&mut self, schedule: &ScheduleTemplate) {
        self.slot = self.cursor.reset(schedule);
    }

    // ── Pipeline operations ───────────────────────────────────────────────

    /// Add this step's shed load to the current place if diseased.
    pub fn shed(&self, model: &DiseaseModel, hours: f64, places: &PlaceStore) -> PopulationResult<()> {
        if !self.health.diseased {
            return Ok(());
        }
        let place = places.try_get(self.current_place()?)?;
        place.add_contamination(model.shed(hours));
        Ok(())
    }

    /// Death, recovery and infection tests against the current place.
    pub fn process_disease(
        &mut self,
        model:  &DiseaseModel,
        hours:  f64,
        places: &PlaceStore,
        rng:    &mut WorkerRng,
    ) -> PopulationResult<Transition> {
        if !self.health.alive {
            return Ok(Transition::None);
        }
        let contamination = places.try_get(self.current_place()?)?.contamination();
        Ok(model.progress(&mut self.health, contamination, hours, rng))
    }

    /// Advance the schedule, finish journey legs and run arrival hooks.
    pub fn update(&mut self, ctx: &StepContext<'_>) -> PopulationResult<()> {
        let tick = self.cursor.tick(ctx.step_hours, ctx.schedules.get(self.cursor.kind));
        if let Some(slot) = tick.arrived {
            self.slot = slot;
        }
        if tick.cycles_completed > 0 {
            self.finish_cycle(ctx);
        }
        match self.slot {
            PlaceSlot::Home => self.at_home(ctx),
            PlaceSlot::Work | PlaceSlot::Vehicle => Ok(()),
        }
    }

    fn at_home(&mut self, ctx: &StepContext<'_>) -> PopulationResult<()> {
        if self.journey != Journey::Settled {
            return Ok(());
        }
        match self.trip {
            Some(trip) if ctx.step >= trip.depart_step => {
                let destination = ctx.destinations.try_get(trip.destination)?;
                self.trip = None;
                self.depart(destination, ctx.schedules.get(ScheduleKind::RemoteTravel));
                Ok(())
            }
            _ => Ok(()),
        }
    }

    fn finish_cycle(&mut self, ctx: &StepContext<'_>) {
        match self.journey {
            Journey::Away { .. } => self.inward_travel(ctx.schedules.get(ScheduleKind::ReturnTrip)),
            Journey::Returning => self.arrive_home(ctx.schedules.get(self.base_schedule)),
            Journey::Visiting { .. } => self.leaver = true,
            Journey::Settled => {}
        }
    }

    // ── Journey legs ──────────────────────────────────────────────────────

    /// Leave for `destination`: home and vehicle become the destination's.
    /// A remote destination makes the agent a leaver.
    pub fn depart(&mut self, destination: &TravelDestination, remote_travel: &ScheduleTemplate) {
        self.place_cache = self.places;
        self.set_place(PlaceSlot::Home, destination.lodging);
        self.set_place(PlaceSlot::Vehicle, destination.vehicle);
        self.switch_schedule(remote_travel);
        self.journey = Journey::Away { destination: destination.id };
        if destination.remote {
            self.leaver = true;
        }
    }

    /// Start the way back: home is restored, the destination's vehicle is
    /// kept for the ride.
    pub fn inward_travel(&mut self, return_trip: &ScheduleTemplate) {
        self.set_place(PlaceSlot::Home, self.place_cache[PlaceSlot::Home.index()]);
        self.switch_schedule(return_trip);
        self.journey = Journey::Returning;
    }

    fn arrive_home(&mut self, base: &ScheduleTemplate) {
        self.set_place(PlaceSlot::Vehicle, self.place_cache[PlaceSlot::Vehicle.index()]);
        self.place_cache = [PlaceId::INVALID; PlaceSlot::COUNT];
        self.switch_schedule(base);
        self.journey = Journey::Settled;
    }

    /// Turn this agent into a visitor at `destination` from domain `origin`.
    pub fn begin_visit(&mut self, origin: usize, destination: &TravelDestination, remote_travel: &ScheduleTemplate) {
        self.set_place(PlaceSlot::Home, destination.lodging);
        self.set_place(PlaceSlot::Vehicle, destination.vehicle);
        self.set_place(PlaceSlot::Work, PlaceId::INVALID);
        self.base_schedule = remote_travel.kind();
        self.switch_schedule(remote_travel);
        self.journey = Journey::Visiting { origin };
        self.trip = None;
        self.leaver = false;
        self.active = true;
    }
}
