//! Unit tests for cg-agent.

use cg_core::{
    AgentId, DestinationConfig, PlaceId, PlaceSlot, PopulationKind, ScheduleKind, SimConfig, WorkerRng,
};
use cg_disease::{DiseaseModel, Health, Transition};
use cg_place::{DestinationRegistry, PlaceCategory, PlaceSettings, PlaceStore};
use cg_schedule::ScheduleLibrary;

use crate::{Agent, AgentStore, Census, Journey, PopulationError, StepContext, TripPlan, build_population};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn config(n: usize, kind: PopulationKind) -> SimConfig {
    let mut cfg = SimConfig::default();
    cfg.run.n_agents = n;
    cfg.model.kind = kind;
    cfg
}

/// A mobile agent living in a three-place world plus two destinations:
/// `near` hosted here ("west") and `far` hosted on "east".
struct World {
    lib:          ScheduleLibrary,
    places:       PlaceStore,
    destinations: DestinationRegistry,
}

impl World {
    fn new() -> Self {
        let mut places = PlaceStore::new();
        places.add_many(3, PlaceCategory::Unspecified, PlaceSettings::default()).unwrap();
        let configs = vec![
            DestinationConfig { name: "near".into(), domain: "west".into() },
            DestinationConfig { name: "far".into(), domain: "east".into() },
        ];
        let destinations = DestinationRegistry::build(&configs, "west", &mut places, PlaceSettings::default()).unwrap();
        World { lib: ScheduleLibrary::builtin(), places, destinations }
    }

    fn agent(&self) -> Agent {
        let mut a = Agent::new(AgentId(0), self.lib.get(ScheduleKind::Mobile));
        a.set_place(PlaceSlot::Home, PlaceId(0));
        a.set_place(PlaceSlot::Work, PlaceId(1));
        a.set_place(PlaceSlot::Vehicle, PlaceId(2));
        a
    }

    fn ctx(&self, step: u64) -> StepContext<'_> {
        StepContext::new(step, 1.0, &self.lib, &self.destinations)
    }

    /// Run hourly updates from `start`, returning the step after the last.
    fn run(&self, agent: &mut Agent, start: u64, steps: u64) -> u64 {
        for step in start..start + steps {
            agent.update(&self.ctx(step)).unwrap();
        }
        start + steps
    }
}

// ── Population ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod population {
    use super::*;

    #[test]
    fn six_hundred_agents_make_280_places() {
        let cfg = config(600, PopulationKind::SimpleMobile);
        let pop = build_population(&cfg, &ScheduleLibrary::builtin()).unwrap();
        assert_eq!(pop.agents.locals.len(), 600);
        assert_eq!(pop.places.len(), 280);
        assert_eq!(pop.places.count_category(PlaceCategory::Home), 200);
        assert_eq!(pop.places.count_category(PlaceCategory::Work), 60);
        assert_eq!(pop.places.count_category(PlaceCategory::Vehicle), 20);
    }

    #[test]
    fn group_sizes_respected() {
        let cfg = config(95, PopulationKind::SimpleMobile);
        let pop = build_population(&cfg, &ScheduleLibrary::builtin()).unwrap();
        let mut occupancy = vec![[0usize; PlaceSlot::COUNT]; pop.places.len()];
        for a in &pop.agents.locals {
            for slot in PlaceSlot::ALL {
                occupancy[a.place(slot).index()][slot.index()] += 1;
            }
        }
        assert!(occupancy.iter().all(|o| o[PlaceSlot::Home.index()] <= 3));
        assert!(occupancy.iter().all(|o| o[PlaceSlot::Work.index()] <= 10));
        assert!(occupancy.iter().all(|o| o[PlaceSlot::Vehicle.index()] <= 30));
        assert_eq!(pop.agents.locals[7].place(PlaceSlot::Home), PlaceId(2));
    }

    #[test]
    fn identity_is_arena_index() {
        let pop = build_population(&config(40, PopulationKind::SimpleMobile), &ScheduleLibrary::builtin()).unwrap();
        for (i, a) in pop.agents.locals.iter().enumerate() {
            assert_eq!(a.id.index(), i);
            assert!(a.active && !a.leaver);
            assert_eq!(a.slot, PlaceSlot::Home);
        }
    }

    #[test]
    fn construction_is_seeded() {
        let lib = ScheduleLibrary::builtin();
        let mut cfg = config(120, PopulationKind::SimpleMobile);
        cfg.disease.initial_infected = 5;
        let a = build_population(&cfg, &lib).unwrap();
        let b = build_population(&cfg, &lib).unwrap();
        for (x, y) in a.agents.locals.iter().zip(&b.agents.locals) {
            assert_eq!(x.places, y.places);
            assert_eq!(x.health, y.health);
        }
        assert_eq!(a.agents.census().infected, 5);
    }

    #[test]
    fn initial_infection_capped_at_population() {
        let mut cfg = config(4, PopulationKind::SimpleOnePlace);
        cfg.disease.initial_infected = 10;
        let pop = build_population(&cfg, &ScheduleLibrary::builtin()).unwrap();
        assert_eq!(pop.agents.census().infected, 4);
    }

    #[test]
    fn one_place_shares_every_slot() {
        let pop = build_population(&config(12, PopulationKind::SimpleOnePlace), &ScheduleLibrary::builtin()).unwrap();
        assert_eq!(pop.places.len(), 1);
        for a in &pop.agents.locals {
            assert_eq!(a.places, [PlaceId(0); PlaceSlot::COUNT]);
        }
    }

    #[test]
    fn destinations_appended_and_trips_assigned() {
        let mut cfg = config(30, PopulationKind::SimpleMobile);
        cfg.travel.destinations = vec![DestinationConfig { name: "harbour".into(), domain: "main".into() }];
        cfg.travel.travellers = 4;
        cfg.travel.destination = Some("harbour".into());
        cfg.travel.departure_step = 6;
        let pop = build_population(&cfg, &ScheduleLibrary::builtin()).unwrap();

        // 10 homes + 3 workplaces + 1 vehicle, then the destination pair.
        assert_eq!(pop.places.len(), 16);
        let harbour = pop.destinations.find("harbour").unwrap();
        assert_eq!(harbour.vehicle, PlaceId(14));
        assert_eq!(harbour.lodging, PlaceId(15));
        assert!(!harbour.remote);

        let trips: Vec<TripPlan> = pop.agents.locals.iter().filter_map(|a| a.trip).collect();
        assert_eq!(trips.len(), 4);
        assert!(trips.iter().all(|t| t.depart_step == 6 && t.destination == harbour.id));
    }
}

// ── Agent ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod agent {
    use super::*;

    #[test]
    fn unset_place_is_reported() {
        let lib = ScheduleLibrary::builtin();
        let a = Agent::new(AgentId(3), lib.get(ScheduleKind::Mobile));
        match a.current_place() {
            Err(PopulationError::UnsetPlace { agent, slot }) => {
                assert_eq!(agent, AgentId(3));
                assert_eq!(slot, PlaceSlot::Home);
            }
            other => panic!("expected UnsetPlace, got {other:?}"),
        }
    }

    #[test]
    fn daily_commute_visits_each_slot() {
        let w = World::new();
        let mut a = w.agent();
        let mut visited = Vec::new();
        for step in 0..24 {
            a.update(&w.ctx(step)).unwrap();
            if visited.last() != Some(&a.slot) {
                visited.push(a.slot);
            }
        }
        assert_eq!(
            visited,
            vec![PlaceSlot::Home, PlaceSlot::Vehicle, PlaceSlot::Work, PlaceSlot::Vehicle, PlaceSlot::Home]
        );
    }

    #[test]
    fn diseased_agent_sheds_into_current_place() {
        let w = World::new();
        let mut a = w.agent();
        a.health.infect();
        let model = DiseaseModel { shed_load: 0.25, ..DiseaseModel::default() };
        a.shed(&model, 2.0, &w.places).unwrap();
        assert_eq!(w.places.get(PlaceId(0)).unwrap().contamination(), 0.5);
        assert_eq!(w.places.get(PlaceId(1)).unwrap().contamination(), 0.0);
    }

    #[test]
    fn infection_uses_current_place() {
        let w = World::new();
        let mut a = w.agent();
        w.places.get(PlaceId(0)).unwrap().add_contamination(1.0);
        let model = DiseaseModel { recovery_rate: 0.0, death_rate: 0.0, shed_load: 0.0 };
        let mut rng = WorkerRng::stream(0, 0);
        assert_eq!(a.process_disease(&model, 1.0, &w.places, &mut rng).unwrap(), Transition::Infected);
    }

    #[test]
    fn local_trip_round_trip() {
        let w = World::new();
        let near = w.destinations.find("near").unwrap().clone();
        let mut a = w.agent();
        a.trip = Some(TripPlan { destination: near.id, depart_step: 0 });

        let step = w.run(&mut a, 0, 1);
        assert_eq!(a.journey, Journey::Away { destination: near.id });
        assert_eq!(a.slot, PlaceSlot::Vehicle);
        assert_eq!(a.current_place().unwrap(), near.vehicle);
        assert!(!a.leaver);
        assert!(a.trip.is_none());

        let step = w.run(&mut a, step, 8);
        assert_eq!(a.current_place().unwrap(), near.lodging);

        let step = w.run(&mut a, step, 136);
        assert_eq!(a.journey, Journey::Returning);
        assert_eq!(a.cursor.kind, ScheduleKind::ReturnTrip);
        assert_eq!(a.current_place().unwrap(), near.vehicle);

        let step = w.run(&mut a, step, 8);
        assert_eq!(a.current_place().unwrap(), PlaceId(0));

        w.run(&mut a, step, 2);
        assert_eq!(a.journey, Journey::Settled);
        assert_eq!(a.cursor.kind, ScheduleKind::Mobile);
        assert_eq!(a.place(PlaceSlot::Vehicle), PlaceId(2));
        assert_eq!(a.slot, PlaceSlot::Home);
    }

    #[test]
    fn trip_waits_for_departure_step() {
        let w = World::new();
        let near = w.destinations.find("near").unwrap().id;
        let mut a = w.agent();
        a.trip = Some(TripPlan { destination: near, depart_step: 5 });
        w.run(&mut a, 0, 5);
        assert_eq!(a.journey, Journey::Settled);
        w.run(&mut a, 5, 1);
        assert_eq!(a.journey, Journey::Away { destination: near });
    }

    #[test]
    fn remote_trip_raises_leaver() {
        let w = World::new();
        let far = w.destinations.find("far").unwrap().id;
        let mut a = w.agent();
        a.trip = Some(TripPlan { destination: far, depart_step: 0 });
        w.run(&mut a, 0, 1);
        assert!(a.leaver);
        assert_eq!(a.place_cache[PlaceSlot::Home.index()], PlaceId(0));
    }

    #[test]
    fn visitor_leaves_after_one_visit() {
        let w = World::new();
        let near = w.destinations.find("near").unwrap();
        let health = Health { diseased: true, ..Health::SUSCEPTIBLE };
        let mut v = Agent::visitor(AgentId(42), 1, near, w.lib.get(ScheduleKind::RemoteTravel), health);
        assert_eq!(v.journey, Journey::Visiting { origin: 1 });
        assert_eq!(v.current_place().unwrap(), near.vehicle);
        assert!(v.health.diseased);

        let step = w.run(&mut v, 0, 143);
        assert!(!v.leaver);
        w.run(&mut v, step, 1);
        assert!(v.leaver);
    }

    #[test]
    fn inward_travel_restores_home_and_keeps_vehicle() {
        let w = World::new();
        let far = w.destinations.find("far").unwrap().clone();
        let mut a = w.agent();
        a.depart(&far, w.lib.get(ScheduleKind::RemoteTravel));
        a.inward_travel(w.lib.get(ScheduleKind::ReturnTrip));
        assert_eq!(a.place(PlaceSlot::Home), PlaceId(0));
        assert_eq!(a.place(PlaceSlot::Vehicle), far.vehicle);
        assert_eq!(a.slot, PlaceSlot::Vehicle);
        assert_eq!(a.journey, Journey::Returning);
    }
}

// ── AgentStore ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod store {
    use super::*;

    #[test]
    fn census_counts_active_only() {
        let lib = ScheduleLibrary::builtin();
        let mut store = AgentStore::default();
        for _ in 0..4 {
            store.push_local(|id| Agent::new(id, lib.get(ScheduleKind::Stationary))).unwrap();
        }
        store.locals[0].health.infect();
        store.locals[1].health.recover();
        store.locals[2].health.die();
        store.locals[3].active = false;

        let c = store.census();
        assert_eq!(c, Census { susceptible: 0, infected: 1, recovered: 1, dead: 1 });
        assert_eq!(store.active_count(), 3);
    }

    #[test]
    fn census_merge_is_additive() {
        let a = Census { susceptible: 1, infected: 2, recovered: 3, dead: 4 };
        let b = Census { susceptible: 10, infected: 0, recovered: 1, dead: 0 };
        assert_eq!(a.merge(b).total(), 21);
    }

    #[test]
    fn idle_travellers_are_inactive_placeholders() {
        let lib = ScheduleLibrary::builtin();
        let mut store = AgentStore::default();
        for i in 0..3 {
            let mut a = Agent::new(AgentId(i), lib.get(ScheduleKind::RemoteTravel));
            a.active = i != 1;
            store.travellers.push(a);
        }
        assert_eq!(store.idle_travellers(), vec![1]);
    }
}
