//! Integration tests for cg-sim.

use cg_agent::Journey;
use cg_core::{PlaceId, PopulationKind, SimConfig};
use cg_exchange::ChannelMesh;

use crate::{NoopObserver, Sim, SimBuilder, SimError, SimObserver, StepSummary};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn config(n_agents: usize, n_threads: usize, n_steps: u64) -> SimConfig {
    let mut cfg = SimConfig::default();
    cfg.run.n_agents = n_agents;
    cfg.run.n_threads = n_threads;
    cfg.run.n_steps = n_steps;
    cfg.run.random_seed = 7;
    cfg
}

/// Everyone in a single shared place.
fn one_place(n_agents: usize) -> SimConfig {
    let mut cfg = config(n_agents, 2, 20);
    cfg.model.kind = PopulationKind::SimpleOnePlace;
    cfg.disease.recovery_rate = 0.0;
    cfg.disease.death_rate = 0.0;
    cfg
}

#[derive(Default)]
struct Recorder {
    summaries: Vec<StepSummary>,
    ended_at:  Option<u64>,
}

impl SimObserver for Recorder {
    fn on_step_end(&mut self, summary: &StepSummary) {
        self.summaries.push(*summary);
    }

    fn on_sim_end(&mut self, final_step: u64) {
        self.ended_at = Some(final_step);
    }
}

fn run(cfg: SimConfig) -> (Sim, Recorder) {
    let mut sim = Sim::from_config(cfg).unwrap();
    let mut rec = Recorder::default();
    sim.run(&mut rec).unwrap();
    (sim, rec)
}

fn two_domain_config(name: &str) -> SimConfig {
    let text = format!(
        r#"
        [run]
        n_agents = 60
        n_threads = 2
        n_steps = 240
        random_seed = 3

        [disease]
        initial_infected = 5

        [domain]
        name = "{name}"
        members = ["west", "east"]

        [travel]
        travellers = 6
        destination = "harbour"

        [[travel.destinations]]
        name = "harbour"
        domain = "east"
        "#
    );
    SimConfig::from_toml_str(&text).unwrap()
}

// ── SimBuilder ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn builds_default_population() {
        let sim = SimBuilder::new(config(600, 2, 1)).build().unwrap();
        assert_eq!(sim.agents.locals.len(), 600);
        assert_eq!(sim.places.len(), 280);
        assert_eq!(sim.n_threads(), 2);
        assert!(!sim.is_distributed());
    }

    #[test]
    fn rejects_invalid_config() {
        let mut cfg = config(10, 1, 1);
        cfg.run.n_threads = 0;
        assert!(matches!(SimBuilder::new(cfg).build(), Err(SimError::Core(_))));
    }

    #[test]
    fn distributed_run_needs_a_channel() {
        let result = SimBuilder::new(two_domain_config("west")).build();
        assert!(matches!(result, Err(SimError::Config(_))));
    }

    #[test]
    fn single_domain_reports_no_exchange() {
        let (_, rec) = run(config(30, 1, 3));
        assert_eq!(rec.summaries.len(), 3);
        assert!(rec.summaries.iter().all(|s| s.exchange.is_none()));
        assert_eq!(rec.ended_at, Some(3));
    }
}

// ── Step pipeline ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod pipeline {
    use super::*;

    #[test]
    fn same_seed_and_threads_reproduce() {
        let mut cfg = config(601, 4, 72);
        cfg.disease.initial_infected = 20;
        cfg.disease.death_rate = 0.01;
        cfg.disease.recovery_rate = 0.02;
        cfg.disease.shed_load = 0.05;

        let (a, rec_a) = run(cfg.clone());
        let (b, rec_b) = run(cfg);
        assert_eq!(rec_a.summaries, rec_b.summaries);
        let health_a: Vec<_> = a.agents.iter().map(|x| x.health).collect();
        let health_b: Vec<_> = b.agents.iter().map(|x| x.health).collect();
        assert_eq!(health_a, health_b);
    }

    #[test]
    fn summaries_carry_step_and_time() {
        let mut cfg = config(30, 1, 4);
        cfg.time_step.dt = 2.0;
        let (_, rec) = run(cfg);
        let times: Vec<_> = rec.summaries.iter().map(|s| (s.step, s.time_hours)).collect();
        assert_eq!(times, vec![(0, 0.0), (1, 2.0), (2, 4.0), (3, 6.0)]);
    }

    #[test]
    fn census_covers_every_agent_each_step() {
        let mut cfg = config(120, 3, 48);
        cfg.disease.initial_infected = 10;
        cfg.disease.death_rate = 0.01;
        let (_, rec) = run(cfg);
        assert!(rec.summaries.iter().all(|s| s.census.total() == 120));
    }

    #[test]
    fn certain_death_kills_everyone_in_one_step() {
        let mut cfg = config(50, 2, 1);
        cfg.disease.initial_infected = 50;
        cfg.disease.death_rate = 1.0;
        let (sim, rec) = run(cfg);
        assert_eq!(rec.summaries[0].census.dead, 50);
        assert!(sim.agents.iter().all(|a| a.health.is_dead()));
    }

    #[test]
    fn shared_place_without_decay_only_accumulates() {
        let mut cfg = one_place(20);
        cfg.places.fractional_decrement = 0.0;
        let mut sim = Sim::from_config(cfg).unwrap();

        let mut last = 0.0;
        for _ in 0..20 {
            sim.step().unwrap();
            let level = sim.places.get(PlaceId(0)).unwrap().contamination();
            assert!(level >= last);
            last = level;
        }
        assert!(last > 0.0);
    }

    #[test]
    fn cleaned_place_holds_only_this_steps_shedding() {
        let mut cfg = one_place(10);
        cfg.disease.initial_infected = 3;
        cfg.places.clean_every_step = true;
        let shed = cfg.disease.shed_load;
        let mut sim = Sim::from_config(cfg).unwrap();

        for _ in 0..10 {
            let shedders = sim.census().infected as f64;
            sim.step().unwrap();
            let level = sim.places.get(PlaceId(0)).unwrap().contamination();
            assert!((level - shedders * shed).abs() < 1e-12);
        }
    }

    #[test]
    fn health_invariants_hold_throughout() {
        let mut cfg = config(300, 3, 1);
        cfg.disease.initial_infected = 30;
        cfg.disease.death_rate = 0.005;
        cfg.disease.recovery_rate = 0.02;
        cfg.disease.shed_load = 0.2;
        let mut sim = Sim::from_config(cfg).unwrap();

        for _ in 0..96 {
            sim.step().unwrap();
            assert!(sim.agents.iter().all(|a| a.health.is_consistent()));
            assert!(sim.places.iter().all(|p| p.contamination() >= 0.0));
        }
    }

    #[test]
    fn local_trips_come_home() {
        let mut cfg = config(60, 2, 240);
        cfg.travel.destinations = vec![cg_core::DestinationConfig { name: "lake".into(), domain: "main".into() }];
        cfg.travel.destination = Some("lake".into());
        cfg.travel.travellers = 6;
        let mut sim = Sim::from_config(cfg).unwrap();
        let before: Vec<_> = sim.agents.locals.iter().map(|a| a.places).collect();
        assert_eq!(sim.agents.locals.iter().filter(|a| a.trip.is_some()).count(), 6);

        sim.run(&mut NoopObserver).unwrap();
        assert!(sim.agents.locals.iter().all(|a| a.trip.is_none() && a.journey == Journey::Settled && a.active));
        let after: Vec<_> = sim.agents.locals.iter().map(|a| a.places).collect();
        assert_eq!(before, after);
        assert!(sim.agents.travellers.is_empty());
    }
}

// ── Two domains ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod distributed {
    use super::*;

    #[test]
    fn population_is_conserved_across_domains() {
        let mut ends = ChannelMesh::new(2);
        let east_end = ends.pop().unwrap();
        let west_end = ends.pop().unwrap();

        let (west, east) = std::thread::scope(|s| {
            let west = s.spawn(|| {
                let mut sim = SimBuilder::new(two_domain_config("west")).channel(west_end).build().unwrap();
                let mut rec = Recorder::default();
                sim.run(&mut rec).unwrap();
                (sim, rec)
            });
            let east = s.spawn(|| {
                let mut sim = SimBuilder::new(two_domain_config("east")).channel(east_end).build().unwrap();
                let mut rec = Recorder::default();
                sim.run(&mut rec).unwrap();
                (sim, rec)
            });
            (west.join().unwrap(), east.join().unwrap())
        });
        let (west_sim, west_rec) = west;
        let (east_sim, east_rec) = east;

        for (w, e) in west_rec.summaries.iter().zip(&east_rec.summaries) {
            assert_eq!(w.census.total() + e.census.total(), 120);
        }

        let total = |rec: &Recorder, f: fn(&cg_exchange::ExchangeReport) -> usize| {
            rec.summaries.iter().filter_map(|s| s.exchange.as_ref()).map(f).sum::<usize>()
        };
        assert_eq!(total(&west_rec, |r| r.departed), 6);
        assert_eq!(total(&east_rec, |r| r.arrived), 6);
        assert_eq!(total(&east_rec, |r| r.sent_home), 6);
        assert_eq!(total(&west_rec, |r| r.returned), 6);

        assert!(west_sim.agents.locals.iter().all(|a| a.active && a.journey == Journey::Settled));
        assert!(east_sim.agents.travellers.iter().all(|a| !a.active));
    }
}
