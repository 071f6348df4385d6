//! `AgentStore`: a domain's agents, split into locals and travellers.
//!
//! `locals` are the agents whose home is this domain; their index is their
//! identity and never changes.  `travellers` is a growable pool of
//! placeholders for visiting agents from other domains.  An inactive
//! placeholder is free for reuse by the next arrival.

use cg_core::AgentId;
use cg_disease::Health;

use crate::{Agent, PopulationError, PopulationResult};

// ── Census ────────────────────────────────────────────────────────────────────

/// Per-step disease counts over active agents.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Census {
    pub susceptible: u64,
    pub infected:    u64,
    pub recovered:   u64,
    pub dead:        u64,
}

impl Census {
    /// Count one agent.  Dead agents count only as dead; living agents are
    /// infected, recovered, or otherwise susceptible.
    #[inline]
    pub fn record(mut self, health: &Health) -> Self {
        if health.is_dead() {
            self.dead += 1;
        } else if health.is_infected() {
            self.infected += 1;
        } else if health.is_recovered() {
            self.recovered += 1;
        } else {
            self.susceptible += 1;
        }
        self
    }

    /// Combine two partial counts (associative, for parallel reduction).
    #[inline]
    pub fn merge(self, other: Census) -> Census {
        Census {
            susceptible: self.susceptible + other.susceptible,
            infected:    self.infected + other.infected,
            recovered:   self.recovered + other.recovered,
            dead:        self.dead + other.dead,
        }
    }

    pub fn total(&self) -> u64 {
        self.susceptible + self.infected + self.recovered + self.dead
    }
}

// ── AgentStore ────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default)]
pub struct AgentStore {
    pub locals:     Vec<Agent>,
    pub travellers: Vec<Agent>,
}

impl AgentStore {
    pub fn new(locals: Vec<Agent>) -> Self {
        AgentStore { locals, travellers: Vec::new() }
    }

    /// Append a local agent whose identity is its index.
    pub fn push_local(&mut self, build: impl FnOnce(AgentId) -> Agent) -> PopulationResult<AgentId> {
        let n = self.locals.len();
        let id = AgentId::try_from(n).map_err(|_| PopulationError::Capacity(n))?;
        if !id.is_valid() {
            return Err(PopulationError::Capacity(n));
        }
        self.locals.push(build(id));
        Ok(id)
    }

    #[inline]
    pub fn local(&self, id: AgentId) -> Option<&Agent> {
        self.locals.get(id.index())
    }

    #[inline]
    pub fn local_mut(&mut self, id: AgentId) -> Option<&mut Agent> {
        self.locals.get_mut(id.index())
    }

    /// All agents, locals first.
    pub fn iter(&self) -> impl Iterator<Item = &Agent> {
        self.locals.iter().chain(self.travellers.iter())
    }

    pub fn active(&self) -> impl Iterator<Item = &Agent> {
        self.iter().filter(|a| a.active)
    }

    pub fn active_count(&self) -> usize {
        self.active().count()
    }

    /// Sequential census over active agents.
    pub fn census(&self) -> Census {
        self.active().fold(Census::default(), |c, a| c.record(&a.health))
    }

    /// Indices of placeholders that are free for reuse.
    pub fn idle_travellers(&self) -> Vec<usize> {
        self.travellers
            .iter()
            .enumerate()
            .filter(|(_, a)| !a.active)
            .map(|(i, _)| i)
            .collect()
    }
}
