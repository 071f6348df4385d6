//! The per-step exchange protocol.

use cg_agent::{Agent, AgentStore, Journey};
use cg_core::{AgentId, ScheduleKind};
use cg_place::DestinationRegistry;
use cg_schedule::ScheduleLibrary;
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::{Channel, ExchangeError, ExchangeRecord, ExchangeResult, TravelTag, record_tag};

/// What one exchange moved.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ExchangeReport {
    /// Local agents sent off on a visit.
    pub departed:     usize,
    /// Visitors sent back to their home domain.
    pub sent_home:    usize,
    /// Visitors received.
    pub arrived:      usize,
    /// Local agents received back.
    pub returned:     usize,
    /// Size of the placeholder pool after the exchange.
    pub placeholders: usize,
}

/// One domain's side of the exchange, bound to its channel endpoint.
pub struct Exchange<C: Channel> {
    channel: C,
    rank:    usize,
    /// Domain names in rank order.
    domains: Vec<String>,
    /// Channel tag per domain, in rank order.
    tags:    Vec<String>,
}

impl<C: Channel> Exchange<C> {
    /// `domains` lists every participant in rank order; this domain is
    /// `domains[rank]`.
    pub fn new(channel: C, rank: usize, domains: Vec<String>) -> ExchangeResult<Self> {
        if rank >= domains.len() {
            return Err(ExchangeError::Protocol(format!(
                "rank {rank} out of range for {} domains",
                domains.len()
            )));
        }
        let tags = domains.iter().map(|d| record_tag(d)).collect();
        Ok(Exchange { channel, rank, domains, tags })
    }

    pub fn rank(&self) -> usize {
        self.rank
    }

    pub fn domain(&self) -> &str {
        &self.domains[self.rank]
    }

    pub fn channel(&self) -> &C {
        &self.channel
    }

    pub fn channel_mut(&mut self) -> &mut C {
        &mut self.channel
    }

    fn rank_of(&self, domain: &str) -> ExchangeResult<usize> {
        self.domains
            .iter()
            .position(|d| d == domain)
            .ok_or_else(|| ExchangeError::UnknownDomain(domain.to_string()))
    }

    fn send(&mut self, to: usize, record: &ExchangeRecord) {
        let label = self.rank as f64;
        for value in record.encode() {
            self.channel.push(&self.tags[to], label, value);
        }
    }

    /// Run the exchange for `step`.  Must be called by every domain for every
    /// step, after the domain's agents have been updated.
    pub fn run(
        &mut self,
        step:         u64,
        agents:       &mut AgentStore,
        destinations: &DestinationRegistry,
        schedules:    &ScheduleLibrary,
    ) -> ExchangeResult<ExchangeReport> {
        let mut report = ExchangeReport::default();

        // Dormant locals are indexed before this step's leavers go dormant.
        let mut dormant: FxHashMap<AgentId, usize> = FxHashMap::default();
        for i in 0..agents.locals.len() {
            let agent = &mut agents.locals[i];
            if !agent.active {
                dormant.insert(agent.id, i);
            }
            if !agent.leaver {
                continue;
            }
            let Journey::Away { destination } = agent.journey else {
                return Err(ExchangeError::Unroutable(agent.id));
            };
            agent.active = false;
            agent.leaver = false;
            let record = ExchangeRecord { travel_tag: TravelTag::Outbound, identity: agent.id, health: agent.health };
            let host = destinations.try_get(destination)?.domain.as_str();
            let to = self.rank_of(host)?;
            self.send(to, &record);
            report.departed += 1;
        }

        for i in 0..agents.travellers.len() {
            let visitor = &mut agents.travellers[i];
            if !visitor.leaver {
                continue;
            }
            let Journey::Visiting { origin } = visitor.journey else {
                return Err(ExchangeError::Unroutable(visitor.id));
            };
            visitor.active = false;
            visitor.leaver = false;
            let record = ExchangeRecord { travel_tag: TravelTag::Returning, identity: visitor.id, health: visitor.health };
            if origin >= self.domains.len() {
                return Err(ExchangeError::Protocol(format!("visitor {} has unknown origin rank {origin}", record.identity)));
            }
            self.send(origin, &record);
            report.sent_home += 1;
        }

        self.channel.commit(step)?;
        let incoming = self.channel.fetch(&self.tags[self.rank], step)?;
        let records = ExchangeRecord::decode_batch(&incoming)?;

        let mut idle = agents.idle_travellers().into_iter();
        for (origin, record) in records {
            match record.travel_tag {
                TravelTag::Outbound => {
                    let host = destinations
                        .hosted()
                        .ok_or_else(|| ExchangeError::NoHostedDestination(self.domain().to_string()))?;
                    let visitor = Agent::visitor(
                        record.identity,
                        origin,
                        host,
                        schedules.get(ScheduleKind::RemoteTravel),
                        record.health,
                    );
                    match idle.next() {
                        Some(i) => agents.travellers[i] = visitor,
                        None => agents.travellers.push(visitor),
                    }
                    report.arrived += 1;
                }
                TravelTag::Returning => {
                    let identity = record.identity;
                    // Each dormant local can come back at most once per batch.
                    let agent = dormant
                        .remove(&identity)
                        .and_then(|i| agents.locals.get_mut(i))
                        .filter(|a| a.id == identity && !a.active)
                        .ok_or(ExchangeError::Desync { identity })?;
                    agent.active = true;
                    agent.health = record.health;
                    agent.inward_travel(schedules.get(ScheduleKind::ReturnTrip));
                    report.returned += 1;
                }
            }
        }

        report.placeholders = agents.travellers.len();
        debug!(
            domain    = %self.domain(),
            step,
            departed  = report.departed,
            sent_home = report.sent_home,
            arrived   = report.arrived,
            returned  = report.returned,
            "exchange"
        );
        Ok(report)
    }
}
