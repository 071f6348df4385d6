//! The exchange record and its positional wire encoding.
//!
//! Each transmitted agent is a contiguous run of six numbers:
//!
//! | Offset | Field        | Encoding                                  |
//! |--------|--------------|-------------------------------------------|
//! | 0      | `travel_tag` | `0` outbound traveller, `2` returning     |
//! | 1      | `identity`   | agent id on its domain of origin          |
//! | 2      | `alive`      | `1` / `0`                                 |
//! | 3      | `diseased`   | `1` / `0`                                 |
//! | 4      | `immune`     | `1` / `0`                                 |
//! | 5      | `recovered`  | `1` / `0`                                 |
//!
//! Inside the crate records are handled by field name; only `encode` and
//! `decode` know the offsets.  Any change to the layout bumps
//! `SCHEMA_VERSION`, which is part of the channel tag, so mismatched peers
//! never read each other's batches.

use cg_core::AgentId;
use cg_disease::Health;

use crate::{ExchangeError, ExchangeResult};

pub const SCHEMA_VERSION: u32 = 1;

/// Field names in wire order.
pub const RECORD_FIELDS: [&str; 6] = ["travel_tag", "identity", "alive", "diseased", "immune", "recovered"];

/// Values per record.
pub const RECORD_LEN: usize = RECORD_FIELDS.len();

mod offset {
    pub const TRAVEL_TAG: usize = 0;
    pub const IDENTITY:   usize = 1;
    pub const ALIVE:      usize = 2;
    pub const DISEASED:   usize = 3;
    pub const IMMUNE:     usize = 4;
    pub const RECOVERED:  usize = 5;
}

/// Channel tag under which records addressed to `domain` travel.
pub fn record_tag(domain: &str) -> String {
    format!("agents.v{SCHEMA_VERSION}.{domain}")
}

// ── TravelTag ─────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TravelTag {
    /// Leaving its home domain for a visit.
    Outbound,
    /// Coming back to its home domain.
    Returning,
}

impl TravelTag {
    pub fn to_wire(self) -> f64 {
        match self {
            TravelTag::Outbound => 0.0,
            TravelTag::Returning => 2.0,
        }
    }

    /// `0` is outbound and anything `>= 2` is returning; values in between,
    /// negatives and non-finite values are faults.
    pub fn from_wire(v: f64) -> ExchangeResult<Self> {
        if v == 0.0 {
            Ok(TravelTag::Outbound)
        } else if v >= 2.0 && v.is_finite() {
            Ok(TravelTag::Returning)
        } else {
            Err(ExchangeError::Protocol(format!("invalid travel tag {v}")))
        }
    }
}

// ── ExchangeRecord ────────────────────────────────────────────────────────────

/// One agent crossing a domain boundary.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ExchangeRecord {
    pub travel_tag: TravelTag,
    pub identity:   AgentId,
    pub health:     Health,
}

impl ExchangeRecord {
    pub fn encode(&self) -> [f64; RECORD_LEN] {
        let mut out = [0.0; RECORD_LEN];
        out[offset::TRAVEL_TAG] = self.travel_tag.to_wire();
        out[offset::IDENTITY] = self.identity.0 as f64;
        out[offset::ALIVE] = flag(self.health.alive);
        out[offset::DISEASED] = flag(self.health.diseased);
        out[offset::IMMUNE] = flag(self.health.immune);
        out[offset::RECOVERED] = flag(self.health.recovered);
        out
    }

    /// Decode one record from exactly `RECORD_LEN` values.
    pub fn decode(values: &[f64]) -> ExchangeResult<Self> {
        if values.len() != RECORD_LEN {
            return Err(ExchangeError::Protocol(format!(
                "record has {} values, expected {RECORD_LEN}",
                values.len()
            )));
        }
        let raw_id = values[offset::IDENTITY];
        if !(raw_id >= 0.0 && raw_id < u32::MAX as f64 && raw_id.fract() == 0.0) {
            return Err(ExchangeError::Protocol(format!("invalid identity {raw_id}")));
        }
        let health = Health {
            alive:     values[offset::ALIVE] != 0.0,
            diseased:  values[offset::DISEASED] != 0.0,
            immune:    values[offset::IMMUNE] != 0.0,
            recovered: values[offset::RECOVERED] != 0.0,
        };
        if !health.is_consistent() {
            return Err(ExchangeError::Protocol(format!("agent {raw_id} carries inconsistent health {health:?}")));
        }
        Ok(ExchangeRecord {
            travel_tag: TravelTag::from_wire(values[offset::TRAVEL_TAG])?,
            identity:   AgentId(raw_id as u32),
            health,
        })
    }

    /// Decode a fetched `(label, value)` batch into `(origin rank, record)`
    /// pairs; the origin is the label of each record's first value.
    pub fn decode_batch(pairs: &[(f64, f64)]) -> ExchangeResult<Vec<(usize, ExchangeRecord)>> {
        if pairs.len() % RECORD_LEN != 0 {
            return Err(ExchangeError::Protocol(format!(
                "batch of {} values is not a whole number of {RECORD_LEN}-value records",
                pairs.len()
            )));
        }
        pairs
            .chunks_exact(RECORD_LEN)
            .map(|chunk| {
                let label = chunk[0].0;
                if !(label >= 0.0 && label.fract() == 0.0) {
                    return Err(ExchangeError::Protocol(format!("invalid sender label {label}")));
                }
                let values: Vec<f64> = chunk.iter().map(|&(_, v)| v).collect();
                Ok((label as usize, ExchangeRecord::decode(&values)?))
            })
            .collect()
    }
}

#[inline]
fn flag(b: bool) -> f64 {
    if b { 1.0 } else { 0.0 }
}
