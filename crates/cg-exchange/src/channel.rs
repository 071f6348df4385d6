//! The transport primitive and an in-process implementation.
//!
//! `Channel` is the only thing the protocol needs from a transport: tagged
//! `(label, value)` pushes, a per-step commit, and a fetch that blocks until
//! every participant has committed that exact step.
//!
//! `ChannelMesh` connects *n* endpoints living in one process (one per
//! domain thread) over `std::sync::mpsc`.  Each commit broadcasts the
//! endpoint's batch to every endpoint, itself included.  Batches that arrive
//! early for a later step are buffered until that step is fetched.

use std::collections::BTreeMap;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::time::Duration;

use crate::{ExchangeError, ExchangeResult};

/// Point-to-point transport used by the exchange protocol.
pub trait Channel: Send {
    /// Queue one value under `tag` for the next commit.
    fn push(&mut self, tag: &str, label: f64, value: f64);

    /// Flush everything queued since the last commit as step `step`.
    fn commit(&mut self, step: u64) -> ExchangeResult<()>;

    /// Block until every participant has committed `step`, then return all
    /// values pushed under `tag` for it, ordered by sender then push order.
    fn fetch(&mut self, tag: &str, step: u64) -> ExchangeResult<Vec<(f64, f64)>>;
}

impl<C: Channel + ?Sized> Channel for Box<C> {
    fn push(&mut self, tag: &str, label: f64, value: f64) {
        (**self).push(tag, label, value)
    }

    fn commit(&mut self, step: u64) -> ExchangeResult<()> {
        (**self).commit(step)
    }

    fn fetch(&mut self, tag: &str, step: u64) -> ExchangeResult<Vec<(f64, f64)>> {
        (**self).fetch(tag, step)
    }
}

// ── ChannelMesh ───────────────────────────────────────────────────────────────

struct Batch {
    from:   usize,
    step:   u64,
    values: Vec<(String, f64, f64)>,
}

/// Factory for a fully connected set of in-process endpoints.
pub struct ChannelMesh;

impl ChannelMesh {
    /// `n` connected endpoints; endpoint `i` is rank `i`.
    pub fn new(n: usize) -> Vec<MeshEndpoint> {
        Self::build(n, None)
    }

    /// Like [`ChannelMesh::new`], but a fetch gives up after `timeout`.
    pub fn with_timeout(n: usize, timeout: Duration) -> Vec<MeshEndpoint> {
        Self::build(n, Some(timeout))
    }

    fn build(n: usize, timeout: Option<Duration>) -> Vec<MeshEndpoint> {
        let (senders, receivers): (Vec<Sender<Batch>>, Vec<Receiver<Batch>>) = (0..n).map(|_| mpsc::channel()).unzip();
        receivers
            .into_iter()
            .enumerate()
            .map(|(rank, inbox)| MeshEndpoint {
                rank,
                peers: senders.clone(),
                inbox,
                outgoing: Vec::new(),
                received: BTreeMap::new(),
                timeout,
            })
            .collect()
    }
}

// ── MeshEndpoint ──────────────────────────────────────────────────────────────

/// One domain's end of a `ChannelMesh`.
pub struct MeshEndpoint {
    rank:     usize,
    peers:    Vec<Sender<Batch>>,
    inbox:    Receiver<Batch>,
    outgoing: Vec<(String, f64, f64)>,
    /// Step → batch from each sender rank.
    received: BTreeMap<u64, BTreeMap<usize, Vec<(String, f64, f64)>>>,
    timeout:  Option<Duration>,
}

impl MeshEndpoint {
    pub fn rank(&self) -> usize {
        self.rank
    }

    pub fn participants(&self) -> usize {
        self.peers.len()
    }

    fn complete(&self, step: u64) -> bool {
        self.received.get(&step).is_some_and(|b| b.len() == self.peers.len())
    }

    fn receive(&mut self, step: u64) -> ExchangeResult<()> {
        let batch = match self.timeout {
            None => self.inbox.recv().map_err(|_| ExchangeError::Disconnected(step))?,
            Some(t) => self.inbox.recv_timeout(t).map_err(|e| match e {
                RecvTimeoutError::Timeout => ExchangeError::Timeout(step),
                RecvTimeoutError::Disconnected => ExchangeError::Disconnected(step),
            })?,
        };
        let slot = self.received.entry(batch.step).or_default();
        if slot.insert(batch.from, batch.values).is_some() {
            return Err(ExchangeError::Protocol(format!(
                "rank {} committed step {} twice",
                batch.from, batch.step
            )));
        }
        Ok(())
    }
}

impl Channel for MeshEndpoint {
    fn push(&mut self, tag: &str, label: f64, value: f64) {
        self.outgoing.push((tag.to_string(), label, value));
    }

    fn commit(&mut self, step: u64) -> ExchangeResult<()> {
        let values = std::mem::take(&mut self.outgoing);
        for peer in &self.peers {
            peer.send(Batch { from: self.rank, step, values: values.clone() })
                .map_err(|_| ExchangeError::Disconnected(step))?;
        }
        // Steps before this one can no longer be fetched.
        self.received = self.received.split_off(&step);
        Ok(())
    }

    fn fetch(&mut self, tag: &str, step: u64) -> ExchangeResult<Vec<(f64, f64)>> {
        while !self.complete(step) {
            self.receive(step)?;
        }
        let batches = self.received.get(&step).map(|b| b.values()).into_iter().flatten();
        Ok(batches
            .flat_map(|values| values.iter())
            .filter(|(t, _, _)| t == tag)
            .map(|&(_, label, value)| (label, value))
            .collect())
    }
}
