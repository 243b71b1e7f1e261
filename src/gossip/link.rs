use std::collections::HashMap;

use rand::Rng;

use crate::error::Error;
use crate::gilbert_elliott::{self, Chain, Model};
use crate::graph::NodeId;

/// Decides whether a message put on a link reaches the other end.
pub trait LinkModel {
    fn delivers(&mut self, from: NodeId, to: NodeId) -> bool;
}

/// Every message arrives.
#[derive(Clone, Copy, Debug, Default)]
pub struct Reliable;

impl LinkModel for Reliable {
    fn delivers(&mut self, _from: NodeId, _to: NodeId) -> bool {
        true
    }
}

/// Each message is dropped independently with probability `drop_rate`.
#[derive(Debug)]
pub struct Lossy<R> {
    drop_rate: f64,
    rng: R,
}

impl<R: Rng> Lossy<R> {
    pub fn new(drop_rate: f64, rng: R) -> Result<Self, Error> {
        gilbert_elliott::check_probability("drop rate", drop_rate)?;
        Ok(Self { drop_rate, rng })
    }
}

impl<R: Rng> LinkModel for Lossy<R> {
    fn delivers(&mut self, _from: NodeId, _to: NodeId) -> bool {
        !self.rng.random_bool(self.drop_rate)
    }
}

/// Correlated loss: every directed link runs its own Gilbert-Elliott chain,
/// created lazily on first use.
#[derive(Debug)]
pub struct Bursty<R> {
    model: Model,
    chains: HashMap<(NodeId, NodeId), Chain>,
    rng: R,
}

impl<R: Rng> Bursty<R> {
    pub fn new(model: Model, rng: R) -> Self {
        Self {
            model,
            chains: HashMap::new(),
            rng,
        }
    }
}

impl<R: Rng> LinkModel for Bursty<R> {
    fn delivers(&mut self, from: NodeId, to: NodeId) -> bool {
        let model = self.model;
        self.chains
            .entry((from, to))
            .or_insert_with(|| Chain::new(model))
            .next(&mut self.rng)
    }
}
