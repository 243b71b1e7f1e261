//! Flooding propagation over a [`WeightedGraph`].
//!
//! A node that receives a message for the first time forwards it to every
//! neighbor except the one it came from. Later copies are counted and
//! discarded. Each hop takes the edge weight in simulated time, so the order
//! in which copies arrive follows path latency.
//!
//! All per-run counters live in [`Gossip`], which is the state the simulator
//! hands to every event action.

mod link;

pub use link::*;

use std::collections::HashMap;

use bit_set::BitSet;
use tracing::{debug, trace};

use crate::error::Error;
use crate::graph::{NodeId, WeightedGraph};
use crate::sim::{Event, Simulator, Time};

pub type MessageId = usize;

/// Dense index given to each distinct message, in publish order.
type Slot = usize;

/// State of a gossip run, indexed by node id.
pub struct Gossip<'g, L> {
    graph: &'g WeightedGraph,
    links: L,
    /// Slot of every message published so far.
    slots: HashMap<MessageId, Slot>,
    /// `seen[n].contains(s)` if node `n` has accepted the message in slot `s`.
    seen: Vec<BitSet>,
    /// Copies put on the wire by each node, dropped ones included.
    sent: Vec<u64>,
    /// Copies each node got from a neighbor, duplicates included.
    received: Vec<u64>,
    /// Copies lost by each node's outgoing links.
    dropped: Vec<u64>,
    /// Path latency at first receipt, one entry per accepted message.
    latencies: Vec<Vec<Time>>,
}

impl<'g, L: LinkModel> Gossip<'g, L> {
    pub fn new(graph: &'g WeightedGraph, links: L) -> Self {
        let n = graph.node_count();
        Self {
            graph,
            links,
            slots: HashMap::new(),
            seen: vec![BitSet::new(); n],
            sent: vec![0; n],
            received: vec![0; n],
            dropped: vec![0; n],
            latencies: vec![Vec::new(); n],
        }
    }

    /// Originate `message` at `origin` and run the simulator until every copy
    /// has been delivered or dropped.
    ///
    /// Message ids can be any value. Publishing an id again floods it again,
    /// but nodes that already accepted it drop the new copies.
    pub fn publish(
        &mut self,
        sim: &mut Simulator<Self>,
        origin: NodeId,
        message: MessageId,
    ) -> Result<(), Error> {
        self.graph.validate(origin)?;
        let next_slot = self.slots.len();
        let slot = *self.slots.entry(message).or_insert(next_slot);

        let start = sim.fired();
        let injection = Self::delivery(None, origin, message, slot, Time::ZERO, Time::ZERO);
        sim.execute(self, injection)?;
        debug!(origin, message, events = sim.fired() - start, "message flooded");
        Ok(())
    }

    fn delivery(
        from: Option<NodeId>,
        to: NodeId,
        message: MessageId,
        slot: Slot,
        latency: Time,
        delay: Time,
    ) -> Event<Self> {
        Event::after(delay, move |gossip: &mut Self, _now| {
            gossip.receive(from, to, message, slot, latency)
        })
    }

    fn receive(
        &mut self,
        from: Option<NodeId>,
        node: NodeId,
        message: MessageId,
        slot: Slot,
        latency: Time,
    ) -> Vec<Event<Self>> {
        if from.is_some() {
            self.received[node] += 1;
        }
        if !self.seen[node].insert(slot) {
            return Vec::new();
        }
        self.latencies[node].push(latency);

        let graph = self.graph;
        let mut next = Vec::new();
        for edge in graph.incident(node).filter(|edge| Some(edge.neighbor) != from) {
            self.sent[node] += 1;
            if self.links.delivers(node, edge.neighbor) {
                let delay = edge.delay();
                // Saturates only when the clock itself would overflow, which
                // the simulator reports when scheduling this delivery.
                let arrival = latency.saturating_add(delay);
                next.push(Self::delivery(Some(node), edge.neighbor, message, slot, arrival, delay));
            } else {
                self.dropped[node] += 1;
            }
        }
        trace!(node, message, forwarded = next.len(), "first receipt");
        next
    }
}

impl<L> Gossip<'_, L> {
    pub fn graph(&self) -> &WeightedGraph {
        self.graph
    }

    pub fn sent(&self) -> &[u64] {
        &self.sent
    }

    pub fn received(&self) -> &[u64] {
        &self.received
    }

    pub fn dropped(&self) -> &[u64] {
        &self.dropped
    }

    pub fn latencies(&self) -> &[Vec<Time>] {
        &self.latencies
    }

    pub fn has_seen(&self, node: NodeId, message: MessageId) -> bool {
        let Some(&slot) = self.slots.get(&message) else {
            return false;
        };
        self.seen.get(node).is_some_and(|seen| seen.contains(slot))
    }

    /// Number of distinct messages each node has accepted.
    pub fn unique_received(&self) -> Vec<usize> {
        self.seen.iter().map(BitSet::len).collect()
    }
}
