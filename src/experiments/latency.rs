//! How do link latencies translate into delivery latency?
//!
//! Builds a regular graph with random edge weights, publishes many messages
//! from random origins, and summarizes the latency at which each node first
//! saw each message.

use rand::Rng;
use tracing::info;

use super::{DEFAULT_SEED, seeded_rng};
use crate::error::Error;
use crate::gossip::{Gossip, Reliable};
use crate::graph::{RegularGraphBuilder, Weight};
use crate::sim::Simulator;
use crate::stats;

#[derive(Clone, Debug)]
pub struct LatencyConfig {
    pub nodes: usize,
    pub degree: usize,
    pub messages: usize,
    /// Edge weights are drawn uniformly from `1..=max_weight`.
    pub max_weight: Weight,
    pub seed: u64,
}

impl LatencyConfig {
    pub fn new(nodes: usize, degree: usize) -> Self {
        Self {
            nodes,
            degree,
            messages: 10_000,
            max_weight: 100,
            seed: DEFAULT_SEED,
        }
    }

    pub fn with_messages(mut self, messages: usize) -> Self {
        self.messages = messages;
        self
    }

    pub fn with_max_weight(mut self, max_weight: Weight) -> Self {
        self.max_weight = max_weight;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn run(&self) -> Result<LatencyReport, Error> {
        if self.max_weight < 1 {
            return Err(Error::InvalidParameter {
                name: "max weight",
                value: self.max_weight as f64,
            });
        }
        let mut rng = seeded_rng(self.seed);
        let max_weight = self.max_weight;
        let graph = RegularGraphBuilder::new(self.nodes, self.degree)
            .build_with(&mut rng, |rng| rng.random_range(1..=max_weight))?;

        let mut gossip = Gossip::new(&graph, Reliable);
        let mut sim = Simulator::new();
        for message in 0..self.messages {
            let origin = rng.random_range(0..self.nodes);
            gossip.publish(&mut sim, origin, message)?;
        }

        let samples: Vec<f64> = gossip
            .latencies()
            .iter()
            .flatten()
            .map(|latency| latency.as_f64())
            .collect();
        let report = LatencyReport {
            samples: samples.len(),
            mean: stats::mean(&samples).unwrap_or_default(),
            std_dev: stats::std_dev(&samples).unwrap_or_default(),
            max: samples.iter().copied().fold(0., f64::max),
        };
        info!(
            nodes = self.nodes,
            degree = self.degree,
            messages = self.messages,
            seed = self.seed,
            mean = report.mean,
            std_dev = report.std_dev,
            "latency experiment finished"
        );
        Ok(report)
    }
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self::new(100, 4)
    }
}

/// Latency at first receipt, over every (node, message) pair that was
/// delivered. The origin counts with latency 0.
#[derive(Clone, Debug, PartialEq)]
pub struct LatencyReport {
    pub samples: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub max: f64,
}

impl LatencyReport {
    pub fn print_summary(&self) {
        println!("=== Delivery Latency ===");
        println!("Samples:  {}", self.samples);
        println!("Mean:     {:.2}", self.mean);
        println!("Std dev:  {:.2}", self.std_dev);
        println!("Max:      {:.0}", self.max);
    }
}
