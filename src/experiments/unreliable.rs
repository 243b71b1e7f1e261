//! How well does flooding deliver over links that lose messages?
//!
//! Builds a regular graph with unit weights, publishes many messages from
//! random origins over lossy links, and counts which nodes missed which
//! messages.

use rand::Rng;
use rand_xoshiro::Xoshiro256PlusPlus;
use rand_xoshiro::rand_core::SeedableRng;
use tracing::info;

use super::{DEFAULT_SEED, seeded_rng};
use crate::error::Error;
use crate::gilbert_elliott::Model;
use crate::gossip::{Bursty, Gossip, LinkModel, Lossy};
use crate::graph::{RegularGraphBuilder, WeightedGraph};
use crate::sim::Simulator;

/// How links lose messages.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Loss {
    /// Each copy is dropped independently.
    Independent { drop_rate: f64 },
    /// Each directed link alternates between good and bad periods.
    Bursty {
        good_len: f64,
        bad_len: f64,
        good_loss: f64,
        bad_loss: f64,
    },
}

impl Default for Loss {
    fn default() -> Self {
        Loss::Independent { drop_rate: 0.05 }
    }
}

#[derive(Clone, Debug)]
pub struct UnreliableConfig {
    pub nodes: usize,
    pub degree: usize,
    pub messages: usize,
    pub loss: Loss,
    pub seed: u64,
}

impl UnreliableConfig {
    pub fn new(nodes: usize, degree: usize) -> Self {
        Self {
            nodes,
            degree,
            messages: 10_000,
            loss: Loss::default(),
            seed: DEFAULT_SEED,
        }
    }

    pub fn with_messages(mut self, messages: usize) -> Self {
        self.messages = messages;
        self
    }

    pub fn with_loss(mut self, loss: Loss) -> Self {
        self.loss = loss;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn run(&self) -> Result<UnreliableReport, Error> {
        let mut rng = seeded_rng(self.seed);
        let graph = RegularGraphBuilder::new(self.nodes, self.degree).build(&mut rng)?;
        let link_rng = Xoshiro256PlusPlus::from_rng(&mut rng);

        let report = match self.loss {
            Loss::Independent { drop_rate } => {
                self.flood(&graph, Lossy::new(drop_rate, link_rng)?, &mut rng)?
            }
            Loss::Bursty {
                good_len,
                bad_len,
                good_loss,
                bad_loss,
            } => {
                let model = Model::from_mean_lengths(good_len, bad_len, good_loss, bad_loss)?;
                self.flood(&graph, Bursty::new(model, link_rng), &mut rng)?
            }
        };
        info!(
            nodes = self.nodes,
            degree = self.degree,
            messages = self.messages,
            seed = self.seed,
            delivery_rate = report.delivery_rate(),
            "unreliable connections experiment finished"
        );
        Ok(report)
    }

    fn flood<L: LinkModel, R: Rng>(
        &self,
        graph: &WeightedGraph,
        links: L,
        rng: &mut R,
    ) -> Result<UnreliableReport, Error> {
        let mut gossip = Gossip::new(graph, links);
        let mut sim = Simulator::new();
        for message in 0..self.messages {
            let origin = rng.random_range(0..self.nodes);
            gossip.publish(&mut sim, origin, message)?;
        }
        Ok(UnreliableReport {
            messages: self.messages,
            unique_received: gossip.unique_received(),
            dropped: gossip.dropped().iter().sum(),
        })
    }
}

impl Default for UnreliableConfig {
    fn default() -> Self {
        Self::new(100, 4)
    }
}

#[derive(Clone, Debug)]
pub struct UnreliableReport {
    pub messages: usize,
    /// Distinct messages each node received, origin included.
    pub unique_received: Vec<usize>,
    /// Copies lost on links.
    pub dropped: u64,
}

impl UnreliableReport {
    pub fn expected(&self) -> usize {
        self.messages * self.unique_received.len()
    }

    pub fn delivered(&self) -> usize {
        self.unique_received.iter().sum()
    }

    pub fn missed(&self) -> usize {
        self.expected() - self.delivered()
    }

    pub fn delivery_rate(&self) -> f64 {
        if self.expected() == 0 {
            return 1.;
        }
        self.delivered() as f64 / self.expected() as f64
    }

    pub fn nodes_received_all(&self) -> usize {
        self.unique_received
            .iter()
            .filter(|&&count| count == self.messages)
            .count()
    }

    pub fn print_summary(&self) {
        println!("=== Delivery ===");
        println!("Message delivery rate: {:.5}", self.delivery_rate());
        println!("Missed messages:       {}/{}", self.missed(), self.expected());
        println!(
            "Nodes that received all: {}/{}",
            self.nodes_received_all(),
            self.unique_received.len()
        );
        println!("Copies dropped on links: {}", self.dropped);
    }
}
