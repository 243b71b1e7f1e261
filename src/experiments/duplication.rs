//! How many redundant copies does flooding produce?
//!
//! Builds a regular graph with unit weights, floods a single message from
//! one node, and records how often each node sent and received it.

use tracing::info;

use super::{DEFAULT_SEED, seeded_rng};
use crate::error::Error;
use crate::gossip::{Gossip, Reliable};
use crate::graph::{NodeId, RegularGraphBuilder, Weight};
use crate::sim::Simulator;

#[derive(Clone, Debug)]
pub struct DuplicationConfig {
    pub nodes: usize,
    pub degree: usize,
    /// Node the message starts from.
    pub origin: NodeId,
    pub seed: u64,
}

impl DuplicationConfig {
    pub fn new(nodes: usize, degree: usize) -> Self {
        Self {
            nodes,
            degree,
            origin: 0,
            seed: DEFAULT_SEED,
        }
    }

    pub fn with_origin(mut self, origin: NodeId) -> Self {
        self.origin = origin;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn run(&self) -> Result<DuplicationReport, Error> {
        let mut rng = seeded_rng(self.seed);
        let graph = RegularGraphBuilder::new(self.nodes, self.degree).build(&mut rng)?;

        let mut gossip = Gossip::new(&graph, Reliable);
        let mut sim = Simulator::new();
        gossip.publish(&mut sim, self.origin, 0)?;

        let report = DuplicationReport {
            adjacency: graph.as_adjacency_matrix().to_vec(),
            degrees: graph.degrees(),
            sent: gossip.sent().to_vec(),
            received: gossip.received().to_vec(),
            reached: gossip.unique_received().iter().sum(),
        };
        info!(
            nodes = self.nodes,
            degree = self.degree,
            seed = self.seed,
            total_sent = report.total_sent(),
            duplicates = report.duplicates(),
            "duplication experiment finished"
        );
        Ok(report)
    }
}

impl Default for DuplicationConfig {
    fn default() -> Self {
        Self::new(10, 4)
    }
}

#[derive(Clone, Debug)]
pub struct DuplicationReport {
    pub adjacency: Vec<Vec<Weight>>,
    pub degrees: Vec<usize>,
    pub sent: Vec<u64>,
    pub received: Vec<u64>,
    /// Nodes that got the message, origin included.
    pub reached: usize,
}

impl DuplicationReport {
    pub fn total_sent(&self) -> u64 {
        self.sent.iter().sum()
    }

    pub fn total_received(&self) -> u64 {
        self.received.iter().sum()
    }

    /// Received copies beyond the first one at each node.
    pub fn duplicates(&self) -> u64 {
        self.total_received() - self.reached.saturating_sub(1) as u64
    }

    pub fn print_summary(&self, show_adjacency: bool) {
        if show_adjacency {
            println!("=== Adjacency Matrix ===");
            for row in &self.adjacency {
                let cells: Vec<String> = row.iter().map(|w| format!("{w:>3}")).collect();
                println!("{}", cells.join(" "));
            }
        }

        println!("\n=== Messages Per Node ===");
        println!("{:>5} {:>7} {:>6} {:>9}", "node", "degree", "sent", "received");
        for (node, degree) in self.degrees.iter().enumerate() {
            println!(
                "{:>5} {:>7} {:>6} {:>9}",
                node, degree, self.sent[node], self.received[node]
            );
        }

        println!("\n=== Totals ===");
        println!("Total sent:     {}", self.total_sent());
        println!("Total received: {}", self.total_received());
        println!("Duplicates:     {}", self.duplicates());
        println!("Reached:        {}/{}", self.reached, self.degrees.len());
    }
}
