//! Gossip flooding simulation over random regular graphs.
//!
//! - [`sim`]: discrete-event simulator with a virtual clock.
//! - [`graph`]: weighted undirected graphs and a random regular graph builder.
//! - [`gossip`]: flooding propagation state and link loss models.
//! - [`experiments`]: duplication, latency and unreliable-link studies.
//!
//! ```
//! use gossip_sim::gossip::{Gossip, Reliable};
//! use gossip_sim::graph::RegularGraphBuilder;
//! use gossip_sim::sim::Simulator;
//! use rand_xoshiro::Xoshiro256PlusPlus;
//! use rand_xoshiro::rand_core::SeedableRng;
//!
//! let mut rng = Xoshiro256PlusPlus::seed_from_u64(1);
//! let graph = RegularGraphBuilder::new(10, 4).build(&mut rng).unwrap();
//!
//! let mut gossip = Gossip::new(&graph, Reliable);
//! let mut sim = Simulator::new();
//! gossip.publish(&mut sim, 0, 0).unwrap();
//! assert!(gossip.has_seen(0, 0));
//! ```

pub mod error;
pub mod experiments;
pub mod gilbert_elliott;
pub mod gossip;
pub mod graph;
pub mod sim;
pub mod stats;

pub use error::{Error, GraphError, SimError};
