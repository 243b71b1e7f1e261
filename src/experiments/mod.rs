//! Experiments built on the simulator, the regular graph builder and gossip
//! flooding. Each one is a config with builder-style setters, a `run` that
//! returns a report, and a `print_summary` on the report.

mod duplication;
mod latency;
mod unreliable;

pub use duplication::{DuplicationConfig, DuplicationReport};
pub use latency::{LatencyConfig, LatencyReport};
pub use unreliable::{Loss, UnreliableConfig, UnreliableReport};

use rand_xoshiro::Xoshiro256PlusPlus;
use rand_xoshiro::rand_core::SeedableRng;

/// Default seed used when a config is not given one.
pub const DEFAULT_SEED: u64 = 12345;

fn seeded_rng(seed: u64) -> Xoshiro256PlusPlus {
    Xoshiro256PlusPlus::seed_from_u64(seed)
}
