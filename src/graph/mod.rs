//! Weighted undirected graphs and the random regular graph builder.

mod regular;
mod weighted;

pub use regular::*;
pub use weighted::*;
