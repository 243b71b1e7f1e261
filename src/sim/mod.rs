//! Discrete-event simulation engine.

mod event;
mod queue;
mod simulator;
mod time;

pub use event::*;
pub use queue::*;
pub use simulator::*;
pub use time::*;
