//! Error types for graph construction and event simulation.

use thiserror::Error;

use crate::graph::NodeId;

/// Errors raised by [`WeightedGraph`](crate::graph::WeightedGraph) and
/// [`RegularGraphBuilder`](crate::graph::RegularGraphBuilder).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// Graph created with no nodes.
    #[error("node count not positive ({0})")]
    InvalidSize(usize),

    /// Node id outside `0..nodes`.
    #[error("invalid node id {node} (must be between 0 and {max})")]
    InvalidNode { node: NodeId, max: NodeId },

    /// Edge from a node to itself.
    #[error("node {0} cannot have an edge to itself")]
    SelfLoop(NodeId),

    /// Edge weights are delays and cannot be negative.
    #[error("edge weight cannot be negative ({0})")]
    NegativeWeight(i64),

    /// A weight function produced 0, which would not create an edge.
    #[error("weight function returned 0 for edge {node} - {neighbor}")]
    ZeroWeight { node: NodeId, neighbor: NodeId },

    /// No graph with every node at `degree` fits in `nodes` nodes.
    #[error("degree {degree} is infeasible for {nodes} nodes")]
    InfeasibleDegree { nodes: usize, degree: usize },
}

/// Errors raised by the event simulator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimError {
    /// Event scheduled with a negative relative time.
    #[error("event time must not be negative ({0})")]
    NegativeTime(i64),

    /// An event's absolute fire time does not fit the clock.
    #[error("event at {now} + {delay} overflows the clock")]
    TimeOverflow { now: u64, delay: u64 },

    /// The run loop popped from an empty queue. Signals a simulator bug.
    #[error("event queue empty while the run loop expected an event")]
    EmptyQueue,
}

/// Any error surfaced by an experiment run.
#[derive(Debug, Error)]
pub enum Error {
    /// A model or experiment parameter is out of its valid range.
    #[error("invalid {name}: {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Sim(#[from] SimError),
}
