use crate::error::GraphError;
use crate::sim::Time;

pub type NodeId = usize;

/// Edge weight, read as a propagation delay. Zero means "no edge".
pub type Weight = i64;

/// An edge seen from `node`. Derived from the weight matrix on demand.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Edge {
    pub node: NodeId,
    pub neighbor: NodeId,
    pub weight: Weight,
}

impl Edge {
    /// Time for a message to cross this edge.
    pub fn delay(&self) -> Time {
        // Stored weights are never negative.
        Time::new(self.weight.unsigned_abs())
    }
}

/// Undirected graph over nodes `0..n`, backed by a symmetric weight matrix.
///
/// The node count is fixed at construction. `set_edge` is the only mutator,
/// and after every call the matrix is symmetric, has a zero diagonal, and
/// holds no negative weight.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WeightedGraph {
    matrix: Vec<Vec<Weight>>,
}

impl WeightedGraph {
    pub fn new(nodes: usize) -> Result<Self, GraphError> {
        if nodes == 0 {
            return Err(GraphError::InvalidSize(nodes));
        }
        Ok(Self {
            matrix: vec![vec![0; nodes]; nodes],
        })
    }

    pub fn node_count(&self) -> usize {
        self.matrix.len()
    }

    /// Node ids in order, `0..n`.
    pub fn nodes(&self) -> Vec<NodeId> {
        (0..self.node_count()).collect()
    }

    /// Set the weight of the edge `node - neighbor`. A weight of 0 removes it.
    pub fn set_edge(
        &mut self,
        node: NodeId,
        neighbor: NodeId,
        weight: Weight,
    ) -> Result<(), GraphError> {
        self.validate(node)?;
        self.validate(neighbor)?;
        if weight < 0 {
            return Err(GraphError::NegativeWeight(weight));
        }
        if node == neighbor {
            return Err(GraphError::SelfLoop(node));
        }
        self.matrix[node][neighbor] = weight;
        self.matrix[neighbor][node] = weight;
        Ok(())
    }

    pub fn weight(&self, node: NodeId, neighbor: NodeId) -> Result<Weight, GraphError> {
        self.validate(node)?;
        self.validate(neighbor)?;
        Ok(self.matrix[node][neighbor])
    }

    /// Edges incident to `node`, ordered by neighbor id.
    pub fn edges_of(&self, node: NodeId) -> Result<Vec<Edge>, GraphError> {
        self.validate(node)?;
        Ok(self.incident(node).collect())
    }

    /// Edges of a node already known to be in range.
    pub(crate) fn incident(&self, node: NodeId) -> impl Iterator<Item = Edge> + '_ {
        self.matrix[node]
            .iter()
            .enumerate()
            .filter(|&(_, &weight)| weight != 0)
            .map(move |(neighbor, &weight)| Edge {
                node,
                neighbor,
                weight,
            })
    }

    pub fn neighbors_of(&self, node: NodeId) -> Result<Vec<NodeId>, GraphError> {
        Ok(self.edges_of(node)?.into_iter().map(|e| e.neighbor).collect())
    }

    pub fn is_edge_between(&self, node: NodeId, neighbor: NodeId) -> Result<bool, GraphError> {
        Ok(self.weight(node, neighbor)? != 0)
    }

    pub fn degree(&self, node: NodeId) -> Result<usize, GraphError> {
        self.validate(node)?;
        Ok(row_degree(&self.matrix[node]))
    }

    /// Degree of every node, indexed by node id.
    pub fn degrees(&self) -> Vec<usize> {
        self.matrix.iter().map(|row| row_degree(row)).collect()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.degrees().iter().sum::<usize>() / 2
    }

    /// Read-only view of the full weight matrix.
    pub fn as_adjacency_matrix(&self) -> &[Vec<Weight>] {
        &self.matrix
    }

    pub(crate) fn validate(&self, node: NodeId) -> Result<(), GraphError> {
        if node >= self.node_count() {
            return Err(GraphError::InvalidNode {
                node,
                max: self.node_count() - 1,
            });
        }
        Ok(())
    }
}

fn row_degree(row: &[Weight]) -> usize {
    row.iter().filter(|&&weight| weight != 0).count()
}
