use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};
use tracing::{debug, trace};

use super::{NodeId, Weight, WeightedGraph};
use crate::error::GraphError;

/// Builds random graphs where every node has the same degree.
///
/// Each pass visits the nodes in a fresh random order and links every node
/// still below the target degree to randomly chosen non-neighbors that are
/// also below it. Greedy assignment can strand a node with no eligible
/// partner, so when a pass ends unsaturated one random edge is removed and
/// another pass runs.
///
/// The graph is saturated once the degree sum reaches `nodes * degree - 1`.
/// When `nodes * degree` is even the degree sum is even too, so this means
/// every node has exactly `degree` edges. When it is odd no regular graph
/// exists, and the result has one node at `degree - 1`.
#[derive(Clone, Copy, Debug)]
pub struct RegularGraphBuilder {
    nodes: usize,
    degree: usize,
}

impl RegularGraphBuilder {
    pub fn new(nodes: usize, degree: usize) -> Self {
        Self { nodes, degree }
    }

    /// Build a graph with every edge weight set to 1.
    pub fn build<R: Rng>(&self, rng: &mut R) -> Result<WeightedGraph, GraphError> {
        self.build_with(rng, |_| 1)
    }

    /// Build a graph, drawing each new edge's weight from `weight_fn`.
    pub fn build_with<R, F>(
        &self,
        rng: &mut R,
        mut weight_fn: F,
    ) -> Result<WeightedGraph, GraphError>
    where
        R: Rng,
        F: FnMut(&mut R) -> Weight,
    {
        let mut graph = WeightedGraph::new(self.nodes)?;
        if self.degree >= self.nodes {
            return Err(GraphError::InfeasibleDegree {
                nodes: self.nodes,
                degree: self.degree,
            });
        }
        if self.degree == 0 {
            return Ok(graph);
        }

        let mut order = graph.nodes();
        let mut passes = 0u64;
        let mut repairs = 0u64;
        loop {
            passes += 1;
            order.shuffle(rng);
            for &node in &order {
                self.fill(&mut graph, node, rng, &mut weight_fn)?;
            }

            if self.is_saturated(&graph) {
                debug!(
                    nodes = self.nodes,
                    degree = self.degree,
                    passes,
                    repairs,
                    "built regular graph"
                );
                return Ok(graph);
            }

            let node = rng.random_range(0..self.nodes);
            if let Some(edge) = graph.edges_of(node)?.choose(rng).copied() {
                trace!(
                    node = edge.node,
                    neighbor = edge.neighbor,
                    "removing edge to unstick builder"
                );
                graph.set_edge(edge.node, edge.neighbor, 0)?;
                repairs += 1;
            }
        }
    }

    /// Connect `node` to random eligible partners until it reaches the target
    /// degree or runs out of partners.
    fn fill<R, F>(
        &self,
        graph: &mut WeightedGraph,
        node: NodeId,
        rng: &mut R,
        weight_fn: &mut F,
    ) -> Result<(), GraphError>
    where
        R: Rng,
        F: FnMut(&mut R) -> Weight,
    {
        let degree = graph.degree(node)?;
        if degree >= self.degree {
            return Ok(());
        }

        let mut candidates = Vec::new();
        for candidate in graph.nodes() {
            if candidate != node
                && !graph.is_edge_between(node, candidate)?
                && graph.degree(candidate)? < self.degree
            {
                candidates.push(candidate);
            }
        }
        candidates.shuffle(rng);

        for neighbor in candidates.into_iter().take(self.degree - degree) {
            let weight = weight_fn(rng);
            if weight == 0 {
                return Err(GraphError::ZeroWeight { node, neighbor });
            }
            graph.set_edge(node, neighbor, weight)?;
        }
        Ok(())
    }

    fn is_saturated(&self, graph: &WeightedGraph) -> bool {
        let total: usize = graph.degrees().iter().sum();
        total + 1 >= self.nodes * self.degree
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_xoshiro::Xoshiro256PlusPlus;
    use rand_xoshiro::rand_core::SeedableRng;

    fn rng(seed: u64) -> Xoshiro256PlusPlus {
        Xoshiro256PlusPlus::seed_from_u64(seed)
    }

    fn assert_well_formed(graph: &WeightedGraph) {
        let matrix = graph.as_adjacency_matrix();
        for (i, row) in matrix.iter().enumerate() {
            assert_eq!(row[i], 0, "self loop on {i}");
            for (j, &weight) in row.iter().enumerate() {
                assert_eq!(weight, matrix[j][i], "asymmetric at {i},{j}");
                assert!(weight >= 0);
            }
        }
    }

    #[test]
    fn every_node_reaches_target_degree() {
        let mut rng = rng(7);
        for (nodes, degree) in [(10, 4), (12, 4), (20, 3), (100, 4), (8, 7), (6, 1), (2, 1)] {
            for _ in 0..20 {
                let graph = RegularGraphBuilder::new(nodes, degree).build(&mut rng).unwrap();
                assert_well_formed(&graph);
                assert_eq!(graph.degrees(), vec![degree; nodes], "({nodes}, {degree})");
                assert_eq!(graph.edge_count(), nodes * degree / 2);
            }
        }
    }

    #[test]
    fn odd_degree_sum_leaves_one_node_short() {
        let mut rng = rng(11);
        for _ in 0..20 {
            let graph = RegularGraphBuilder::new(5, 3).build(&mut rng).unwrap();
            assert_well_formed(&graph);
            let degrees = graph.degrees();
            assert_eq!(degrees.iter().sum::<usize>(), 14);
            assert_eq!(degrees.iter().filter(|&&d| d == 2).count(), 1);
        }
    }

    #[test]
    fn weights_come_from_weight_fn() {
        let mut rng = rng(3);
        let graph = RegularGraphBuilder::new(30, 4)
            .build_with(&mut rng, |rng| rng.random_range(1..100))
            .unwrap();
        assert_well_formed(&graph);
        for node in graph.nodes() {
            let edges = graph.edges_of(node).unwrap();
            assert_eq!(edges.len(), 4);
            assert!(edges.iter().all(|e| (1..100).contains(&e.weight)));
        }
    }

    #[test]
    fn zero_degree_gives_empty_graph() {
        let graph = RegularGraphBuilder::new(4, 0).build(&mut rng(1)).unwrap();
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn rejects_infeasible_parameters() {
        assert_eq!(
            RegularGraphBuilder::new(4, 4).build(&mut rng(1)),
            Err(GraphError::InfeasibleDegree { nodes: 4, degree: 4 })
        );
        assert_eq!(
            RegularGraphBuilder::new(0, 0).build(&mut rng(1)),
            Err(GraphError::InvalidSize(0))
        );
    }

    #[test]
    fn rejects_bad_weights() {
        assert_eq!(
            RegularGraphBuilder::new(4, 2).build_with(&mut rng(1), |_| -5),
            Err(GraphError::NegativeWeight(-5))
        );
        assert!(matches!(
            RegularGraphBuilder::new(4, 2).build_with(&mut rng(1), |_| 0),
            Err(GraphError::ZeroWeight { .. })
        ));
    }
}
