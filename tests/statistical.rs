//! Distribution checks for the randomized parts of graph construction.

use gossip_sim::graph::RegularGraphBuilder;
use gossip_sim::stats::{mean, mean_over, remove_zeros, std_dev, sum};
use rand::seq::SliceRandom;
use rand_xoshiro::Xoshiro256PlusPlus;
use rand_xoshiro::rand_core::SeedableRng;

fn table(n: usize) -> Vec<Vec<f64>> {
    vec![vec![0.; n]; n]
}

#[test]
fn shuffle_generates_reasonably_random_permutations() {
    let elements = 10;
    let rounds = 20_000;
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(2024);

    // recordings[value][index] counts how often `value` landed at `index`.
    let mut recordings = table(elements);
    for _ in 0..rounds {
        let mut values: Vec<usize> = (0..elements).collect();
        values.shuffle(&mut rng);
        for (index, value) in values.into_iter().enumerate() {
            recordings[value][index] += 1.;
        }
    }
    let flat: Vec<f64> = recordings.concat();

    assert_eq!(sum(&flat), (elements * rounds) as f64);
    let expected_mean = rounds as f64 / elements as f64;
    assert_eq!(mean(&flat), Some(expected_mean));

    let rsd = std_dev(&flat).unwrap() / expected_mean;
    assert!(rsd < 0.05, "relative standard deviation {rsd}");
}

#[test]
fn builder_generates_reasonably_random_regular_graphs() {
    let nodes = 12;
    let degree = 4;
    let rounds = 10_000;
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(7);

    let mut recordings = table(nodes);
    for _ in 0..rounds {
        let graph = RegularGraphBuilder::new(nodes, degree).build(&mut rng).unwrap();
        for (i, row) in graph.as_adjacency_matrix().iter().enumerate() {
            for (j, &weight) in row.iter().enumerate() {
                recordings[i][j] += weight as f64;
            }
        }
    }

    // A node is never its own neighbor.
    for (i, row) in recordings.iter().enumerate() {
        assert_eq!(row[i], 0.);
    }

    let flat: Vec<f64> = recordings.concat();
    assert_eq!(sum(&flat), (nodes * degree * rounds) as f64);

    for row in &recordings {
        assert_eq!(sum(row), (rounds * degree) as f64);
    }

    // Mean over off-diagonal cells.
    let expected_mean = (rounds * degree) as f64 / (nodes - 1) as f64;
    let actual_mean = mean_over(&flat, flat.len() - nodes).unwrap();
    assert!((actual_mean - expected_mean).abs() < 1e-9);

    let rsd = std_dev(&remove_zeros(&flat)).unwrap() / expected_mean;
    assert!(rsd < 0.05, "relative standard deviation {rsd}");
}
