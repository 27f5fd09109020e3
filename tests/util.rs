#![allow(dead_code)]
use exact_bisect::config::{SearchConfig, Strategy};
use exact_bisect::graph::Graph;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::path::PathBuf;

/// Undirected random graph: each pair is joined in both directions with probability `p`.
pub fn random_graph(n: usize, p: f64, seed: u64) -> Graph {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut g = Graph::new(n);
    for u in 0..n {
        for v in (u + 1)..n {
            if rng.r#gen::<f64>() < p {
                let w = rng.gen_range(1..=50);
                g.add_edge(u, v, w).unwrap();
                g.add_edge(v, u, w).unwrap();
            }
        }
    }
    g
}

/// Random graph with independent directed edges, duplicates and zero weights allowed.
pub fn random_directed_graph(n: usize, edges: usize, seed: u64) -> Graph {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut g = Graph::new(n);
    for _ in 0..edges {
        let u = rng.gen_range(0..n);
        let v = rng.gen_range(0..n);
        g.add_edge(u, v, rng.gen_range(0..=30)).unwrap();
    }
    g
}

pub fn config(strategy: Strategy) -> SearchConfig {
    SearchConfig {
        threads: 3,
        strategy,
        task_depth: 5,
        fork_cutoff: 3,
        master_depth: 3,
        worker_depth: 6,
    }
}

pub fn data_file(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("data").join(name)
}
