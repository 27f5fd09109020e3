mod util;
use util::*;

use exact_bisect::algs::{brute_force, search, search_sequential};
use exact_bisect::config::Strategy;
use exact_bisect::graph::INFINITE_WEIGHT;

const STRATEGIES: [Strategy; 3] = [Strategy::Sequential, Strategy::FlatDynamic, Strategy::ForkJoin];

#[test]
fn all_engines_agree_with_brute_force() {
    for seed in 0..6u64 {
        let n = 6 + seed as usize;
        let g = random_graph(n, 0.45, seed);
        for target in [1, n / 3, n / 2] {
            let expected = brute_force(&g, target).weight;
            assert_eq!(
                search_sequential(&g, target).weight,
                expected,
                "seed {seed} target {target}"
            );
            for strategy in STRATEGIES {
                let got = search(&g, target, &config(strategy)).unwrap();
                assert_eq!(got.weight, expected, "{strategy:?} seed {seed} target {target}");
            }
        }
    }
}

#[test]
fn directed_edges_and_duplicates() {
    for seed in 0..4u64 {
        let g = random_directed_graph(9, 30, seed);
        for target in [2, 4, 7] {
            let expected = brute_force(&g, target).weight;
            for strategy in STRATEGIES {
                assert_eq!(search(&g, target, &config(strategy)).unwrap().weight, expected);
            }
        }
    }
}

#[test]
fn returned_configuration_is_complete_and_balanced() {
    let g = random_graph(10, 0.5, 99);
    for strategy in STRATEGIES {
        let got = search(&g, 4, &config(strategy)).unwrap();
        let cfg = got.config.as_ref().expect("feasible");
        assert!(cfg.is_complete());
        assert_eq!(got.x_vertices().len(), 4);
        assert_eq!(got.y_vertices().len(), 6);
        assert_eq!(exact_bisect::algs::bounds::cut_weight(cfg, &g), got.weight);
    }
}

#[test]
fn reruns_return_the_same_weight() {
    let g = random_graph(11, 0.4, 3);
    for strategy in STRATEGIES {
        let first = search(&g, 5, &config(strategy)).unwrap().weight;
        for _ in 0..3 {
            assert_eq!(search(&g, 5, &config(strategy)).unwrap().weight, first);
        }
    }
}

#[test]
fn empty_x_costs_nothing() {
    let g = random_graph(8, 0.7, 5);
    for strategy in STRATEGIES {
        let got = search(&g, 0, &config(strategy)).unwrap();
        assert_eq!(got.weight, 0);
        assert!(got.x_vertices().is_empty());
    }
}

#[test]
fn oversized_target_has_no_solution() {
    let g = random_graph(5, 0.5, 1);
    for strategy in STRATEGIES {
        let got = search(&g, 6, &config(strategy)).unwrap();
        assert_eq!(got.weight, INFINITE_WEIGHT);
        assert!(got.config.is_none());
    }
}

#[test]
fn empty_graph() {
    let g = exact_bisect::graph::Graph::new(0);
    let got = search(&g, 0, &config(Strategy::FlatDynamic)).unwrap();
    assert_eq!(got.weight, 0);
    assert!(got.is_feasible());
}
