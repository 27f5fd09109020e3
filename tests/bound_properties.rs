use exact_bisect::algs::assignment::{Configuration, Label};
use exact_bisect::algs::bounds::{
    IncidenceIndex, count_assigned, cut_weight, lower_bound_of_remainder,
};
use exact_bisect::graph::{Graph, Weight};
use proptest::prelude::*;

type Case = (usize, Vec<(usize, usize, Weight)>, Vec<bool>);

/// A graph with up to 7 vertices and a decided prefix of arbitrary length.
fn graph_and_prefix() -> impl Strategy<Value = Case> {
    (1usize..=7).prop_flat_map(|n| {
        (Just(n), prop::collection::vec((0..n, 0..n, 0i64..20), 0..24), 0..=n).prop_flat_map(
            |(n, edges, k)| (Just(n), Just(edges), prop::collection::vec(any::<bool>(), k)),
        )
    })
}

fn build((n, edges, prefix): &Case) -> (Graph, Configuration) {
    let g = Graph::from_edges(*n, edges.iter().copied()).unwrap();
    let mut c = Configuration::undecided(*n);
    for (v, &in_x) in prefix.iter().enumerate() {
        c.set(v, if in_x { Label::InX } else { Label::InY });
    }
    (g, c)
}

/// Every way to finish `config`, ignoring the size constraint.
fn completions(config: &Configuration) -> Vec<Configuration> {
    let first = config.first_undecided();
    let free = config.len() - first;
    (0..1u32 << free)
        .map(|mask| {
            let mut c = config.clone();
            for i in 0..free {
                c.set(first + i, if (mask >> i) & 1 == 1 { Label::InX } else { Label::InY });
            }
            c
        })
        .collect()
}

proptest! {
    #[test]
    fn cut_weight_matches_set_definition(case in graph_and_prefix()) {
        let (g, c) = build(&case);
        for full in completions(&c) {
            let xs = full.vertices_with(Label::InX);
            let expected: Weight = g
                .edges()
                .iter()
                .filter(|e| xs.contains(&e.v1) && !xs.contains(&e.v2))
                .map(|e| e.weight)
                .sum();
            prop_assert_eq!(cut_weight(&full, &g), expected);
        }
    }

    #[test]
    fn lower_bound_is_admissible(case in graph_and_prefix()) {
        let (g, mut c) = build(&case);
        let first = c.first_undecided();
        let decided = cut_weight(&c, &g);
        let bound = lower_bound_of_remainder(&mut c, first, decided, &g);
        prop_assert!(bound >= 0);
        let best = completions(&c).iter().map(|full| cut_weight(full, &g)).min().unwrap();
        prop_assert!(
            decided + bound <= best,
            "decided {} + bound {} > best {}",
            decided,
            bound,
            best
        );
    }

    #[test]
    fn incremental_bound_equals_reference(case in graph_and_prefix()) {
        let (g, mut c) = build(&case);
        let index = IncidenceIndex::new(&g);
        let first = c.first_undecided();
        let fast = index.lower_bound(&c, first);
        let decided = cut_weight(&c, &g);
        prop_assert_eq!(fast, lower_bound_of_remainder(&mut c, first, decided, &g));
    }

    #[test]
    fn counts_cover_the_prefix(case in graph_and_prefix()) {
        let (_, c) = build(&case);
        let (x, y) = count_assigned(&c);
        prop_assert_eq!(x + y, case.2.len());
        prop_assert_eq!(x, case.2.iter().filter(|&&b| b).count());
    }
}
