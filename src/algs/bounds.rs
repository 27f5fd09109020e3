//! Bound evaluation for partial assignments.
//!
//! The free functions are the reference definitions: [`count_assigned`],
//! [`cut_weight`] and [`lower_bound_of_remainder`]. The last one tentatively
//! places every undecided vertex on each side and recomputes the full cut,
//! costing O(undecided × E).
//!
//! [`IncidenceIndex`] produces the same values incrementally from per-vertex
//! edge lists, which is what the search engine uses on its hot path.

use super::assignment::{Configuration, Label};
use crate::graph::{Graph, VertexId, Weight};

/// Counts `(|X|, |Y|)` over the decided prefix.
pub fn count_assigned(config: &Configuration) -> (usize, usize) {
    let mut count_x = 0;
    let mut count_y = 0;
    for &label in config.labels() {
        match label {
            Label::InX => count_x += 1,
            Label::InY => count_y += 1,
            // every following vertex is undecided too
            Label::Undecided => break,
        }
    }
    (count_x, count_y)
}

/// Sum of weights of edges `v1 -> v2` with `v1` in X and `v2` in Y.
pub fn cut_weight(config: &Configuration, graph: &Graph) -> Weight {
    graph
        .edges()
        .iter()
        .filter(|e| config.get(e.v1) == Label::InX && config.get(e.v2) == Label::InY)
        .map(|e| e.weight)
        .sum()
}

/// Optimistic estimate of the weight the undecided suffix will add.
///
/// Each undecided vertex contributes the cheaper of its two tentative
/// placements, measured against the decided region only. `config` is
/// restored before returning.
pub fn lower_bound_of_remainder(
    config: &mut Configuration,
    first_undecided: usize,
    decided_weight: Weight,
    graph: &Graph,
) -> Weight {
    let mut bound = 0;
    for v in first_undecided..config.len() {
        config.set(v, Label::InX);
        let as_x = cut_weight(config, graph);
        config.set(v, Label::InY);
        let as_y = cut_weight(config, graph);
        bound += as_x.min(as_y) - decided_weight;
        config.set(v, Label::Undecided);
    }
    bound
}

/// Per-vertex outgoing (`v1 == v`) and incoming (`v2 == v`) edge lists.
#[derive(Clone, Debug)]
pub struct IncidenceIndex {
    outgoing: Vec<Vec<(VertexId, Weight)>>,
    incoming: Vec<Vec<(VertexId, Weight)>>,
}

impl IncidenceIndex {
    pub fn new(graph: &Graph) -> Self {
        let n = graph.vertex_count();
        let mut outgoing = vec![Vec::new(); n];
        let mut incoming = vec![Vec::new(); n];
        for e in graph.edges() {
            outgoing[e.v1].push((e.v2, e.weight));
            incoming[e.v2].push((e.v1, e.weight));
        }
        Self { outgoing, incoming }
    }

    /// Weight added to the cut by labelling the undecided vertex `v` with
    /// `label`, given the labels currently in `config`.
    #[inline]
    pub fn placement_cost(&self, config: &Configuration, v: VertexId, label: Label) -> Weight {
        let (edges, other_side) = match label {
            Label::InX => (&self.outgoing[v], Label::InY),
            Label::InY => (&self.incoming[v], Label::InX),
            Label::Undecided => return 0,
        };
        edges
            .iter()
            .filter(|&&(u, _)| u != v && config.get(u) == other_side)
            .map(|&(_, w)| w)
            .sum()
    }

    /// Same value as [`lower_bound_of_remainder`] without rescanning the edge list.
    pub fn lower_bound(&self, config: &Configuration, first_undecided: usize) -> Weight {
        (first_undecided..config.len())
            .map(|v| {
                self.placement_cost(config, v, Label::InX)
                    .min(self.placement_cost(config, v, Label::InY))
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(raw: &[i8]) -> Configuration {
        Configuration::from_labels(raw.iter().map(|&r| Label::from_wire(r).unwrap()).collect())
    }

    fn triangle() -> Graph {
        // 0 -> 1 (3), 1 -> 2 (5), 2 -> 0 (7), 0 -> 2 (1)
        Graph::from_edges(3, [(0, 1, 3), (1, 2, 5), (2, 0, 7), (0, 2, 1)]).unwrap()
    }

    #[test]
    fn counts_stop_at_first_undecided() {
        assert_eq!(count_assigned(&labels(&[1, 0, 1, -1])), (2, 1));
        assert_eq!(count_assigned(&labels(&[-1, -1])), (0, 0));
        assert_eq!(count_assigned(&labels(&[0, 0, 0])), (0, 3));
    }

    #[test]
    fn cut_weight_is_order_sensitive() {
        let g = triangle();
        // X = {0}, Y = {1, 2}: 0->1 and 0->2 cross in the X->Y direction
        assert_eq!(cut_weight(&labels(&[1, 0, 0]), &g), 4);
        // X = {1, 2}, Y = {0}: only 2->0 crosses X->Y
        assert_eq!(cut_weight(&labels(&[0, 1, 1]), &g), 7);
        assert_eq!(cut_weight(&labels(&[1, -1, -1]), &g), 0);
    }

    #[test]
    fn lower_bound_restores_configuration() {
        let g = triangle();
        let mut c = labels(&[1, -1, -1]);
        let before = c.clone();
        let decided = cut_weight(&c, &g);
        let lb = lower_bound_of_remainder(&mut c, 1, decided, &g);
        assert_eq!(c, before);
        // vertex 1: as X adds 0, as Y adds 3 -> 0; vertex 2: as X adds 0, as Y adds 1 -> 0
        assert_eq!(lb, 0);
    }

    #[test]
    fn incremental_bound_matches_reference() {
        let g = triangle();
        let index = IncidenceIndex::new(&g);
        for raw in [[1, -1, -1], [0, -1, -1], [1, 0, -1], [0, 1, -1], [-1, -1, -1]] {
            let mut c = labels(&raw);
            let first = c.first_undecided();
            let decided = cut_weight(&c, &g);
            let fast = index.lower_bound(&c, first);
            assert_eq!(fast, lower_bound_of_remainder(&mut c, first, decided, &g), "{c}");
        }
    }

    #[test]
    fn placement_cost_tracks_cut_weight() {
        let g = Graph::from_edges(3, [(0, 1, 2), (1, 0, 2), (2, 2, 9), (0, 2, 4)]).unwrap();
        let index = IncidenceIndex::new(&g);
        let mut c = labels(&[1, 0, -1]);
        let base = cut_weight(&c, &g);
        for label in [Label::InX, Label::InY] {
            let cost = index.placement_cost(&c, 2, label);
            c.set(2, label);
            assert_eq!(base + cost, cut_weight(&c, &g));
            c.set(2, Label::Undecided);
        }
    }
}
