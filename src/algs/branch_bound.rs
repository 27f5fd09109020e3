//! Depth-first branch-and-bound over vertex assignments.
//!
//! Every frame decides the first undecided vertex, trying X before Y. A frame
//! is abandoned when
//! 1. the decided prefix already has too many vertices on either side,
//! 2. its cut weight exceeds the best known weight, or
//! 3. cut weight plus [`IncidenceIndex::lower_bound`] exceeds it.
//!
//! A complete assignment with exactly `target` vertices in X and a strictly
//! lower weight replaces the best result.
//!
//! The sequential walk reuses one buffer: [`BranchAndBound::explore`] leaves
//! the configuration exactly as it received it.

use super::assignment::{Configuration, Label};
use super::best::{Bisection, SharedBest};
use super::bounds::{IncidenceIndex, count_assigned, cut_weight};
use crate::graph::{Graph, VertexId, Weight};
use itertools::Itertools;

/// Summary of a partial assignment carried down the recursion.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Frontier {
    pub first_undecided: usize,
    pub count_x: usize,
    /// Cut weight of the decided prefix.
    pub weight: Weight,
}

impl Frontier {
    /// Recomputes the summary of `config` from scratch.
    pub fn of(config: &Configuration, graph: &Graph) -> Self {
        let (count_x, count_y) = count_assigned(config);
        Self {
            first_undecided: count_x + count_y,
            count_x,
            weight: cut_weight(config, graph),
        }
    }

    #[inline]
    pub fn count_y(&self) -> usize {
        self.first_undecided - self.count_x
    }

    #[inline]
    fn child(&self, label: Label, cost: Weight) -> Self {
        Self {
            first_undecided: self.first_undecided + 1,
            count_x: self.count_x + usize::from(label == Label::InX),
            weight: self.weight + cost,
        }
    }
}

/// Outcome of inspecting one frame.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Visit {
    /// Nothing below this frame can beat the best result.
    Pruned,
    /// Complete assignment; already offered to the best result.
    Leaf,
    /// Both children of this vertex must be explored.
    Branch(VertexId),
}

/// Search context shared by every frame, thread, and task of one run.
#[derive(Clone, Copy)]
pub struct BranchAndBound<'a> {
    graph: &'a Graph,
    index: &'a IncidenceIndex,
    best: &'a SharedBest,
    target: usize,
    max_y: Option<usize>,
}

impl<'a> BranchAndBound<'a> {
    pub fn new(
        graph: &'a Graph,
        index: &'a IncidenceIndex,
        best: &'a SharedBest,
        target: usize,
    ) -> Self {
        Self {
            graph,
            index,
            best,
            target,
            max_y: graph.vertex_count().checked_sub(target),
        }
    }

    #[inline]
    pub fn graph(&self) -> &'a Graph {
        self.graph
    }

    #[inline]
    pub fn best(&self) -> &'a SharedBest {
        self.best
    }

    /// Applies the three prunes and the terminal check to one frame.
    pub fn visit(&self, config: &Configuration, node: Frontier) -> Visit {
        let Some(max_y) = self.max_y else {
            return Visit::Pruned;
        };
        if node.count_x > self.target || node.count_y() > max_y {
            return Visit::Pruned;
        }

        let bound = self.best.bound();
        if node.weight > bound {
            return Visit::Pruned;
        }
        let estimate = self.index.lower_bound(config, node.first_undecided);
        if node.weight.saturating_add(estimate) > bound {
            return Visit::Pruned;
        }

        if node.first_undecided == config.len() {
            if node.count_x == self.target {
                self.best.offer(node.weight, config);
            }
            return Visit::Leaf;
        }
        Visit::Branch(node.first_undecided)
    }

    /// Labels the undecided vertex `v` and returns the child frame.
    #[inline]
    pub fn descend(
        &self,
        config: &mut Configuration,
        node: Frontier,
        v: VertexId,
        label: Label,
    ) -> Frontier {
        let cost = self.index.placement_cost(config, v, label);
        config.set(v, label);
        node.child(label, cost)
    }

    /// Sequential exploration below `node`, restoring `config` on return.
    pub fn explore(&self, config: &mut Configuration, node: Frontier) {
        let Visit::Branch(v) = self.visit(config, node) else {
            return;
        };
        for label in [Label::InX, Label::InY] {
            let child = self.descend(config, node, v, label);
            self.explore(config, child);
            config.set(v, Label::Undecided);
        }
    }

    /// Explores a task whose decided prefix was produced elsewhere.
    pub fn run_task(&self, task: &mut Configuration) {
        let node = Frontier::of(task, self.graph);
        log::trace!("task {task}: prefix {} weight {}", node.first_undecided, node.weight);
        self.explore(task, node);
    }
}

/// Single-threaded search from the empty assignment.
pub fn search_sequential(graph: &Graph, target: usize) -> Bisection {
    let index = IncidenceIndex::new(graph);
    let best = SharedBest::new();
    let engine = BranchAndBound::new(graph, &index, &best, target);
    let mut config = Configuration::undecided(graph.vertex_count());
    let root = Frontier::of(&config, graph);
    engine.explore(&mut config, root);
    best.into_bisection()
}

/// Exhaustive reference: evaluates every `target`-subset of the vertices.
///
/// Exponential in the vertex count; meant for checking the search on small graphs.
pub fn brute_force(graph: &Graph, target: usize) -> Bisection {
    let n = graph.vertex_count();
    let mut best = Bisection::infeasible();
    if target > n {
        return best;
    }
    let mut config = Configuration::undecided(n);
    for xs in (0..n).combinations(target) {
        config.labels_mut().fill(Label::InY);
        for v in xs {
            config.set(v, Label::InX);
        }
        let weight = cut_weight(&config, graph);
        if weight < best.weight {
            best = Bisection {
                weight,
                config: Some(config.clone()),
            };
        }
    }
    best
}
