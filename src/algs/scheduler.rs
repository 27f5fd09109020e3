//! Shared-memory execution of the branch-and-bound search.
//!
//! Two parallel strategies share one [`SharedBest`]:
//! - **flat dynamic dispatch**: a [`TaskPool`] is generated up front and every
//!   thread of the rayon pool keeps claiming the next task until it is empty;
//! - **fork/join**: every branch point above the cutoff becomes a
//!   `rayon::join` over two owned clones of the configuration.
//!
//! [`Strategy::Sequential`] walks the same task list on the calling thread.

use super::assignment::{Configuration, Label};
use super::best::{Bisection, SharedBest};
use super::bounds::IncidenceIndex;
use super::branch_bound::{BranchAndBound, Frontier, Visit};
use super::task_pool::TaskPool;
use crate::bisect_error::BisectError;
use crate::config::{SearchConfig, Strategy};
use crate::graph::Graph;

/// Finds a minimum-weight split with exactly `target` vertices in X.
///
/// An infeasible `target` (larger than the vertex count) is not an error: the
/// result is [`Bisection::infeasible`].
pub fn search(graph: &Graph, target: usize, cfg: &SearchConfig) -> Result<Bisection, BisectError> {
    log::info!(
        "search: {} vertices, {} edges, |X| = {target}, {:?}",
        graph.vertex_count(),
        graph.edge_count(),
        cfg.strategy
    );
    if target > graph.vertex_count() {
        log::warn!(
            "target {target} exceeds vertex count {}; no split exists",
            graph.vertex_count()
        );
        return Ok(Bisection::infeasible());
    }

    let threads = cfg.thread_pool()?;
    let index = IncidenceIndex::new(graph);
    let best = SharedBest::new();
    let engine = BranchAndBound::new(graph, &index, &best, target);
    let root = Configuration::undecided(graph.vertex_count());
    solve_subproblem(&engine, &root, cfg.task_depth, cfg, &threads);

    let result = best.into_bisection();
    log::info!("search finished: best weight {}", result.weight);
    Ok(result)
}

/// Solves every completion of `root` with the configured strategy.
///
/// `depth` is the absolute prefix depth tasks are generated to; fork/join
/// ignores it and splits the tree itself.
pub fn solve_subproblem(
    engine: &BranchAndBound<'_>,
    root: &Configuration,
    depth: usize,
    cfg: &SearchConfig,
    threads: &rayon::ThreadPool,
) {
    match cfg.strategy {
        Strategy::Sequential => {
            let pool = TaskPool::expand(root, depth);
            while let Some(mut task) = pool.claim() {
                engine.run_task(&mut task);
            }
        }
        Strategy::FlatDynamic => {
            let pool = TaskPool::expand(root, depth);
            drain_pool(engine, &pool, threads);
        }
        Strategy::ForkJoin => {
            let node = Frontier::of(root, engine.graph());
            threads.install(|| fork_join(engine, root.clone(), node, cfg.fork_cutoff));
        }
    }
}

/// Every pool thread claims tasks until the pool is exhausted.
pub fn drain_pool(engine: &BranchAndBound<'_>, pool: &TaskPool, threads: &rayon::ThreadPool) {
    let workers = threads.current_num_threads();
    threads.scope(|s| {
        for _ in 0..workers {
            s.spawn(|_| {
                while let Some(mut task) = pool.claim() {
                    engine.run_task(&mut task);
                }
            });
        }
    });
}

/// Splits the tree with `rayon::join` until at most `cutoff` vertices remain undecided.
pub fn fork_join(
    engine: &BranchAndBound<'_>,
    mut config: Configuration,
    node: Frontier,
    cutoff: usize,
) {
    if config.len() - node.first_undecided <= cutoff {
        engine.explore(&mut config, node);
        return;
    }
    let Visit::Branch(v) = engine.visit(&config, node) else {
        return;
    };
    let mut right = config.clone();
    let left_node = engine.descend(&mut config, node, v, Label::InX);
    let right_node = engine.descend(&mut right, node, v, Label::InY);
    rayon::join(
        || fork_join(engine, config, left_node, cutoff),
        || fork_join(engine, right, right_node, cutoff),
    );
}
