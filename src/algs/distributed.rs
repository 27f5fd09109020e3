//! Master/worker branch-and-bound over a [`Communicator`] group.
//!
//! Rank 0 is the master; every other rank is a worker.
//!
//! - The master generates a shallow [`TaskPool`] (`master_depth`) and sends one
//!   WORK task to each worker.
//! - A worker expands its task to `worker_depth`, solves the local pool with the
//!   shared-memory scheduler and answers DONE with its local best weight.
//! - For every DONE the master hands out the next task, or, once the pool is
//!   empty, sends TERMINATE and waits for that worker's RESULT.
//! - RESULTs are folded with a strict-minimum rule, so the outcome does not
//!   depend on arrival order.
//!
//! WORK records carry the smallest weight reported so far, letting workers
//! prune against solutions found elsewhere in the group.

use super::assignment::Configuration;
use super::best::{Bisection, SharedBest};
use super::bounds::IncidenceIndex;
use super::branch_bound::BranchAndBound;
use super::communicator::{Communicator, Source};
use super::scheduler::solve_subproblem;
use super::task_pool::TaskPool;
use super::wire::Message;
use crate::bisect_error::BisectError;
use crate::config::SearchConfig;
use crate::graph::{Graph, INFINITE_WEIGHT, Weight};

/// Runs the distributed search on this rank.
///
/// Every rank of `comm` must call this with the same graph, target and
/// configuration. Rank 0 returns the global optimum; workers return their own
/// local best.
pub fn search_distributed<C: Communicator>(
    comm: &C,
    graph: &Graph,
    target: usize,
    cfg: &SearchConfig,
) -> Result<Bisection, BisectError> {
    cfg.validate()?;
    if comm.size() == 0 {
        return Err(BisectError::EmptyGroup);
    }
    if target > graph.vertex_count() {
        log::warn!(
            "target {target} exceeds vertex count {}; no split exists",
            graph.vertex_count()
        );
    }
    let threads = cfg.thread_pool()?;
    let index = IncidenceIndex::new(graph);
    let best = SharedBest::new();
    let engine = BranchAndBound::new(graph, &index, &best, target);

    if comm.rank() == 0 {
        run_master(comm, &engine, cfg, &threads)
    } else {
        run_worker(comm, &engine, cfg, &threads)
    }
}

fn send<C: Communicator>(
    comm: &C,
    peer: usize,
    msg: &Message,
    vertex_count: usize,
) -> Result<(), BisectError> {
    let (tag, payload) = msg.encode(vertex_count)?;
    comm.send(peer, tag, &payload)
}

fn receive<C: Communicator>(
    comm: &C,
    source: Source,
    vertex_count: usize,
) -> Result<(usize, Message), BisectError> {
    let env = comm.recv(source)?;
    let msg = Message::decode(env.tag, &env.payload, vertex_count)?;
    Ok((env.source, msg))
}

fn run_master<C: Communicator>(
    comm: &C,
    engine: &BranchAndBound<'_>,
    cfg: &SearchConfig,
    threads: &rayon::ThreadPool,
) -> Result<Bisection, BisectError> {
    let n = engine.graph().vertex_count();
    let workers = comm.size() - 1;
    log::info!("master: {workers} workers, {n} vertices, master depth {}", cfg.master_depth);

    if workers == 0 {
        let root = Configuration::undecided(n);
        solve_subproblem(engine, &root, cfg.worker_depth, cfg, threads);
        return Ok(engine.best().snapshot());
    }

    let pool = TaskPool::generate(n, cfg.master_depth);
    let mut result = Bisection::infeasible();
    let mut upper_bound: Weight = INFINITE_WEIGHT;
    let mut active = 0usize;

    for worker in 1..=workers {
        match pool.claim() {
            Some(task) => {
                send(comm, worker, &Message::Work { bound: upper_bound, task }, n)?;
                active += 1;
            }
            None => terminate_and_collect(comm, worker, n, &mut result)?,
        }
    }

    while active > 0 {
        let worker = match receive(comm, Source::Any, n)? {
            (worker, Message::Done { weight }) => {
                upper_bound = upper_bound.min(weight);
                worker
            }
            (from, other) => return Err(BisectError::UnexpectedMessage { from, tag: other.tag() }),
        };

        match pool.claim() {
            Some(task) => {
                log::debug!("master: task -> worker {worker}, {} left", pool.len());
                send(comm, worker, &Message::Work { bound: upper_bound, task }, n)?;
            }
            None => {
                terminate_and_collect(comm, worker, n, &mut result)?;
                active -= 1;
            }
        }
    }

    log::info!("master: global best weight {}", result.weight);
    Ok(result)
}

fn terminate_and_collect<C: Communicator>(
    comm: &C,
    worker: usize,
    vertex_count: usize,
    result: &mut Bisection,
) -> Result<(), BisectError> {
    log::debug!("master: terminating worker {worker}");
    send(comm, worker, &Message::Terminate, vertex_count)?;
    match receive(comm, Source::Rank(worker), vertex_count)? {
        (_, Message::Result { weight, config }) => {
            result.fold(Bisection { weight, config });
            Ok(())
        }
        (from, other) => Err(BisectError::UnexpectedMessage { from, tag: other.tag() }),
    }
}

fn run_worker<C: Communicator>(
    comm: &C,
    engine: &BranchAndBound<'_>,
    cfg: &SearchConfig,
    threads: &rayon::ThreadPool,
) -> Result<Bisection, BisectError> {
    let n = engine.graph().vertex_count();
    let best = engine.best();
    loop {
        match receive(comm, Source::Rank(0), n)? {
            (_, Message::Work { bound, task }) => {
                log::trace!("worker {}: task {task}, bound {bound}", comm.rank());
                best.tighten(bound);
                solve_subproblem(engine, &task, cfg.worker_depth, cfg, threads);
                send(comm, 0, &Message::Done { weight: best.found_weight() }, n)?;
            }
            (_, Message::Terminate) => {
                let local = best.snapshot();
                let reply = Message::Result {
                    weight: local.weight,
                    config: local.config.clone(),
                };
                send(comm, 0, &reply, n)?;
                return Ok(local);
            }
            (from, other) => return Err(BisectError::UnexpectedMessage { from, tag: other.tag() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algs::branch_bound::brute_force;
    use crate::algs::communicator::{NoComm, RayonComm};
    use crate::algs::wire::tags;

    fn cycle(n: usize) -> Graph {
        let mut g = Graph::new(n);
        for v in 0..n {
            let w = 1 + (v as i64 * 7) % 5;
            g.add_edge(v, (v + 1) % n, w).unwrap();
            g.add_edge((v + 1) % n, v, w).unwrap();
        }
        g
    }

    fn run_group(size: usize, graph: &Graph, target: usize, cfg: &SearchConfig) -> Vec<Bisection> {
        let comms = RayonComm::group(size);
        std::thread::scope(|s| {
            let handles: Vec<_> = comms
                .iter()
                .map(|comm| s.spawn(move || search_distributed(comm, graph, target, cfg).unwrap()))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        })
    }

    #[test]
    fn master_alone_solves_locally() {
        let g = cycle(8);
        let got = search_distributed(&NoComm, &g, 4, &SearchConfig::default()).unwrap();
        assert_eq!(got.weight, brute_force(&g, 4).weight);
    }

    #[test]
    fn group_matches_brute_force() {
        let g = cycle(9);
        let cfg = SearchConfig {
            threads: 2,
            master_depth: 3,
            worker_depth: 5,
            ..Default::default()
        };
        for target in [2, 4] {
            let results = run_group(3, &g, target, &cfg);
            assert_eq!(results[0].weight, brute_force(&g, target).weight);
            for worker in &results[1..] {
                assert!(worker.weight >= results[0].weight);
            }
        }
    }

    #[test]
    fn more_workers_than_tasks() {
        let g = cycle(6);
        let cfg = SearchConfig {
            threads: 1,
            master_depth: 1,
            worker_depth: 3,
            ..Default::default()
        };
        let results = run_group(5, &g, 3, &cfg);
        assert_eq!(results[0].weight, brute_force(&g, 3).weight);
    }

    #[test]
    fn worker_rejects_unexpected_message() {
        let g = cycle(4);
        let comms = RayonComm::group(2);
        let (tag, payload) = Message::Done { weight: 1 }.encode(4).unwrap();
        comms[0].send(1, tag, &payload).unwrap();
        let err = search_distributed(&comms[1], &g, 2, &SearchConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            BisectError::UnexpectedMessage { from: 0, tag: tags::DONE }
        ));
    }
}
