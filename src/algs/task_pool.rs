//! Explicit frontier of partial assignments.
//!
//! [`generate_tasks`] enumerates every X/Y combination of the vertices between
//! a root's decided prefix and a fixed depth, without pruning. [`TaskPool`]
//! hands those tasks out to concurrent consumers, each exactly once.

use super::assignment::{Configuration, Label};
use parking_lot::Mutex;
use std::collections::VecDeque;

/// All completions of `root` over positions `root.first_undecided()..depth`.
///
/// `depth` is an absolute prefix length, clamped to `root.len()`. A depth at
/// or below the root's prefix yields the root alone. Tasks come out in
/// X-before-Y order.
pub fn generate_tasks(root: &Configuration, depth: usize) -> Vec<Configuration> {
    let first = root.first_undecided();
    if depth > root.len() {
        log::warn!("task depth {depth} clamped to vertex count {}", root.len());
    }
    let depth = depth.clamp(first, root.len());

    let mut out = Vec::with_capacity(1usize << (depth - first).min(24));
    let mut scratch = root.clone();
    fill(&mut scratch, first, depth, &mut out);
    out
}

fn fill(config: &mut Configuration, pos: usize, depth: usize, out: &mut Vec<Configuration>) {
    if pos == depth {
        out.push(config.clone());
        return;
    }
    for label in [Label::InX, Label::InY] {
        config.set(pos, label);
        fill(config, pos + 1, depth, out);
    }
    config.set(pos, Label::Undecided);
}

/// Thread-safe, destructively consumed queue of tasks.
#[derive(Debug, Default)]
pub struct TaskPool {
    tasks: Mutex<VecDeque<Configuration>>,
}

impl TaskPool {
    pub fn from_tasks(tasks: Vec<Configuration>) -> Self {
        Self {
            tasks: Mutex::new(tasks.into()),
        }
    }

    /// Pool over the first `depth` vertices of an empty assignment.
    pub fn generate(vertex_count: usize, depth: usize) -> Self {
        Self::expand(&Configuration::undecided(vertex_count), depth)
    }

    /// Pool over a received task's sub-problem, down to absolute `depth`.
    pub fn expand(root: &Configuration, depth: usize) -> Self {
        let pool = Self::from_tasks(generate_tasks(root, depth));
        log::debug!("task pool of {} tasks at depth {depth}", pool.len());
        pool
    }

    /// Removes and returns the next task. No task is ever handed out twice.
    pub fn claim(&self) -> Option<Configuration> {
        self.tasks.lock().pop_front()
    }

    pub fn len(&self) -> usize {
        self.tasks.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.lock().is_empty()
    }

    pub fn into_tasks(self) -> Vec<Configuration> {
        self.tasks.into_inner().into()
    }
}
