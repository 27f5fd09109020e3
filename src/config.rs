//! Search tuning knobs.

use crate::bisect_error::BisectError;
use serde::{Deserialize, Serialize};

/// How the shared-memory layer explores the decision tree.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Single-threaded depth-first search.
    Sequential,
    /// Pre-generated task pool drained by a fixed set of worker threads.
    #[default]
    FlatDynamic,
    /// Recursive fork/join with a sequential cutoff.
    ForkJoin,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Worker threads; 0 lets rayon pick.
    pub threads: usize,
    pub strategy: Strategy,
    /// Prefix depth of the flat task pool.
    pub task_depth: usize,
    /// Remaining undecided vertices at or below which fork/join stops splitting.
    pub fork_cutoff: usize,
    /// Prefix depth of the master's pool in the distributed coordinator.
    pub master_depth: usize,
    /// Prefix depth each worker expands a received task to.
    pub worker_depth: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            threads: 0,
            strategy: Strategy::FlatDynamic,
            task_depth: 8,
            fork_cutoff: 3,
            master_depth: 4,
            worker_depth: 8,
        }
    }
}

impl SearchConfig {
    pub fn validate(&self) -> Result<(), BisectError> {
        if self.worker_depth < self.master_depth {
            return Err(BisectError::InvalidConfig(format!(
                "worker_depth ({}) must not be below master_depth ({})",
                self.worker_depth, self.master_depth
            )));
        }
        Ok(())
    }

    /// Builds the rayon pool the shared-memory strategies run in.
    pub fn thread_pool(&self) -> Result<rayon::ThreadPool, BisectError> {
        Ok(rayon::ThreadPoolBuilder::new()
            .num_threads(self.threads)
            .thread_name(|i| format!("bisect-worker-{i}"))
            .build()?)
    }
}
