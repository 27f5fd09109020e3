//! Best-known solution shared between search threads.
//!
//! [`SharedBest`] keeps two things apart:
//! - the prune *bound*, an atomic that any thread may read without locking and
//!   that may also be tightened with a weight found elsewhere (for example a
//!   bound forwarded by the distributed master), and
//! - the *found* solution, a `(weight, configuration)` pair recorded by this
//!   cell itself and only ever replaced under the mutex.
//!
//! A reader may see a stale bound; that only costs pruning opportunities,
//! since every writer re-checks inside the critical section.

use super::assignment::{Configuration, Label};
use crate::graph::{INFINITE_WEIGHT, VertexId, Weight};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicI64, Ordering};

/// Final answer of a search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bisection {
    /// Minimal cut weight, or [`INFINITE_WEIGHT`] when no balanced assignment exists.
    pub weight: Weight,
    /// An assignment achieving `weight`; `None` when infeasible.
    pub config: Option<Configuration>,
}

impl Bisection {
    pub fn infeasible() -> Self {
        Self {
            weight: INFINITE_WEIGHT,
            config: None,
        }
    }

    #[inline]
    pub fn is_feasible(&self) -> bool {
        self.config.is_some()
    }

    pub fn x_vertices(&self) -> Vec<VertexId> {
        self.config
            .as_ref()
            .map_or_else(Vec::new, |c| c.vertices_with(Label::InX))
    }

    pub fn y_vertices(&self) -> Vec<VertexId> {
        self.config
            .as_ref()
            .map_or_else(Vec::new, |c| c.vertices_with(Label::InY))
    }

    /// Keeps whichever of `self` and `other` has the strictly lower weight.
    pub fn fold(&mut self, other: Bisection) {
        if other.weight < self.weight && other.config.is_some() {
            *self = other;
        }
    }
}

/// Compare-and-replace cell for the best complete solution.
#[derive(Debug)]
pub struct SharedBest {
    bound: AtomicI64,
    found: Mutex<Option<(Weight, Configuration)>>,
}

impl Default for SharedBest {
    fn default() -> Self {
        Self::new()
    }
}

impl SharedBest {
    pub fn new() -> Self {
        Self {
            bound: AtomicI64::new(INFINITE_WEIGHT),
            found: Mutex::new(None),
        }
    }

    /// Current prune bound. May lag behind a concurrent update.
    #[inline]
    pub fn bound(&self) -> Weight {
        self.bound.load(Ordering::Acquire)
    }

    /// Lowers the prune bound without recording a solution.
    pub fn tighten(&self, bound: Weight) {
        self.bound.fetch_min(bound, Ordering::AcqRel);
    }

    /// Records `config` if `weight` beats the current bound. Returns whether it did.
    pub fn offer(&self, weight: Weight, config: &Configuration) -> bool {
        if weight >= self.bound() {
            return false;
        }
        let mut found = self.found.lock();
        // another writer may have won while we were waiting
        if weight >= self.bound() {
            return false;
        }
        match found.as_mut() {
            Some((w, c)) if c.len() == config.len() => {
                *w = weight;
                c.labels_mut().copy_from_slice(config.labels());
            }
            _ => *found = Some((weight, config.clone())),
        }
        self.bound.fetch_min(weight, Ordering::AcqRel);
        log::debug!("new best weight {weight}");
        true
    }

    /// Weight of the solution recorded by this cell, ignoring tightened bounds.
    pub fn found_weight(&self) -> Weight {
        self.found.lock().as_ref().map_or(INFINITE_WEIGHT, |(w, _)| *w)
    }

    /// Snapshot of the recorded solution.
    pub fn snapshot(&self) -> Bisection {
        match self.found.lock().as_ref() {
            Some((w, c)) => Bisection {
                weight: *w,
                config: Some(c.clone()),
            },
            None => Bisection::infeasible(),
        }
    }

    pub fn into_bisection(self) -> Bisection {
        match self.found.into_inner() {
            Some((weight, config)) => Bisection {
                weight,
                config: Some(config),
            },
            None => Bisection::infeasible(),
        }
    }
}
