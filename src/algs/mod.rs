//! Re-export public algorithms.

pub mod assignment;
pub mod best;
pub mod bounds;
pub mod branch_bound;
pub mod communicator;
pub mod distributed;
pub mod scheduler;
pub mod task_pool;
pub mod wire;

pub use branch_bound::{brute_force, search_sequential};
pub use distributed::search_distributed;
pub use scheduler::search;
