//! Thin façade over intra-process or inter-process (MPI) message passing.
//!
//! Messages are tagged byte payloads exchanged point to point. Receives block
//! until a matching message arrives; messages from one sender to one receiver
//! are delivered in the order they were sent. There are no timeouts: a peer
//! that never answers stalls its receiver.

use crate::bisect_error::BisectError;
use bytes::Bytes;
use parking_lot::{Condvar, Mutex};
use std::collections::VecDeque;
use std::sync::Arc;

/// Which sender a receive will accept.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Source {
    Any,
    Rank(usize),
}

impl Source {
    #[inline]
    fn matches(self, rank: usize) -> bool {
        match self {
            Source::Any => true,
            Source::Rank(r) => r == rank,
        }
    }
}

/// A received message.
#[derive(Clone, Debug)]
pub struct Envelope {
    pub source: usize,
    pub tag: u16,
    pub payload: Bytes,
}

/// Blocking point-to-point interface.
pub trait Communicator {
    fn rank(&self) -> usize;
    fn size(&self) -> usize;
    fn send(&self, peer: usize, tag: u16, buf: &[u8]) -> Result<(), BisectError>;
    fn recv(&self, source: Source) -> Result<Envelope, BisectError>;
}

/// Single-rank group for pure serial runs.
#[derive(Clone, Debug, Default)]
pub struct NoComm;

impl Communicator for NoComm {
    fn rank(&self) -> usize {
        0
    }
    fn size(&self) -> usize {
        1
    }
    fn send(&self, _peer: usize, _tag: u16, _buf: &[u8]) -> Result<(), BisectError> {
        Err(BisectError::EmptyGroup)
    }
    fn recv(&self, _source: Source) -> Result<Envelope, BisectError> {
        Err(BisectError::EmptyGroup)
    }
}

// --- RayonComm: intra-process / multi-thread ---

#[derive(Debug, Default)]
struct Mailbox {
    queue: Mutex<VecDeque<Envelope>>,
    ready: Condvar,
}

/// One endpoint of an in-process group; ranks usually run on separate threads.
#[derive(Clone, Debug)]
pub struct RayonComm {
    rank: usize,
    mailboxes: Arc<Vec<Mailbox>>,
}

impl RayonComm {
    /// Creates all `size` endpoints of a fresh group, indexed by rank.
    pub fn group(size: usize) -> Vec<RayonComm> {
        let mailboxes: Arc<Vec<Mailbox>> =
            Arc::new((0..size).map(|_| Mailbox::default()).collect());
        (0..size)
            .map(|rank| RayonComm {
                rank,
                mailboxes: Arc::clone(&mailboxes),
            })
            .collect()
    }
}

impl Communicator for RayonComm {
    fn rank(&self) -> usize {
        self.rank
    }

    fn size(&self) -> usize {
        self.mailboxes.len()
    }

    fn send(&self, peer: usize, tag: u16, buf: &[u8]) -> Result<(), BisectError> {
        let mailbox = self.mailboxes.get(peer).ok_or(BisectError::NoSuchRank {
            rank: peer,
            size: self.size(),
        })?;
        mailbox.queue.lock().push_back(Envelope {
            source: self.rank,
            tag,
            payload: Bytes::copy_from_slice(buf),
        });
        mailbox.ready.notify_all();
        Ok(())
    }

    fn recv(&self, source: Source) -> Result<Envelope, BisectError> {
        if let Source::Rank(r) = source {
            if r >= self.size() {
                return Err(BisectError::NoSuchRank { rank: r, size: self.size() });
            }
        }
        let mailbox = &self.mailboxes[self.rank];
        let mut queue = mailbox.queue.lock();
        loop {
            // first match keeps per-sender FIFO order
            if let Some(pos) = queue.iter().position(|e| source.matches(e.source)) {
                if let Some(env) = queue.remove(pos) {
                    return Ok(env);
                }
            }
            mailbox.ready.wait(&mut queue);
        }
    }
}

// --- MPI backend (feature = "mpi-support") ---
#[cfg(feature = "mpi-support")]
mod mpi_backend {
    use super::*;
    use mpi::point_to_point::{Destination, Source as MpiSource};
    use mpi::topology::{Communicator as MpiCommunicator, SimpleCommunicator};

    /// Wraps an MPI communicator. The owning `Universe` must outlive it.
    pub struct MpiComm {
        pub world: SimpleCommunicator,
        pub rank: usize,
        size: usize,
    }

    impl MpiComm {
        pub fn new(world: SimpleCommunicator) -> Self {
            let rank = world.rank() as usize;
            let size = world.size() as usize;
            Self { world, rank, size }
        }
    }

    impl Communicator for MpiComm {
        fn rank(&self) -> usize {
            self.rank
        }

        fn size(&self) -> usize {
            self.size
        }

        fn send(&self, peer: usize, tag: u16, buf: &[u8]) -> Result<(), BisectError> {
            if peer >= self.size {
                return Err(BisectError::NoSuchRank { rank: peer, size: self.size });
            }
            self.world
                .process_at_rank(peer as i32)
                .send_with_tag(buf, i32::from(tag));
            Ok(())
        }

        fn recv(&self, source: Source) -> Result<Envelope, BisectError> {
            let (data, status) = match source {
                Source::Any => self.world.any_process().receive_vec::<u8>(),
                Source::Rank(r) if r < self.size => {
                    self.world.process_at_rank(r as i32).receive_vec::<u8>()
                }
                Source::Rank(r) => return Err(BisectError::NoSuchRank { rank: r, size: self.size }),
            };
            let tag = u16::try_from(status.tag()).map_err(|_| BisectError::UnknownTag(u16::MAX))?;
            Ok(Envelope {
                source: status.source_rank() as usize,
                tag,
                payload: Bytes::from(data),
            })
        }
    }
}

#[cfg(feature = "mpi-support")]
pub use mpi_backend::MpiComm;
