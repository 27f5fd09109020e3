//! Fixed, little-endian wire layout for the master/worker protocol.
//!
//! Every message except TERMINATE carries one record:
//!
//! ```text
//! offset 0            8                    8 + V
//!        | weight i64 LE | V × label i8 |
//! ```
//!
//! Labels use `IN_X = 1`, `IN_Y = 0`, `UNDECIDED = -1`. TERMINATE has an empty
//! payload; its meaning is carried entirely by its tag.

use super::assignment::{Configuration, Label};
use crate::bisect_error::BisectError;
use crate::graph::{INFINITE_WEIGHT, Weight};
use bytemuck::{Pod, Zeroable};
use static_assertions::const_assert_eq;
use std::mem::size_of;

/// Message tags on the wire.
pub mod tags {
    pub const WORK: u16 = 1;
    pub const DONE: u16 = 2;
    pub const TERMINATE: u16 = 3;
    pub const RESULT: u16 = 4;
}

pub fn expect_exact_len(actual: usize, expected: usize) -> Result<(), BisectError> {
    if actual == expected {
        Ok(())
    } else {
        Err(BisectError::WireLength { expected, actual })
    }
}

/// Leading weight field of every record.
#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
pub struct WireWeight {
    pub weight_le: i64,
}

impl WireWeight {
    pub fn of(weight: Weight) -> Self {
        Self {
            weight_le: weight.to_le(),
        }
    }
    pub fn get(&self) -> Weight {
        i64::from_le(self.weight_le)
    }
}

const_assert_eq!(size_of::<WireWeight>(), 8);

/// Byte length of a record for a graph with `vertex_count` vertices.
#[inline]
pub const fn record_len(vertex_count: usize) -> usize {
    size_of::<WireWeight>() + vertex_count
}

/// One protocol message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Message {
    /// Master -> worker: solve this sub-problem. `bound` is the master's best known weight.
    Work { bound: Weight, task: Configuration },
    /// Worker -> master: the last task is finished; `weight` is the worker's local best.
    Done { weight: Weight },
    /// Master -> worker: no more work, report your result.
    Terminate,
    /// Worker -> master: final local best. `config` is `None` when nothing was found.
    Result {
        weight: Weight,
        config: Option<Configuration>,
    },
}

impl Message {
    pub fn tag(&self) -> u16 {
        match self {
            Message::Work { .. } => tags::WORK,
            Message::Done { .. } => tags::DONE,
            Message::Terminate => tags::TERMINATE,
            Message::Result { .. } => tags::RESULT,
        }
    }

    /// Serialises to `(tag, payload)` for a graph with `vertex_count` vertices.
    pub fn encode(&self, vertex_count: usize) -> Result<(u16, Vec<u8>), BisectError> {
        let payload = match self {
            Message::Terminate => Vec::new(),
            Message::Work { bound, task } => encode_record(*bound, Some(task), vertex_count)?,
            Message::Done { weight } => encode_record(*weight, None, vertex_count)?,
            Message::Result { weight, config } => {
                encode_record(*weight, config.as_ref(), vertex_count)?
            }
        };
        Ok((self.tag(), payload))
    }

    pub fn decode(tag: u16, payload: &[u8], vertex_count: usize) -> Result<Self, BisectError> {
        match tag {
            tags::TERMINATE => {
                expect_exact_len(payload.len(), 0)?;
                Ok(Message::Terminate)
            }
            tags::WORK => {
                let (bound, task) = decode_record(payload, vertex_count)?;
                Ok(Message::Work { bound, task })
            }
            tags::DONE => {
                let (weight, _) = decode_record(payload, vertex_count)?;
                Ok(Message::Done { weight })
            }
            tags::RESULT => {
                let (weight, config) = decode_record(payload, vertex_count)?;
                let config = (weight != INFINITE_WEIGHT).then_some(config);
                Ok(Message::Result { weight, config })
            }
            other => Err(BisectError::UnknownTag(other)),
        }
    }
}

fn encode_record(
    weight: Weight,
    config: Option<&Configuration>,
    vertex_count: usize,
) -> Result<Vec<u8>, BisectError> {
    let mut buf = Vec::with_capacity(record_len(vertex_count));
    buf.extend_from_slice(bytemuck::bytes_of(&WireWeight::of(weight)));
    match config {
        Some(c) => {
            if c.len() != vertex_count {
                return Err(BisectError::ConfigLength {
                    expected: vertex_count,
                    actual: c.len(),
                });
            }
            let labels: Vec<i8> = c.labels().iter().map(|l| l.to_wire()).collect();
            buf.extend_from_slice(bytemuck::cast_slice(&labels));
        }
        None => buf.resize(record_len(vertex_count), Label::Undecided.to_wire() as u8),
    }
    Ok(buf)
}

fn decode_record(
    payload: &[u8],
    vertex_count: usize,
) -> Result<(Weight, Configuration), BisectError> {
    expect_exact_len(payload.len(), record_len(vertex_count))?;
    let (head, body) = payload.split_at(size_of::<WireWeight>());
    let weight = bytemuck::pod_read_unaligned::<WireWeight>(head).get();
    let labels = bytemuck::cast_slice::<u8, i8>(body)
        .iter()
        .map(|&raw| Label::from_wire(raw))
        .collect::<Result<Vec<_>, _>>()?;
    let config = Configuration::from_labels(labels);
    if let Some(position) = config.scattered_label() {
        return Err(BisectError::ScatteredLabels { position });
    }
    Ok((weight, config))
}
