//! Tri-state vertex labels and the per-vertex assignment buffer.
//!
//! A [`Configuration`] holds one [`Label`] per vertex. Decisions are made in
//! vertex-id order, so every configuration is a decided prefix followed by an
//! undecided suffix; scans may stop at the first [`Label::Undecided`].

use crate::bisect_error::BisectError;
use crate::graph::VertexId;
use itertools::Itertools;
use std::fmt;

/// Side of the bisection a vertex has been placed on.
#[repr(i8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Label {
    InY = 0,
    InX = 1,
    Undecided = -1,
}

impl Label {
    #[inline]
    pub fn to_wire(self) -> i8 {
        self as i8
    }

    pub fn from_wire(raw: i8) -> Result<Self, BisectError> {
        match raw {
            0 => Ok(Label::InY),
            1 => Ok(Label::InX),
            -1 => Ok(Label::Undecided),
            other => Err(BisectError::UnknownLabel(other)),
        }
    }

    #[inline]
    pub fn is_decided(self) -> bool {
        self != Label::Undecided
    }
}

/// Owned, fixed-length label buffer.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Configuration {
    labels: Box<[Label]>,
}

impl Configuration {
    /// All vertices undecided.
    pub fn undecided(vertex_count: usize) -> Self {
        Self {
            labels: vec![Label::Undecided; vertex_count].into_boxed_slice(),
        }
    }

    /// Wraps an existing label vector. The caller keeps the prefix invariant.
    pub fn from_labels(labels: Vec<Label>) -> Self {
        Self {
            labels: labels.into_boxed_slice(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    #[inline]
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    #[inline]
    pub fn labels_mut(&mut self) -> &mut [Label] {
        &mut self.labels
    }

    #[inline]
    pub fn get(&self, v: VertexId) -> Label {
        self.labels[v]
    }

    #[inline]
    pub fn set(&mut self, v: VertexId, label: Label) {
        self.labels[v] = label;
    }

    /// Resets every position from `from` onwards to undecided.
    pub fn clear_from(&mut self, from: usize) {
        self.labels[from..].fill(Label::Undecided);
    }

    /// Index of the first undecided vertex, or `len()` when complete.
    pub fn first_undecided(&self) -> usize {
        self.labels
            .iter()
            .position(|l| !l.is_decided())
            .unwrap_or(self.labels.len())
    }

    /// Position of the first decided label that follows an undecided one.
    ///
    /// `None` means the decided labels form a prefix, which the search requires.
    pub fn scattered_label(&self) -> Option<usize> {
        let first = self.first_undecided();
        self.labels[first..]
            .iter()
            .position(|l| l.is_decided())
            .map(|offset| first + offset)
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.first_undecided() == self.len()
    }

    /// Copies `other` into `self` without reallocating.
    pub fn copy_from(&mut self, other: &Configuration) -> Result<(), BisectError> {
        if other.len() != self.len() {
            return Err(BisectError::ConfigLength {
                expected: self.len(),
                actual: other.len(),
            });
        }
        self.labels.copy_from_slice(&other.labels);
        Ok(())
    }

    /// Vertices currently labelled `label`.
    pub fn vertices_with(&self, label: Label) -> Vec<VertexId> {
        self.labels
            .iter()
            .positions(|&l| l == label)
            .collect()
    }
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.labels.iter().map(|l| l.to_wire()).join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scattered_label_finds_gaps() {
        use Label::*;
        assert_eq!(Configuration::from_labels(vec![InX, InY, Undecided]).scattered_label(), None);
        assert_eq!(Configuration::undecided(3).scattered_label(), None);
        assert_eq!(
            Configuration::from_labels(vec![Undecided, InX, Undecided]).scattered_label(),
            Some(1)
        );
        assert_eq!(
            Configuration::from_labels(vec![InY, Undecided, Undecided, InX]).scattered_label(),
            Some(3)
        );
    }

    #[test]
    fn first_undecided_and_clear() {
        let mut c = Configuration::undecided(4);
        assert_eq!(c.first_undecided(), 0);
        c.set(0, Label::InX);
        c.set(1, Label::InY);
        c.set(2, Label::InX);
        assert_eq!(c.first_undecided(), 3);
        c.clear_from(1);
        assert_eq!(c.first_undecided(), 1);
        assert_eq!(c.labels(), &[Label::InX, Label::Undecided, Label::Undecided, Label::Undecided]);
    }

    #[test]
    fn display_uses_wire_values() {
        let c = Configuration::from_labels(vec![Label::InX, Label::InY, Label::Undecided]);
        assert_eq!(c.to_string(), "[1, 0, -1]");
    }

    #[test]
    fn wire_label_errors() {
        assert_eq!(Label::from_wire(1).unwrap(), Label::InX);
        assert!(matches!(Label::from_wire(3), Err(BisectError::UnknownLabel(3))));
    }

    #[test]
    fn copy_from_checks_length() {
        let mut a = Configuration::undecided(2);
        let b = Configuration::from_labels(vec![Label::InY, Label::InX]);
        a.copy_from(&b).unwrap();
        assert_eq!(a, b);
        assert!(a.copy_from(&Configuration::undecided(3)).is_err());
        assert_eq!(a.vertices_with(Label::InX), vec![1]);
    }
}
