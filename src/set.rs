//! Finite ordered label sets.
//!
//! A [`FiniteOrderedSet`] is the index space every model is built on: state
//! sets, atomic-proposition sets. Labels are kept sorted and de-duplicated
//! after every mutation, so that incidence vectors computed against two equal
//! sets agree bit-for-bit.

use std::fmt;
use std::ops::Index;

use crate::error::{ensure_dimension, Error, Result};
use crate::incidence::IncidenceVector;

/// Reference to one or several elements of a [`FiniteOrderedSet`].
///
/// Resolved with [`FiniteOrderedSet::resolve`] into an incidence vector.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum StateRef {
    Index(usize),
    Label(String),
    Vector(IncidenceVector),
}

impl From<usize> for StateRef {
    fn from(index: usize) -> Self {
        StateRef::Index(index)
    }
}

impl From<&str> for StateRef {
    fn from(label: &str) -> Self {
        StateRef::Label(label.to_string())
    }
}

impl From<String> for StateRef {
    fn from(label: String) -> Self {
        StateRef::Label(label)
    }
}

impl From<IncidenceVector> for StateRef {
    fn from(vector: IncidenceVector) -> Self {
        StateRef::Vector(vector)
    }
}

/// A sorted sequence of unique labels.
#[derive(Debug, Clone, Default, Eq, PartialEq, Hash)]
pub struct FiniteOrderedSet {
    labels: Vec<String>,
}

impl FiniteOrderedSet {
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self {
            labels: labels.into_iter().map(Into::into).collect(),
        };
        set.canonicalize();
        set
    }

    /// Generates `count` labels `prefix + index` for `index` in `start..start+count`.
    ///
    /// Indices are zero-padded to the number of decimal digits of the largest index,
    /// so that the lexicographic order agrees with the numeric one.
    ///
    /// ```
    /// use markov_rs::set::FiniteOrderedSet;
    ///
    /// let states = FiniteOrderedSet::from_range("s", 12, 0);
    /// assert_eq!(states.get(0).unwrap(), "s00");
    /// assert_eq!(states.get(11).unwrap(), "s11");
    /// ```
    pub fn from_range(prefix: &str, count: usize, start: usize) -> Self {
        let width = (start + count).saturating_sub(1).to_string().len();
        Self::new((start..start + count).map(|i| format!("{}{:0width$}", prefix, i, width = width)))
    }

    fn canonicalize(&mut self) {
        self.labels.sort();
        self.labels.dedup();
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.labels.iter().map(String::as_str)
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn contains(&self, label: &str) -> bool {
        self.labels.binary_search_by(|l| l.as_str().cmp(label)).is_ok()
    }

    /// Returns the position of `label`.
    pub fn index_of(&self, label: &str) -> Result<usize> {
        self.labels
            .binary_search_by(|l| l.as_str().cmp(label))
            .map_err(|_| Error::LabelNotFound(label.to_string()))
    }

    /// Returns the label at `index`.
    pub fn get(&self, index: usize) -> Result<&str> {
        self.labels.get(index).map(String::as_str).ok_or(Error::IndexOutOfRange {
            index,
            len: self.len(),
        })
    }

    /// Selects the labels at the set positions of `vector`.
    pub fn subset(&self, vector: &IncidenceVector) -> Result<FiniteOrderedSet> {
        ensure_dimension(self.len(), vector.len())?;
        // Already in canonical order.
        Ok(Self {
            labels: vector.iter_ones().map(|i| self.labels[i].clone()).collect(),
        })
    }

    /// Returns the incidence vector of `labels` relative to this set.
    pub fn incidence_vector_of<I, S>(&self, labels: I) -> Result<IncidenceVector>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut vector = IncidenceVector::zeros(self.len());
        for label in labels {
            vector.insert(self.index_of(label.as_ref())?);
        }
        Ok(vector)
    }

    /// Inserts a label. Returns true if it was not already present.
    pub fn insert(&mut self, label: impl Into<String>) -> bool {
        let label = label.into();
        match self.labels.binary_search(&label) {
            Ok(_) => false,
            Err(pos) => {
                self.labels.insert(pos, label);
                true
            }
        }
    }

    /// Removes a label. Returns true if it was present.
    ///
    /// Positions of the following labels shift down by one, so incidence
    /// vectors computed before the removal are no longer aligned.
    pub fn remove(&mut self, label: &str) -> bool {
        match self.index_of(label) {
            Ok(pos) => {
                self.labels.remove(pos);
                true
            }
            Err(_) => false,
        }
    }

    /// Resolves a [`StateRef`] into an incidence vector over this set.
    pub fn resolve(&self, state: &StateRef) -> Result<IncidenceVector> {
        match state {
            StateRef::Index(index) => IncidenceVector::from_indices(self.len(), [*index]),
            StateRef::Label(label) => self.incidence_vector_of([label]),
            StateRef::Vector(vector) => {
                ensure_dimension(self.len(), vector.len())?;
                Ok(vector.clone())
            }
        }
    }

    /// Resolves a [`StateRef`] that must designate exactly one element.
    pub(crate) fn resolve_single(&self, state: &StateRef) -> Result<usize> {
        match state {
            StateRef::Index(index) if *index < self.len() => Ok(*index),
            StateRef::Index(index) => Err(Error::IndexOutOfRange {
                index: *index,
                len: self.len(),
            }),
            StateRef::Label(label) => self.index_of(label),
            StateRef::Vector(vector) => {
                ensure_dimension(self.len(), vector.len())?;
                let mut ones = vector.iter_ones();
                match (ones.next(), ones.next()) {
                    (Some(index), None) => Ok(index),
                    _ => Err(Error::InvalidArgument {
                        name: "state",
                        value: vector.count_ones() as f64,
                        reason: "vector must designate exactly one element",
                    }),
                }
            }
        }
    }
}

impl<S: Into<String>> FromIterator<S> for FiniteOrderedSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl Index<usize> for FiniteOrderedSet {
    type Output = str;

    fn index(&self, index: usize) -> &Self::Output {
        &self.labels[index]
    }
}

impl fmt::Display for FiniteOrderedSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.labels.join(", "))
    }
}
