//! Incidence vectors over a finite ordered index set.
//!
//! An [`IncidenceVector`] is a fixed-length boolean vector packed into `u64`
//! words. Position `i` flags membership of the `i`-th element of the
//! [`FiniteOrderedSet`][crate::set::FiniteOrderedSet] the vector is relative to.
//! Element-wise AND / OR / NOT are then set intersection, union and complement.
//!
//! All binary operations require equal lengths. The checked methods
//! ([`and`][IncidenceVector::and], [`or`][IncidenceVector::or], ...) return
//! [`Error::IncompatibleDimension`] on mismatch; the `&`, `|` and `!` operators
//! panic instead and are meant for vectors already known to be aligned.

use std::fmt;
use std::ops::{BitAnd, BitOr, Not};

use crate::error::{ensure_dimension, Error, Result};

/// A fixed-length boolean vector backed by a vector of u64 words.
///
/// # Invariants
///
/// - `words.len() == ceil(len / 64)`
/// - bits at positions `>= len` are always clear
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct IncidenceVector {
    words: Vec<u64>,
    len: usize,
}

impl IncidenceVector {
    /// Number of bits per word.
    const BITS_PER_WORD: usize = 64;

    fn num_words(len: usize) -> usize {
        (len + Self::BITS_PER_WORD - 1) / Self::BITS_PER_WORD
    }

    /// Gets the word index and bit position for a given bit index.
    #[inline]
    fn word_and_bit(index: usize) -> (usize, usize) {
        (index / Self::BITS_PER_WORD, index % Self::BITS_PER_WORD)
    }

    /// Creates the all-zero vector (the empty subset).
    pub fn zeros(len: usize) -> Self {
        Self {
            words: vec![0; Self::num_words(len)],
            len,
        }
    }

    /// Creates the all-one vector (the full set).
    pub fn ones(len: usize) -> Self {
        let mut v = Self {
            words: vec![u64::MAX; Self::num_words(len)],
            len,
        };
        v.clear_tail();
        v
    }

    /// Creates a vector from a sequence of booleans.
    pub fn from_bools(bits: impl IntoIterator<Item = bool>) -> Self {
        let bits: Vec<bool> = bits.into_iter().collect();
        let mut v = Self::zeros(bits.len());
        for (i, &b) in bits.iter().enumerate() {
            if b {
                v.insert(i);
            }
        }
        v
    }

    /// Creates a vector from 0/1 integers, any non-zero value being `true`.
    ///
    /// ```
    /// use markov_rs::incidence::IncidenceVector;
    ///
    /// let v = IncidenceVector::from_bits([1, 0, 1]);
    /// assert_eq!(v.to_bools(), vec![true, false, true]);
    /// ```
    pub fn from_bits(bits: impl IntoIterator<Item = u8>) -> Self {
        Self::from_bools(bits.into_iter().map(|b| b != 0))
    }

    /// Creates a vector of length `len` with the given positions set.
    pub fn from_indices(len: usize, indices: impl IntoIterator<Item = usize>) -> Result<Self> {
        let mut v = Self::zeros(len);
        for index in indices {
            if index >= len {
                return Err(Error::IndexOutOfRange { index, len });
            }
            v.insert(index);
        }
        Ok(v)
    }

    /// Clears the bits past `len` in the last word.
    fn clear_tail(&mut self) {
        let rem = self.len % Self::BITS_PER_WORD;
        if rem != 0 {
            if let Some(last) = self.words.last_mut() {
                *last &= (1u64 << rem) - 1;
            }
        }
    }

    /// Returns the length of the vector (the cardinality of the base set).
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the vector has length zero.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of set bits (the cardinality of the subset).
    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Returns true if at least one bit is set.
    pub fn any(&self) -> bool {
        self.words.iter().any(|&w| w != 0)
    }

    /// Returns true if every bit is set.
    pub fn all(&self) -> bool {
        self.count_ones() == self.len
    }

    /// Returns the bit at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    #[inline]
    pub fn get(&self, index: usize) -> bool {
        assert!(index < self.len, "index {} out of range for length {}", index, self.len);
        let (word_idx, bit_idx) = Self::word_and_bit(index);
        (self.words[word_idx] >> bit_idx) & 1 != 0
    }

    /// Sets the bit at `index`. Returns true if the bit was not previously set.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    #[inline]
    pub fn insert(&mut self, index: usize) -> bool {
        let was_clear = !self.get(index);
        let (word_idx, bit_idx) = Self::word_and_bit(index);
        self.words[word_idx] |= 1u64 << bit_idx;
        was_clear
    }

    /// Clears the bit at `index`. Returns true if the bit was previously set.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    #[inline]
    pub fn remove(&mut self, index: usize) -> bool {
        let was_set = self.get(index);
        let (word_idx, bit_idx) = Self::word_and_bit(index);
        self.words[word_idx] &= !(1u64 << bit_idx);
        was_set
    }

    /// Sets the bit at `index` to `value`.
    pub fn set(&mut self, index: usize, value: bool) {
        if value {
            self.insert(index);
        } else {
            self.remove(index);
        }
    }

    fn zip_words(&self, other: &Self, f: impl Fn(u64, u64) -> u64) -> Result<Self> {
        ensure_dimension(self.len, other.len)?;
        let words = self.words.iter().zip(&other.words).map(|(&a, &b)| f(a, b)).collect();
        Ok(Self { words, len: self.len })
    }

    /// Element-wise AND, i.e. set intersection.
    pub fn and(&self, other: &Self) -> Result<Self> {
        self.zip_words(other, |a, b| a & b)
    }

    /// Element-wise OR, i.e. set union.
    pub fn or(&self, other: &Self) -> Result<Self> {
        self.zip_words(other, |a, b| a | b)
    }

    /// Element-wise `self ∧ ¬other`, i.e. set difference.
    pub fn difference(&self, other: &Self) -> Result<Self> {
        self.zip_words(other, |a, b| a & !b)
    }

    /// Element-wise NOT, i.e. set complement.
    pub fn not(&self) -> Self {
        let mut v = Self {
            words: self.words.iter().map(|w| !w).collect(),
            len: self.len,
        };
        v.clear_tail();
        v
    }

    /// Checked equality: fails if the lengths differ.
    pub fn equals(&self, other: &Self) -> Result<bool> {
        ensure_dimension(self.len, other.len)?;
        Ok(self.words == other.words)
    }

    /// Returns true if every 1-bit of `other` is also a 1-bit of `self`
    /// (`self` may have supplementary 1-bits). Every vector masks itself.
    pub fn masks(&self, other: &Self) -> Result<bool> {
        ensure_dimension(self.len, other.len)?;
        Ok(self.words.iter().zip(&other.words).all(|(&a, &b)| b & !a == 0))
    }

    /// Returns an iterator over the positions of set bits, in increasing order.
    pub fn iter_ones(&self) -> Ones<'_> {
        Ones {
            vector: self,
            word_idx: 0,
            current_word: self.words.first().copied().unwrap_or(0),
        }
    }

    pub fn to_bools(&self) -> Vec<bool> {
        (0..self.len).map(|i| self.get(i)).collect()
    }
}

/// Iterator over set positions in an [`IncidenceVector`].
pub struct Ones<'a> {
    vector: &'a IncidenceVector,
    word_idx: usize,
    current_word: u64,
}

impl Iterator for Ones<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.current_word != 0 {
                let bit_idx = self.current_word.trailing_zeros() as usize;
                self.current_word &= self.current_word - 1; // Clear lowest set bit
                return Some(self.word_idx * IncidenceVector::BITS_PER_WORD + bit_idx);
            }

            self.word_idx += 1;
            if self.word_idx >= self.vector.words.len() {
                return None;
            }
            self.current_word = self.vector.words[self.word_idx];
        }
    }
}

impl BitAnd for &IncidenceVector {
    type Output = IncidenceVector;

    fn bitand(self, rhs: Self) -> Self::Output {
        self.and(rhs).expect("incidence vectors of different lengths")
    }
}

impl BitOr for &IncidenceVector {
    type Output = IncidenceVector;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.or(rhs).expect("incidence vectors of different lengths")
    }
}

impl Not for &IncidenceVector {
    type Output = IncidenceVector;

    fn not(self) -> Self::Output {
        IncidenceVector::not(self)
    }
}

impl fmt::Display for IncidenceVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for i in 0..self.len {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", self.get(i) as u8)?;
        }
        write!(f, "]")
    }
}
