//! Dense square matrices over the state set.

use std::fmt;
use std::ops::{Index, IndexMut};

use crate::error::{ensure_dimension, Error, Result};

/// Dense `n × n` matrix, stored row-major.
///
/// The element type decides the role: `SquareMatrix<f64>` for probability and
/// rate matrices, `SquareMatrix<bool>` for transition (adjacency) matrices.
/// Semantic constraints are checked by the validation functions in
/// [`stochastic`][crate::stochastic], not by the type.
#[derive(Debug, Clone, PartialEq)]
pub struct SquareMatrix<T> {
    data: Vec<T>,
    size: usize,
}

impl<T> SquareMatrix<T> {
    /// Creates a matrix from its rows.
    ///
    /// Fails with [`Error::NotSquare`] if any row length differs from the
    /// number of rows.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self> {
        let size = rows.len();
        let mut data = Vec::with_capacity(size * size);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != size {
                return Err(Error::NotSquare {
                    row: i,
                    len: row.len(),
                    expected: size,
                });
            }
            data.extend(row);
        }
        Ok(Self { data, size })
    }

    pub fn from_fn(size: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut data = Vec::with_capacity(size * size);
        for i in 0..size {
            for j in 0..size {
                data.push(f(i, j));
            }
        }
        Self { data, size }
    }

    /// Number of rows (and columns).
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, i: usize, j: usize) -> Option<&T> {
        if i < self.size && j < self.size {
            Some(&self.data[i * self.size + j])
        } else {
            None
        }
    }

    /// Overwrites a single element.
    pub fn set(&mut self, i: usize, j: usize, value: T) -> Result<()> {
        for index in [i, j] {
            if index >= self.size {
                return Err(Error::IndexOutOfRange { index, len: self.size });
            }
        }
        self.data[i * self.size + j] = value;
        Ok(())
    }

    pub fn row(&self, i: usize) -> &[T] {
        &self.data[i * self.size..(i + 1) * self.size]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[T]> + '_ {
        // `chunks` panics on zero chunk size.
        self.data.chunks(self.size.max(1))
    }

    pub fn map<U>(&self, f: impl Fn(&T) -> U) -> SquareMatrix<U> {
        SquareMatrix {
            data: self.data.iter().map(f).collect(),
            size: self.size,
        }
    }
}

impl SquareMatrix<f64> {
    pub fn zeros(size: usize) -> Self {
        Self::from_fn(size, |_, _| 0.0)
    }

    pub fn identity(size: usize) -> Self {
        Self::from_fn(size, |i, j| if i == j { 1.0 } else { 0.0 })
    }

    /// Matrix product `self · other`.
    pub fn mul(&self, other: &Self) -> Result<Self> {
        ensure_dimension(self.size, other.size)?;
        Ok(self.product(other))
    }

    fn product(&self, other: &Self) -> Self {
        let n = self.size;
        let mut result = Self::zeros(n);
        for i in 0..n {
            for k in 0..n {
                let a = self[(i, k)];
                if a == 0.0 {
                    continue;
                }
                for j in 0..n {
                    result.data[i * n + j] += a * other[(k, j)];
                }
            }
        }
        result
    }

    /// Computes `self^k` by repeated squaring. `self^0` is the identity.
    pub fn pow(&self, mut k: u64) -> Self {
        let mut result = Self::identity(self.size);
        let mut base = self.clone();
        while k > 0 {
            if k & 1 == 1 {
                result = result.product(&base);
            }
            k >>= 1;
            if k > 0 {
                base = base.product(&base);
            }
        }
        result
    }

    /// Row vector times matrix: `v · self`.
    pub fn vec_mul(&self, v: &[f64]) -> Result<Vec<f64>> {
        ensure_dimension(self.size, v.len())?;
        let mut result = vec![0.0; self.size];
        for (i, &x) in v.iter().enumerate() {
            if x == 0.0 {
                continue;
            }
            for (r, &p) in result.iter_mut().zip(self.row(i)) {
                *r += x * p;
            }
        }
        Ok(result)
    }

    /// Matrix times column vector: `self · v`.
    pub fn mul_vec(&self, v: &[f64]) -> Result<Vec<f64>> {
        ensure_dimension(self.size, v.len())?;
        Ok((0..self.size)
            .map(|i| self.row(i).iter().zip(v).map(|(a, b)| a * b).sum())
            .collect())
    }

    pub fn row_sums(&self) -> Vec<f64> {
        (0..self.size).map(|i| self.row(i).iter().sum()).collect()
    }

    /// Boolean support: `true` where the entry is strictly positive.
    pub fn support(&self) -> SquareMatrix<bool> {
        self.map(|&x| x > 0.0)
    }
}

impl<T> Index<(usize, usize)> for SquareMatrix<T> {
    type Output = T;

    fn index(&self, (i, j): (usize, usize)) -> &Self::Output {
        assert!(i < self.size && j < self.size, "index ({}, {}) out of range for size {}", i, j, self.size);
        &self.data[i * self.size + j]
    }
}

impl<T> IndexMut<(usize, usize)> for SquareMatrix<T> {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut Self::Output {
        assert!(i < self.size && j < self.size, "index ({}, {}) out of range for size {}", i, j, self.size);
        &mut self.data[i * self.size + j]
    }
}

impl<T: fmt::Display> fmt::Display for SquareMatrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.size {
            if i > 0 {
                writeln!(f)?;
            }
            let row: Vec<String> = self.row(i).iter().map(|x| x.to_string()).collect();
            write!(f, "[{}]", row.join(" "))?;
        }
        Ok(())
    }
}
