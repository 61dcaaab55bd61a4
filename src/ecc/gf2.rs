//! Linear algebra over GF(2).
//!
//! Addition in GF(2) is XOR and multiplication is AND, so every dot product
//! here is a parity. `BinaryMatrix` only ever stores 0 and 1: construction
//! from raw `u8` rows rejects anything else, and every product is reduced
//! mod 2 before it leaves this module.

use crate::ecc::bits::Bits;
use crate::error::{Error, Result};
use bitvec::prelude::*;
use ndarray::{Array2, Axis};
use std::fmt::{Display, Formatter};

/// Dense matrix with entries in GF(2)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryMatrix {
    data: Array2<u8>,
}

impl BinaryMatrix {
    /// Builds a matrix from a rectangular array of 0/1 values.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if the rows differ in length and
    /// [`Error::NonBinaryValue`] for the first entry that is not 0 or 1.
    ///
    /// # Example
    /// ```
    /// use lincodes::ecc::gf2::BinaryMatrix;
    ///
    /// let m = BinaryMatrix::from_rows(&[[1u8, 0, 1], [0, 1, 1]]).unwrap();
    /// assert_eq!((m.nrows(), m.ncols()), (2, 3));
    /// assert!(BinaryMatrix::from_rows(&[[1u8, 2]]).is_err());
    /// ```
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self> {
        let nrows = rows.len();
        let ncols = rows.first().map_or(0, |row| row.as_ref().len());

        let mut data = Array2::zeros((nrows, ncols));
        for (row, values) in rows.iter().enumerate() {
            let values = values.as_ref();
            if values.len() != ncols {
                return Err(Error::DimensionMismatch(format!(
                    "row {} has {} columns, expected {}",
                    row,
                    values.len(),
                    ncols
                )));
            }
            for (col, &value) in values.iter().enumerate() {
                if value > 1 {
                    return Err(Error::NonBinaryValue { value, row, col });
                }
                data[[row, col]] = value;
            }
        }

        Ok(BinaryMatrix { data })
    }

    /// Builds an `nrows x ncols` matrix whose entry `(i, j)` is `f(i, j)`
    pub fn from_fn<F>(nrows: usize, ncols: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> bool,
    {
        BinaryMatrix {
            data: Array2::from_shape_fn((nrows, ncols), |(i, j)| u8::from(f(i, j))),
        }
    }

    pub fn nrows(&self) -> usize {
        self.data.nrows()
    }

    pub fn ncols(&self) -> usize {
        self.data.ncols()
    }

    /// Entry at `(row, col)`, or `None` when out of bounds
    pub fn get(&self, row: usize, col: usize) -> Option<bool> {
        self.data.get((row, col)).map(|&value| value == 1)
    }

    pub fn transpose(&self) -> Self {
        BinaryMatrix {
            data: self.data.t().to_owned(),
        }
    }

    /// Row `i` as a bit vector
    ///
    /// # Panics
    ///
    /// Panics if `i >= self.nrows()`.
    pub fn row(&self, i: usize) -> Bits {
        self.data.row(i).iter().map(|&value| value == 1).collect()
    }

    /// Column `j` as a bit vector
    ///
    /// # Panics
    ///
    /// Panics if `j >= self.ncols()`.
    pub fn column(&self, j: usize) -> Bits {
        self.data.column(j).iter().map(|&value| value == 1).collect()
    }

    /// Iterates over the columns, left to right
    pub fn columns(&self) -> impl Iterator<Item = Bits> + '_ {
        self.data
            .axis_iter(Axis(1))
            .map(|column| column.iter().map(|&value| value == 1).collect())
    }

    /// Computes the row-vector product `v · M` mod 2.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if `v.len() != self.nrows()`.
    pub fn vector_mul(&self, v: &BitSlice<u8, Msb0>) -> Result<Bits> {
        if v.len() != self.nrows() {
            return Err(Error::DimensionMismatch(format!(
                "vector of length {} times {}x{} matrix",
                v.len(),
                self.nrows(),
                self.ncols()
            )));
        }

        Ok(self
            .data
            .axis_iter(Axis(1))
            .map(|column| {
                // Only rows selected by a 1 in `v` contribute to the sum
                v.iter_ones().fold(0u8, |acc, i| acc ^ column[i]) == 1
            })
            .collect())
    }

    /// Computes the product `self · other` mod 2.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if the inner dimensions differ.
    pub fn mul(&self, other: &BinaryMatrix) -> Result<BinaryMatrix> {
        if self.ncols() != other.nrows() {
            return Err(Error::DimensionMismatch(format!(
                "{}x{} matrix times {}x{} matrix",
                self.nrows(),
                self.ncols(),
                other.nrows(),
                other.ncols()
            )));
        }

        let lhs = self.data.mapv(u32::from);
        let rhs = other.data.mapv(u32::from);
        let product = lhs.dot(&rhs);

        Ok(BinaryMatrix {
            data: product.mapv(|sum| (sum % 2) as u8),
        })
    }
}

impl Display for BinaryMatrix {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (i, row) in self.data.axis_iter(Axis(0)).enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for value in row.iter() {
                write!(f, "{}", value)?;
            }
        }
        Ok(())
    }
}
