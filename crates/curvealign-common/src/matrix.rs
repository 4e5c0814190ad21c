//! Read-only two-dimensional numeric tables.
//!
//! [`Matrix`] is the only thing the alignment engine knows about its inputs.
//! [`DenseMatrix`] is a plain row-major implementation backed by a single
//! storage lane; [`crate::MatrixBuilder`] produces it incrementally.

use std::sync::Arc;

use crate::error::MatrixError;
use crate::scalar::{Scalar, is_exact_long};

/// Row/column addressed numeric table.
///
/// Implementations must be immutable for as long as they are shared; the
/// engine reads them from any thread holding an `Arc` to them.
pub trait Matrix: Send + Sync {
    fn rows(&self) -> usize;

    fn cols(&self) -> usize;

    fn get_double(&self, row: usize, col: usize) -> f64;

    fn get_long(&self, row: usize, col: usize) -> i64;

    /// `true` if every cell is integer-valued and `get_long` is lossless.
    fn is_integer(&self) -> bool;

    /// `true` if every value of column `col` is exactly representable as an
    /// `i64`. Defaults to a full scan unless the whole matrix is integral.
    fn is_integer_column(&self, col: usize) -> bool {
        if self.is_integer() {
            return true;
        }
        (0..self.rows()).all(|row| is_exact_long(self.get_double(row, col)))
    }

    /// Typed access that keeps integer cells as [`Scalar::Long`].
    fn get_scalar(&self, row: usize, col: usize) -> Scalar {
        if self.is_integer() {
            Scalar::Long(self.get_long(row, col))
        } else {
            Scalar::Double(self.get_double(row, col))
        }
    }
}

impl<M: Matrix + ?Sized> Matrix for Arc<M> {
    #[inline]
    fn rows(&self) -> usize {
        (**self).rows()
    }
    #[inline]
    fn cols(&self) -> usize {
        (**self).cols()
    }
    #[inline]
    fn get_double(&self, row: usize, col: usize) -> f64 {
        (**self).get_double(row, col)
    }
    #[inline]
    fn get_long(&self, row: usize, col: usize) -> i64 {
        (**self).get_long(row, col)
    }
    #[inline]
    fn is_integer(&self) -> bool {
        (**self).is_integer()
    }
    fn is_integer_column(&self, col: usize) -> bool {
        (**self).is_integer_column(col)
    }
}

/// Backing store of a [`DenseMatrix`].
#[derive(Debug, Clone, PartialEq)]
pub enum Lane {
    Long(Vec<i64>),
    Double(Vec<f64>),
}

impl Lane {
    #[inline]
    pub fn len(&self) -> usize {
        match self {
            Lane::Long(v) => v.len(),
            Lane::Double(v) => v.len(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Row-major matrix over one storage lane.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseMatrix {
    lane: Lane,
    rows: usize,
    cols: usize,
}

impl DenseMatrix {
    /// Wrap an existing row-major lane. `lane.len()` must be `rows * cols`.
    pub fn from_lane(lane: Lane, cols: usize) -> Result<Self, MatrixError> {
        if cols == 0 {
            return Err(MatrixError::ZeroColumns);
        }
        let len = lane.len();
        if len % cols != 0 {
            return Err(MatrixError::RaggedRow { cols, len });
        }
        Ok(Self {
            lane,
            rows: len / cols,
            cols,
        })
    }

    pub fn from_long_rows<R: AsRef<[i64]>>(rows: &[R]) -> Result<Self, MatrixError> {
        let cols = check_widths(rows)?;
        let data = rows.iter().flat_map(|r| r.as_ref().iter().copied()).collect();
        Self::from_lane(Lane::Long(data), cols)
    }

    pub fn from_double_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self, MatrixError> {
        let cols = check_widths(rows)?;
        let data = rows.iter().flat_map(|r| r.as_ref().iter().copied()).collect();
        Self::from_lane(Lane::Double(data), cols)
    }

    /// Two-column `(x, y)` matrix of doubles.
    pub fn from_pairs(points: &[(f64, f64)]) -> Self {
        let data = points.iter().flat_map(|&(x, y)| [x, y]).collect();
        Self {
            lane: Lane::Double(data),
            rows: points.len(),
            cols: 2,
        }
    }

    /// Two-column `(x, y)` matrix of longs.
    pub fn from_long_pairs(points: &[(i64, i64)]) -> Self {
        let data = points.iter().flat_map(|&(x, y)| [x, y]).collect();
        Self {
            lane: Lane::Long(data),
            rows: points.len(),
            cols: 2,
        }
    }

    pub fn lane(&self) -> &Lane {
        &self.lane
    }

    #[inline]
    pub fn dims(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Copy of one row as scalars.
    pub fn row(&self, row: usize) -> Vec<Scalar> {
        (0..self.cols).map(|c| self.get_scalar(row, c)).collect()
    }

    #[inline]
    fn offset(&self, row: usize, col: usize) -> usize {
        debug_assert!(row < self.rows && col < self.cols);
        row * self.cols + col
    }
}

fn check_widths<T, R: AsRef<[T]>>(rows: &[R]) -> Result<usize, MatrixError> {
    let Some(first) = rows.first() else {
        return Err(MatrixError::ZeroColumns);
    };
    let expected = first.as_ref().len();
    for (row, r) in rows.iter().enumerate() {
        let found = r.as_ref().len();
        if found != expected {
            return Err(MatrixError::RowWidth {
                row,
                expected,
                found,
            });
        }
    }
    Ok(expected)
}

impl Matrix for DenseMatrix {
    #[inline]
    fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    fn get_double(&self, row: usize, col: usize) -> f64 {
        let i = self.offset(row, col);
        match &self.lane {
            Lane::Long(v) => v[i] as f64,
            Lane::Double(v) => v[i],
        }
    }

    #[inline]
    fn get_long(&self, row: usize, col: usize) -> i64 {
        let i = self.offset(row, col);
        match &self.lane {
            Lane::Long(v) => v[i],
            Lane::Double(v) => v[i] as i64,
        }
    }

    #[inline]
    fn is_integer(&self) -> bool {
        matches!(self.lane, Lane::Long(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_rows_are_integer() {
        let m = DenseMatrix::from_long_rows(&[[0i64, 10], [1, 20], [2, 30]]).unwrap();
        assert_eq!(m.dims(), (3, 2));
        assert!(m.is_integer());
        assert_eq!(m.get_long(1, 1), 20);
        assert_eq!(m.get_double(2, 0), 2.0);
        assert!(m.is_integer_column(0));
    }

    #[test]
    fn double_column_integrality_is_per_column() {
        let m = DenseMatrix::from_pairs(&[(0.0, 1.5), (1.0, 2.0), (2.0, f64::NAN)]);
        assert!(!m.is_integer());
        assert!(m.is_integer_column(0));
        assert!(!m.is_integer_column(1));
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let rows: Vec<Vec<f64>> = vec![vec![0.0, 1.0], vec![2.0]];
        let err = DenseMatrix::from_double_rows(&rows).unwrap_err();
        assert_eq!(
            err,
            MatrixError::RowWidth {
                row: 1,
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn arc_forwards_to_inner() {
        let m: Arc<dyn Matrix> = Arc::new(DenseMatrix::from_long_pairs(&[(4, 40)]));
        assert_eq!(m.rows(), 1);
        assert_eq!(m.get_scalar(0, 1), Scalar::Long(40));
    }
}
