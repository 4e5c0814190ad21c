//! Numeric lane of a run.
//!
//! A run reads every `x` and `y` either as `i64` or as `f64`, never a mix.
//! The walker is generic over this trait so both lanes share one
//! implementation with no per-value tag checks.

use std::fmt::Debug;

use curvealign_common::{Matrix, Scalar};

use crate::cursor::NumericCursor;
use crate::row::RowAccumulator;

pub(crate) trait RunValue: Copy + PartialOrd + Debug {
    fn read(m: &dyn Matrix, row: usize, col: usize) -> Self;

    fn from_scalar(v: Scalar) -> Self;

    fn from_f64(v: f64) -> Self;

    fn is_nan(self) -> bool;

    fn store(self, cursor: &mut NumericCursor);

    fn push(self, row: &mut RowAccumulator, source: usize);
}

impl RunValue for i64 {
    #[inline]
    fn read(m: &dyn Matrix, row: usize, col: usize) -> Self {
        m.get_long(row, col)
    }

    #[inline]
    fn from_scalar(v: Scalar) -> Self {
        v.as_i64()
    }

    #[inline]
    fn from_f64(v: f64) -> Self {
        v as i64
    }

    #[inline]
    fn is_nan(self) -> bool {
        false
    }

    #[inline]
    fn store(self, cursor: &mut NumericCursor) {
        cursor.set_long(self);
    }

    #[inline]
    fn push(self, row: &mut RowAccumulator, source: usize) {
        row.push_long(source, self);
    }
}

impl RunValue for f64 {
    #[inline]
    fn read(m: &dyn Matrix, row: usize, col: usize) -> Self {
        m.get_double(row, col)
    }

    #[inline]
    fn from_scalar(v: Scalar) -> Self {
        v.as_f64()
    }

    #[inline]
    fn from_f64(v: f64) -> Self {
        v
    }

    #[inline]
    fn is_nan(self) -> bool {
        f64::is_nan(self)
    }

    #[inline]
    fn store(self, cursor: &mut NumericCursor) {
        cursor.set_double(self);
    }

    #[inline]
    fn push(self, row: &mut RowAccumulator, source: usize) {
        row.push_double(source, self);
    }
}

/// Decide the lane for a run: integer only if every replacement value and
/// every `x`/`y` column involved is exactly representable as `i64`.
pub(crate) fn integer_run(
    matrices: &[std::sync::Arc<dyn Matrix>],
    x_column: usize,
    y_column: usize,
    replacements: [Option<Scalar>; 2],
) -> bool {
    replacements
        .iter()
        .flatten()
        .all(|r| r.is_exact_long())
        && matrices
            .iter()
            .all(|m| m.is_integer_column(y_column) && m.is_integer_column(x_column))
}

#[cfg(test)]
mod tests {
    use super::*;
    use curvealign_common::DenseMatrix;
    use std::sync::Arc;

    fn shared(m: DenseMatrix) -> Arc<dyn Matrix> {
        Arc::new(m)
    }

    #[test]
    fn integer_run_requires_every_input() {
        let longs = vec![
            shared(DenseMatrix::from_long_pairs(&[(0, 1), (1, 2)])),
            shared(DenseMatrix::from_pairs(&[(0.0, 1.0), (2.0, 4.0)])),
        ];
        assert!(integer_run(&longs, 0, 1, [None, None]));
        assert!(integer_run(&longs, 0, 1, [Some(Scalar::Double(-3.0)), None]));
        assert!(!integer_run(&longs, 0, 1, [None, Some(Scalar::Double(-31.5))]));

        let mut mixed = longs.clone();
        mixed.push(shared(DenseMatrix::from_pairs(&[(0.0, 0.5)])));
        assert!(!integer_run(&mixed, 0, 1, [None, None]));
    }

    #[test]
    fn integer_run_checks_x_column_independently() {
        let m = vec![shared(DenseMatrix::from_pairs(&[(0.5, 1.0), (1.5, 2.0)]))];
        assert!(!integer_run(&m, 0, 1, [None, None]));
        assert!(integer_run(&m, 1, 1, [None, None]));
    }
}
