use crate::error::MatrixError;
use crate::matrix::{DenseMatrix, Lane};
use crate::scalar::{Scalar, is_exact_long};

/// Row-major matrix builder with an adaptive storage lane.
///
/// Values are kept as `i64` until the first value that is not exactly an
/// integer arrives; at that point everything appended so far is widened to
/// `f64` and the builder stays in the double lane.
#[derive(Debug, Clone)]
pub struct MatrixBuilder {
    cols: usize,
    lane: Lane,
}

impl MatrixBuilder {
    pub fn new(cols: usize) -> Self {
        Self {
            cols,
            lane: Lane::Long(Vec::new()),
        }
    }

    pub fn with_capacity(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            lane: Lane::Long(Vec::with_capacity(rows.saturating_mul(cols))),
        }
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Complete rows appended so far.
    #[inline]
    pub fn rows(&self) -> usize {
        if self.cols == 0 {
            0
        } else {
            self.lane.len() / self.cols
        }
    }

    #[inline]
    pub fn is_integer(&self) -> bool {
        matches!(self.lane, Lane::Long(_))
    }

    pub fn push_long(&mut self, v: i64) {
        match &mut self.lane {
            Lane::Long(data) => data.push(v),
            Lane::Double(data) => data.push(v as f64),
        }
    }

    pub fn push_double(&mut self, v: f64) {
        match &mut self.lane {
            Lane::Long(data) if is_exact_long(v) => data.push(v as i64),
            Lane::Long(_) => {
                self.promote();
                self.push_double(v);
            }
            Lane::Double(data) => data.push(v),
        }
    }

    pub fn push_scalar(&mut self, v: Scalar) {
        match v {
            Scalar::Long(i) => self.push_long(i),
            Scalar::Double(d) => self.push_double(d),
        }
    }

    /// Append a whole row; the width is checked by [`finish`](Self::finish).
    pub fn push_row(&mut self, row: &[Scalar]) {
        for &v in row {
            self.push_scalar(v);
        }
    }

    pub fn finish(self) -> Result<DenseMatrix, MatrixError> {
        DenseMatrix::from_lane(self.lane, self.cols)
    }

    fn promote(&mut self) {
        if let Lane::Long(data) = &self.lane {
            let widened = data.iter().map(|&v| v as f64).collect();
            self.lane = Lane::Double(widened);
        }
    }
}
