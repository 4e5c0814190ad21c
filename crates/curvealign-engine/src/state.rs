use curvealign_common::Scalar;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::cursor::NumericCursor;
use crate::row::RowAccumulator;

/// What a visitor sees at one aligned `x`.
///
/// The engine owns this value and rewrites it in place before every visit.
/// Visitors only ever get a shared borrow for the duration of one call; use
/// [`snapshot`](Self::snapshot) to keep a step around.
#[derive(Debug, Clone)]
pub struct StepState {
    x: NumericCursor,
    row: RowAccumulator,
    step: usize,
}

impl StepState {
    pub(crate) fn new(integer: bool, matrices: usize) -> Self {
        if integer {
            Self {
                x: NumericCursor::new_long(),
                row: RowAccumulator::new_long(matrices),
                step: 0,
            }
        } else {
            Self {
                x: NumericCursor::new_double(),
                row: RowAccumulator::new_double(matrices),
                step: 0,
            }
        }
    }

    pub(crate) fn begin(&mut self) {
        self.row.clear();
    }

    pub(crate) fn cursor_mut(&mut self) -> &mut NumericCursor {
        &mut self.x
    }

    pub(crate) fn row_mut(&mut self) -> &mut RowAccumulator {
        &mut self.row
    }

    pub(crate) fn finish(&mut self) {
        self.step += 1;
    }

    /// Current `x`, tagged with the run's numeric mode.
    #[inline]
    pub fn x(&self) -> Scalar {
        self.x.value()
    }

    #[inline]
    pub fn cursor(&self) -> &NumericCursor {
        &self.x
    }

    #[inline]
    pub fn x_f64(&self) -> f64 {
        self.x.as_f64()
    }

    #[inline]
    pub fn row(&self) -> &RowAccumulator {
        &self.row
    }

    /// Number of source matrices contributing at this `x`.
    #[inline]
    pub fn len(&self) -> usize {
        self.row.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.row.is_empty()
    }

    #[inline]
    pub fn y(&self, i: usize) -> Scalar {
        self.row.get(i)
    }

    #[inline]
    pub fn y_f64(&self, i: usize) -> f64 {
        self.row.get_f64(i)
    }

    /// Source-matrix index of the `i`-th contributed value.
    #[inline]
    pub fn source(&self, i: usize) -> usize {
        self.row.source(i)
    }

    #[inline]
    pub fn sources(&self) -> &[usize] {
        self.row.sources()
    }

    /// Contributed value of source matrix `matrix`, if it contributed.
    pub fn y_of(&self, matrix: usize) -> Option<Scalar> {
        self.row
            .sources()
            .iter()
            .position(|&s| s == matrix)
            .map(|i| self.row.get(i))
    }

    /// 1-based ordinal of this step within the run.
    #[inline]
    pub fn step(&self) -> usize {
        self.step
    }

    #[inline]
    pub fn is_integer(&self) -> bool {
        self.x.is_integer()
    }

    pub fn snapshot(&self) -> StepSnapshot {
        StepSnapshot {
            step: self.step,
            x: self.x.value(),
            ys: (0..self.row.len()).map(|i| self.row.get(i)).collect(),
            sources: self.row.sources().to_vec(),
        }
    }
}

/// Owned copy of a [`StepState`].
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct StepSnapshot {
    pub step: usize,
    pub x: Scalar,
    pub ys: Vec<Scalar>,
    pub sources: Vec<usize>,
}

impl StepSnapshot {
    pub fn ys_f64(&self) -> Vec<f64> {
        self.ys.iter().map(Scalar::as_f64).collect()
    }

    pub fn y_of(&self, matrix: usize) -> Option<Scalar> {
        self.sources
            .iter()
            .position(|&s| s == matrix)
            .map(|i| self.ys[i])
    }
}
