//! Per-matrix cursor over an active window of rows.

use std::sync::Arc;

use curvealign_common::Matrix;

use super::lane::RunValue;
use crate::policy::Direction;

/// How a goal `x` relates to the rows of one matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Resolution {
    /// The row's `x` equals the goal.
    Exact(usize),
    /// The goal lies strictly between `previous` and `next`.
    Between { previous: usize, next: usize },
    /// The goal comes before the first row of the window.
    MissingStart,
    /// The goal comes after the last row of the window.
    MissingEnd,
    /// The window holds no rows at all.
    Empty,
}

/// Read-only view of one source matrix plus the run's cursor into it.
///
/// `start <= cursor <= end` always holds and `cursor` never moves backwards.
pub(crate) struct Track {
    pub(crate) source: usize,
    matrix: Arc<dyn Matrix>,
    start: usize,
    end: usize,
    cursor: usize,
}

impl Track {
    pub(crate) fn new(source: usize, matrix: Arc<dyn Matrix>) -> Self {
        let end = matrix.rows();
        Self {
            source,
            matrix,
            start: 0,
            end,
            cursor: 0,
        }
    }

    /// Narrow the window so neither its first nor its last row carries a NaN
    /// in the checked columns. A matrix with no clean row ends up empty.
    pub(crate) fn trim_nans(&mut self, x_column: Option<usize>, y_column: Option<usize>) {
        if self.matrix.is_integer() {
            return;
        }
        let m = &self.matrix;
        let clean = |row: &usize| {
            let nan_at = |c: Option<usize>| c.is_some_and(|c| m.get_double(*row, c).is_nan());
            !nan_at(x_column) && !nan_at(y_column)
        };
        match (0..m.rows()).find(clean) {
            Some(first) => {
                let last = (first..m.rows()).rev().find(clean).unwrap_or(first);
                self.start = first;
                self.end = last + 1;
            }
            None => {
                self.start = 0;
                self.end = 0;
            }
        }
        self.cursor = self.start;
    }

    #[inline]
    pub(crate) fn window(&self) -> (usize, usize) {
        (self.start, self.end)
    }

    #[inline]
    pub(crate) fn cursor(&self) -> usize {
        self.cursor
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.start == self.end
    }

    #[inline]
    pub(crate) fn first_row(&self) -> usize {
        self.start
    }

    #[inline]
    pub(crate) fn last_row(&self) -> usize {
        self.end - 1
    }

    #[inline]
    pub(crate) fn read<T: RunValue>(&self, row: usize, col: usize) -> T {
        T::read(self.matrix.as_ref(), row, col)
    }

    /// First non-NaN `x` at or after the cursor that lies strictly beyond
    /// `after` (or any non-NaN `x` when `after` is `None`). Does not move the
    /// cursor.
    pub(crate) fn peek_beyond<T: RunValue>(
        &self,
        x_column: usize,
        after: Option<T>,
        direction: Direction,
    ) -> Option<T> {
        (self.cursor..self.end)
            .map(|row| self.read::<T>(row, x_column))
            .find(|&x| !x.is_nan() && after.is_none_or(|a| direction.passes(x, a)))
    }

    /// Advance toward `goal` and classify where it falls.
    ///
    /// The scan stops at the first row that passes `goal`; the cursor is left
    /// on the last non-NaN row that did not, so the boundary is looked at
    /// again for the next goal.
    pub(crate) fn resolve<T: RunValue>(
        &mut self,
        goal: T,
        x_column: usize,
        direction: Direction,
    ) -> Resolution {
        if self.is_empty() {
            return Resolution::Empty;
        }
        let mut row = self.cursor;
        let mut last = None;
        while row < self.end {
            let x: T = self.read(row, x_column);
            if direction.passes(x, goal) {
                break;
            }
            // NaN rows are stepped over; `last` always names a real sample
            if !x.is_nan() {
                last = Some(row);
            }
            row += 1;
        }
        match last {
            None if row < self.end => Resolution::MissingStart,
            None => Resolution::MissingEnd,
            Some(previous) => {
                let x: T = self.read(previous, x_column);
                if x == goal {
                    self.cursor = previous;
                    Resolution::Exact(previous)
                } else if row < self.end {
                    self.cursor = previous;
                    Resolution::Between {
                        previous,
                        next: row,
                    }
                } else {
                    self.cursor = self.end;
                    Resolution::MissingEnd
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use curvealign_common::DenseMatrix;

    fn track(points: &[(f64, f64)]) -> Track {
        Track::new(0, Arc::new(DenseMatrix::from_pairs(points)))
    }

    #[test]
    fn resolve_classifies_goals() {
        let mut t = track(&[(1.0, 10.0), (3.0, 30.0), (5.0, 50.0)]);
        let inc = Direction::Increasing;
        assert_eq!(t.resolve(0.0, 0, inc), Resolution::MissingStart);
        assert_eq!(t.cursor(), 0);
        assert_eq!(t.resolve(1.0, 0, inc), Resolution::Exact(0));
        assert_eq!(
            t.resolve(2.0, 0, inc),
            Resolution::Between {
                previous: 0,
                next: 1
            }
        );
        assert_eq!(t.cursor(), 0);
        assert_eq!(t.resolve(3.0, 0, inc), Resolution::Exact(1));
        assert_eq!(t.resolve(5.0, 0, inc), Resolution::Exact(2));
        assert_eq!(t.resolve(6.0, 0, inc), Resolution::MissingEnd);
        assert_eq!(t.cursor(), 3);
        assert_eq!(t.resolve(7.0, 0, inc), Resolution::MissingEnd);
    }

    #[test]
    fn resolve_decreasing() {
        let mut t = track(&[(f64::INFINITY, 1.0), (4.0, 2.0), (-1.0, 3.0)]);
        let dec = Direction::Decreasing;
        assert_eq!(t.resolve(f64::INFINITY, 0, dec), Resolution::Exact(0));
        assert_eq!(
            t.resolve(0.0, 0, dec),
            Resolution::Between {
                previous: 1,
                next: 2
            }
        );
        assert_eq!(t.resolve(-1.0, 0, dec), Resolution::Exact(2));
    }

    #[test]
    fn peek_skips_nan_and_respects_after() {
        let t = track(&[(f64::NAN, 0.0), (2.0, 1.0), (4.0, 2.0)]);
        let inc = Direction::Increasing;
        assert_eq!(t.peek_beyond::<f64>(0, None, inc), Some(2.0));
        assert_eq!(t.peek_beyond(0, Some(2.0), inc), Some(4.0));
        assert_eq!(t.peek_beyond(0, Some(4.0), inc), None);
    }

    #[test]
    fn nan_rows_never_become_the_previous_sample() {
        let nan = f64::NAN;
        let mut t = track(&[(0.0, 1.0), (nan, 99.0), (2.0, 3.0), (nan, 98.0)]);
        let inc = Direction::Increasing;
        assert_eq!(t.resolve(0.0, 0, inc), Resolution::Exact(0));
        assert_eq!(
            t.resolve(1.0, 0, inc),
            Resolution::Between {
                previous: 0,
                next: 2
            }
        );
        assert_eq!(t.cursor(), 0);
        assert_eq!(t.resolve(2.0, 0, inc), Resolution::Exact(2));
        assert_eq!(t.resolve(3.0, 0, inc), Resolution::MissingEnd);
        assert_eq!(t.cursor(), 4);
    }

    #[test]
    fn leading_nan_rows_still_report_missing_start() {
        let nan = f64::NAN;
        let mut t = track(&[(nan, 0.0), (5.0, 1.0)]);
        assert_eq!(t.resolve(1.0, 0, Direction::Increasing), Resolution::MissingStart);
        assert_eq!(t.cursor(), 0);
    }

    #[test]
    fn trimming_narrows_window() {
        let nan = f64::NAN;
        let mut t = track(&[(nan, 1.0), (1.0, nan), (2.0, 2.0), (3.0, nan), (nan, nan)]);
        t.trim_nans(Some(0), None);
        assert_eq!(t.window(), (1, 4));
        t.trim_nans(Some(0), Some(1));
        assert_eq!(t.window(), (2, 3));
        assert_eq!(t.cursor(), 2);

        let mut all_nan = track(&[(nan, nan), (nan, nan)]);
        all_nan.trim_nans(None, Some(1));
        assert!(all_nan.is_empty());
    }

    #[test]
    fn empty_window_never_resolves() {
        let mut t = track(&[]);
        assert_eq!(t.resolve(1.0, 0, Direction::Increasing), Resolution::Empty);
        assert_eq!(t.peek_beyond::<f64>(0, None, Direction::Increasing), None);
    }
}
