//! Stateless iteration policies.
//!
//! Each policy is a closed enum whose behaviour is a pure function of the
//! variant; the engine only ever asks them questions, it never stores state in
//! them.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Order in which the union of `x` values is walked.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    #[default]
    Increasing,
    Decreasing,
}

impl Direction {
    /// `true` if `a` lies strictly beyond `goal` in walk order.
    ///
    /// Comparisons involving NaN are false, so a NaN never passes anything.
    #[inline]
    pub fn passes<T: PartialOrd>(self, a: T, goal: T) -> bool {
        match self {
            Direction::Increasing => a > goal,
            Direction::Decreasing => a < goal,
        }
    }

    /// Whichever of `a` and `b` is visited first.
    #[inline]
    pub fn first_of<T: PartialOrd + Copy>(self, a: T, b: T) -> T {
        if self.passes(a, b) { b } else { a }
    }

    /// Cheap monotonicity check on the first and last sample of a column.
    #[inline]
    pub fn is_ordered<T: PartialOrd>(self, first: T, last: T) -> bool {
        !self.passes(first, last)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::Increasing => "increasing",
            Direction::Decreasing => "decreasing",
        })
    }
}

/// What a series contributes at an `x` that falls between two of its samples.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IterationMode {
    /// Use the sample that comes next in walk order.
    PreviewNext,
    /// Hold the sample that was seen last.
    #[default]
    KeepPrevious,
}

impl IterationMode {
    /// Row to read for an `x` strictly between `previous` and `next`.
    #[inline]
    pub fn pick(self, previous: usize, next: usize) -> usize {
        match self {
            IterationMode::PreviewNext => next,
            IterationMode::KeepPrevious => previous,
        }
    }
}

impl fmt::Display for IterationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            IterationMode::PreviewNext => "preview-next",
            IterationMode::KeepPrevious => "keep-previous",
        })
    }
}

/// Handling of an `x` before a series' first sample or after its last one.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MissingValueMode {
    /// The series does not contribute.
    Skip,
    /// Fall back to the boundary sample, as the iteration mode would.
    UseIterationMode,
    /// Contribute a fixed replacement value.
    SetToValue,
}

/// Either end of a series.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Boundary {
    Start,
    End,
}

impl fmt::Display for Boundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Boundary::Start => "start",
            Boundary::End => "end",
        })
    }
}

/// Where a missing contribution comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Fill {
    Row(usize),
    Replacement,
}

impl MissingValueMode {
    pub const START_DEFAULT: Self = MissingValueMode::Skip;
    pub const END_DEFAULT: Self = MissingValueMode::UseIterationMode;

    /// `true` if the mode needs a replacement value to be configured.
    #[inline]
    pub fn needs_replacement(self) -> bool {
        matches!(self, MissingValueMode::SetToValue)
    }

    /// The iteration mode this variant is compatible with at `boundary`,
    /// or `None` if it works with either.
    pub fn required_iteration_mode(self, boundary: Boundary) -> Option<IterationMode> {
        match (self, boundary) {
            (MissingValueMode::UseIterationMode, Boundary::Start) => {
                Some(IterationMode::PreviewNext)
            }
            (MissingValueMode::UseIterationMode, Boundary::End) => {
                Some(IterationMode::KeepPrevious)
            }
            _ => None,
        }
    }

    /// Resolve a missing value given the boundary row of the series.
    #[inline]
    pub(crate) fn fill(self, boundary_row: usize) -> Option<Fill> {
        match self {
            MissingValueMode::Skip => None,
            MissingValueMode::UseIterationMode => Some(Fill::Row(boundary_row)),
            MissingValueMode::SetToValue => Some(Fill::Replacement),
        }
    }
}

impl fmt::Display for MissingValueMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MissingValueMode::Skip => "skip",
            MissingValueMode::UseIterationMode => "use-iteration-mode",
            MissingValueMode::SetToValue => "set-to-value",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_passes_is_strict() {
        assert!(Direction::Increasing.passes(2, 1));
        assert!(!Direction::Increasing.passes(1, 1));
        assert!(Direction::Decreasing.passes(0.5, 1.0));
        assert!(!Direction::Decreasing.passes(1.0, 1.0));
        assert!(!Direction::Increasing.passes(f64::NAN, 0.0));
        assert!(!Direction::Decreasing.passes(f64::NAN, 0.0));
    }

    #[test]
    fn first_of_follows_walk_order() {
        assert_eq!(Direction::Increasing.first_of(3, 7), 3);
        assert_eq!(Direction::Increasing.first_of(7, 3), 3);
        assert_eq!(Direction::Decreasing.first_of(3.0, f64::INFINITY), f64::INFINITY);
    }

    #[test]
    fn ordered_allows_constant_columns() {
        assert!(Direction::Increasing.is_ordered(1, 1));
        assert!(Direction::Increasing.is_ordered(1, 5));
        assert!(!Direction::Increasing.is_ordered(5, 1));
        assert!(Direction::Decreasing.is_ordered(5, 1));
    }

    #[test]
    fn pick_respects_mode() {
        assert_eq!(IterationMode::PreviewNext.pick(3, 4), 4);
        assert_eq!(IterationMode::KeepPrevious.pick(3, 4), 3);
        assert_eq!(IterationMode::default(), IterationMode::KeepPrevious);
    }

    #[test]
    fn missing_value_fill() {
        assert_eq!(MissingValueMode::Skip.fill(0), None);
        assert_eq!(MissingValueMode::UseIterationMode.fill(9), Some(Fill::Row(9)));
        assert_eq!(MissingValueMode::SetToValue.fill(9), Some(Fill::Replacement));
        assert_eq!(
            MissingValueMode::UseIterationMode.required_iteration_mode(Boundary::Start),
            Some(IterationMode::PreviewNext)
        );
        assert_eq!(
            MissingValueMode::UseIterationMode.required_iteration_mode(Boundary::End),
            Some(IterationMode::KeepPrevious)
        );
        assert_eq!(MissingValueMode::Skip.required_iteration_mode(Boundary::Start), None);
    }
}
