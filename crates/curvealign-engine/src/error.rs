//! Configuration and run-time errors.
//!
//! Configuration problems are collected into a single [`ConfigError`] so a
//! caller sees every issue at once. The run itself only fails on malformed
//! data ([`AlignError::UnexpectedNan`]).

use std::fmt;

use curvealign_common::{MatrixError, Scalar};
use thiserror::Error;

use crate::policy::{Boundary, Direction, IterationMode, MissingValueMode};

/// Which column of a source matrix an issue refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Axis::X => "x",
            Axis::Y => "y",
        })
    }
}

/// One violated configuration constraint.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigIssue {
    #[error("at least one source matrix is required")]
    NoMatrices,
    #[error("matrix {matrix}: {axis} column {column} is out of range ({cols} columns)")]
    ColumnOutOfRange {
        matrix: usize,
        axis: Axis,
        column: usize,
        cols: usize,
    },
    #[error("matrix {matrix}: x column runs from {first} to {last}, which is not {direction}")]
    NotMonotone {
        matrix: usize,
        direction: Direction,
        first: Scalar,
        last: Scalar,
    },
    #[error("{boundary} mode {missing} requires iteration mode {required}, found {found}")]
    IncompatibleModes {
        boundary: Boundary,
        missing: MissingValueMode,
        required: IterationMode,
        found: IterationMode,
    },
    #[error(
        "{boundary} mode {} needs {boundary}_replacement to be set",
        MissingValueMode::SetToValue
    )]
    MissingReplacement { boundary: Boundary },
    #[error("{boundary}_replacement {value} is set but {boundary} mode is {mode}")]
    UnexpectedReplacement {
        boundary: Boundary,
        mode: MissingValueMode,
        value: Scalar,
    },
}

/// Every issue found while validating a configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigError {
    issues: Vec<ConfigIssue>,
}

impl ConfigError {
    pub fn new(issues: Vec<ConfigIssue>) -> Self {
        Self { issues }
    }

    pub fn issues(&self) -> &[ConfigIssue] {
        &self.issues
    }

    pub fn into_issues(self) -> Vec<ConfigIssue> {
        self.issues
    }

    /// `true` if any collected issue satisfies `pred`.
    pub fn has(&self, pred: impl Fn(&ConfigIssue) -> bool) -> bool {
        self.issues.iter().any(pred)
    }
}

impl From<ConfigIssue> for ConfigError {
    fn from(issue: ConfigIssue) -> Self {
        Self::new(vec![issue])
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid alignment configuration")?;
        for (i, issue) in self.issues.iter().enumerate() {
            let sep = if i == 0 { ": " } else { "; " };
            write!(f, "{sep}{issue}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Error)]
pub enum AlignError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// A NaN turned up in a `y` column that neither skips nor replaces NaNs.
    #[error("matrix {matrix}: unexpected NaN in column {column} at row {row}")]
    UnexpectedNan {
        matrix: usize,
        row: usize,
        column: usize,
    },
    #[error(transparent)]
    Matrix(#[from] MatrixError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_lists_every_issue() {
        let err = ConfigError::new(vec![
            ConfigIssue::NoMatrices,
            ConfigIssue::MissingReplacement {
                boundary: Boundary::End,
            },
        ]);
        assert_eq!(
            err.to_string(),
            "invalid alignment configuration: at least one source matrix is required; \
             end mode set-to-value needs end_replacement to be set"
        );
        assert!(err.has(|i| matches!(i, ConfigIssue::NoMatrices)));
    }

    #[test]
    fn incompatible_modes_message() {
        let issue = ConfigIssue::IncompatibleModes {
            boundary: Boundary::Start,
            missing: MissingValueMode::UseIterationMode,
            required: IterationMode::PreviewNext,
            found: IterationMode::KeepPrevious,
        };
        assert_eq!(
            issue.to_string(),
            "start mode use-iteration-mode requires iteration mode preview-next, found keep-previous"
        );
    }
}
