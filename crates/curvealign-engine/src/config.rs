//! Alignment configuration.
//!
//! [`AlignSettings`] holds every policy knob and nothing else, so it can be
//! stored next to experiment data and reused across matrix sets.
//! [`AlignConfig`] pairs settings with the source matrices and is only ever
//! handed out after [`AlignConfig::validate`] has passed.

use std::fmt;
use std::sync::Arc;

use curvealign_common::{Matrix, Scalar};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Axis, ConfigError, ConfigIssue};
use crate::policy::{Boundary, Direction, IterationMode, MissingValueMode};

/// Policy part of an alignment configuration.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq)]
pub struct AlignSettings {
    pub x_column: usize,
    pub y_column: usize,
    pub direction: Direction,
    pub mode: IterationMode,
    pub start_mode: MissingValueMode,
    pub end_mode: MissingValueMode,
    pub start_replacement: Option<Scalar>,
    pub end_replacement: Option<Scalar>,
    pub skip_leading_trailing_x_nans: bool,
    pub skip_leading_trailing_y_nans: bool,
    pub y_nan_replacement: Option<f64>,
}

impl Default for AlignSettings {
    fn default() -> Self {
        Self {
            x_column: 0,
            y_column: 1,
            direction: Direction::default(),
            mode: IterationMode::default(),
            start_mode: MissingValueMode::START_DEFAULT,
            end_mode: MissingValueMode::END_DEFAULT,
            start_replacement: None,
            end_replacement: None,
            skip_leading_trailing_x_nans: false,
            skip_leading_trailing_y_nans: false,
            y_nan_replacement: None,
        }
    }
}

impl AlignSettings {
    pub fn missing_mode(&self, boundary: Boundary) -> MissingValueMode {
        match boundary {
            Boundary::Start => self.start_mode,
            Boundary::End => self.end_mode,
        }
    }

    pub fn replacement(&self, boundary: Boundary) -> Option<Scalar> {
        match boundary {
            Boundary::Start => self.start_replacement,
            Boundary::End => self.end_replacement,
        }
    }

    /// `true` when either NaN trimming flag is set.
    #[inline]
    pub fn trims_nans(&self) -> bool {
        self.skip_leading_trailing_x_nans || self.skip_leading_trailing_y_nans
    }

    /// Check the constraints that do not depend on any matrix: mode
    /// combinations and the presence of replacement values.
    pub fn validate_modes(&self) -> Result<(), ConfigError> {
        let mut issues = Vec::new();
        self.collect_mode_issues(&mut issues);
        if issues.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::new(issues))
        }
    }

    fn collect_mode_issues(&self, issues: &mut Vec<ConfigIssue>) {
        for boundary in [Boundary::Start, Boundary::End] {
            let missing = self.missing_mode(boundary);
            if let Some(required) = missing.required_iteration_mode(boundary) {
                if required != self.mode {
                    issues.push(ConfigIssue::IncompatibleModes {
                        boundary,
                        missing,
                        required,
                        found: self.mode,
                    });
                }
            }
            match (missing.needs_replacement(), self.replacement(boundary)) {
                (true, None) => issues.push(ConfigIssue::MissingReplacement { boundary }),
                (false, Some(value)) => issues.push(ConfigIssue::UnexpectedReplacement {
                    boundary,
                    mode: missing,
                    value,
                }),
                _ => {}
            }
        }
    }

    #[cfg(feature = "json")]
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[cfg(feature = "json")]
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Validated source matrices plus settings.
///
/// Cheap to clone: matrices are shared, never copied.
#[derive(Clone)]
pub struct AlignConfig {
    matrices: Vec<Arc<dyn Matrix>>,
    settings: AlignSettings,
}

impl fmt::Debug for AlignConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dims: Vec<(usize, usize)> =
            self.matrices.iter().map(|m| (m.rows(), m.cols())).collect();
        f.debug_struct("AlignConfig")
            .field("matrices", &dims)
            .field("settings", &self.settings)
            .finish()
    }
}

impl AlignConfig {
    pub fn builder() -> AlignConfigBuilder {
        AlignConfigBuilder::default()
    }

    /// Validate and bundle matrices with settings.
    pub fn new(
        matrices: Vec<Arc<dyn Matrix>>,
        settings: AlignSettings,
    ) -> Result<Self, ConfigError> {
        let config = Self { matrices, settings };
        config.validate()?;
        Ok(config)
    }

    pub fn matrices(&self) -> &[Arc<dyn Matrix>] {
        &self.matrices
    }

    pub fn settings(&self) -> &AlignSettings {
        &self.settings
    }

    /// Consume the config and return owned components.
    pub fn into_parts(self) -> (Vec<Arc<dyn Matrix>>, AlignSettings) {
        (self.matrices, self.settings)
    }

    /// Run every configuration check and report all failures together.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut issues = Vec::new();
        let s = &self.settings;

        if self.matrices.is_empty() {
            issues.push(ConfigIssue::NoMatrices);
        }

        for (idx, m) in self.matrices.iter().enumerate() {
            let cols = m.cols();
            let mut columns_ok = true;
            for (axis, column) in [(Axis::X, s.x_column), (Axis::Y, s.y_column)] {
                if column >= cols {
                    columns_ok = false;
                    issues.push(ConfigIssue::ColumnOutOfRange {
                        matrix: idx,
                        axis,
                        column,
                        cols,
                    });
                }
            }
            if columns_ok {
                if let Some(issue) = monotone_issue(idx, &**m, s.x_column, s.direction) {
                    issues.push(issue);
                }
            }
        }

        s.collect_mode_issues(&mut issues);

        if issues.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::new(issues))
        }
    }
}

/// Compare the first and last non-NaN `x` of a matrix against `direction`.
fn monotone_issue(
    idx: usize,
    m: &dyn Matrix,
    x_column: usize,
    direction: Direction,
) -> Option<ConfigIssue> {
    let rows = m.rows();
    if rows < 2 {
        return None;
    }
    if m.is_integer() {
        let (first, last) = (m.get_long(0, x_column), m.get_long(rows - 1, x_column));
        if direction.is_ordered(first, last) {
            return None;
        }
        return Some(ConfigIssue::NotMonotone {
            matrix: idx,
            direction,
            first: Scalar::Long(first),
            last: Scalar::Long(last),
        });
    }
    let is_sample = |r: &usize| !m.get_double(*r, x_column).is_nan();
    let first = (0..rows).find(is_sample)?;
    let last = (0..rows).rev().find(is_sample)?;
    let (a, b) = (m.get_double(first, x_column), m.get_double(last, x_column));
    if direction.is_ordered(a, b) {
        None
    } else {
        Some(ConfigIssue::NotMonotone {
            matrix: idx,
            direction,
            first: Scalar::Double(a),
            last: Scalar::Double(b),
        })
    }
}

/// Chained construction of an [`AlignConfig`].
///
/// Setters never fail; [`build`](Self::build) validates everything at once.
#[derive(Default, Clone)]
pub struct AlignConfigBuilder {
    matrices: Vec<Arc<dyn Matrix>>,
    settings: AlignSettings,
}

impl AlignConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn matrix<M: Matrix + 'static>(mut self, matrix: M) -> Self {
        self.matrices.push(Arc::new(matrix));
        self
    }

    pub fn shared_matrix(mut self, matrix: Arc<dyn Matrix>) -> Self {
        self.matrices.push(matrix);
        self
    }

    pub fn matrices<I, M>(mut self, matrices: I) -> Self
    where
        I: IntoIterator<Item = M>,
        M: Matrix + 'static,
    {
        self.matrices
            .extend(matrices.into_iter().map(|m| Arc::new(m) as Arc<dyn Matrix>));
        self
    }

    pub fn shared_matrices<I>(mut self, matrices: I) -> Self
    where
        I: IntoIterator<Item = Arc<dyn Matrix>>,
    {
        self.matrices.extend(matrices);
        self
    }

    /// Replace every policy setting at once.
    pub fn settings(mut self, settings: AlignSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn x_column(mut self, column: usize) -> Self {
        self.settings.x_column = column;
        self
    }

    pub fn y_column(mut self, column: usize) -> Self {
        self.settings.y_column = column;
        self
    }

    pub fn direction(mut self, direction: Direction) -> Self {
        self.settings.direction = direction;
        self
    }

    pub fn mode(mut self, mode: IterationMode) -> Self {
        self.settings.mode = mode;
        self
    }

    pub fn start_mode(mut self, mode: MissingValueMode) -> Self {
        self.settings.start_mode = mode;
        self
    }

    pub fn end_mode(mut self, mode: MissingValueMode) -> Self {
        self.settings.end_mode = mode;
        self
    }

    pub fn start_replacement(mut self, value: impl Into<Scalar>) -> Self {
        self.settings.start_replacement = Some(value.into());
        self
    }

    pub fn end_replacement(mut self, value: impl Into<Scalar>) -> Self {
        self.settings.end_replacement = Some(value.into());
        self
    }

    /// Shorthand for `start_mode(SetToValue)` plus `start_replacement`.
    pub fn start_value(self, value: impl Into<Scalar>) -> Self {
        self.start_mode(MissingValueMode::SetToValue)
            .start_replacement(value)
    }

    /// Shorthand for `end_mode(SetToValue)` plus `end_replacement`.
    pub fn end_value(self, value: impl Into<Scalar>) -> Self {
        self.end_mode(MissingValueMode::SetToValue).end_replacement(value)
    }

    pub fn skip_leading_trailing_x_nans(mut self, skip: bool) -> Self {
        self.settings.skip_leading_trailing_x_nans = skip;
        self
    }

    pub fn skip_leading_trailing_y_nans(mut self, skip: bool) -> Self {
        self.settings.skip_leading_trailing_y_nans = skip;
        self
    }

    pub fn y_nan_replacement(mut self, value: f64) -> Self {
        self.settings.y_nan_replacement = Some(value);
        self
    }

    pub fn build(self) -> Result<AlignConfig, ConfigError> {
        AlignConfig::new(self.matrices, self.settings)
    }
}
