//! Ready-made consumers for common alignment runs.
//!
//! [`collect_steps`] keeps every step as an owned [`StepSnapshot`];
//! [`aggregate`] reduces each step to one output row of summary statistics,
//! which is the usual way to merge convergence curves of independent runs.

use std::fmt;

use curvealign_common::{DenseMatrix, MatrixBuilder, MatrixError};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::AlignConfig;
use crate::engine::AlignEngine;
use crate::error::AlignError;
use crate::state::{StepSnapshot, StepState};
use crate::visitor::Visitor;

/// Run `config` to completion and keep a snapshot of every step.
pub fn collect_steps(config: AlignConfig) -> Result<Vec<StepSnapshot>, AlignError> {
    let mut steps = Vec::new();
    AlignEngine::new(config).run(&mut |s: &StepState| {
        steps.push(s.snapshot());
        true
    })?;
    Ok(steps)
}

/// Summary statistic over the values contributed at one step.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Aggregate {
    Count,
    Min,
    Max,
    Mean,
    /// Middle value; the mean of the two middle values for an even count.
    Median,
}

impl Aggregate {
    /// Reduce `values`. Every statistic but `Count` is NaN for no values.
    pub fn apply(self, values: &[f64]) -> f64 {
        if values.is_empty() {
            return match self {
                Aggregate::Count => 0.0,
                _ => f64::NAN,
            };
        }
        match self {
            Aggregate::Count => values.len() as f64,
            Aggregate::Min => values.iter().copied().fold(f64::INFINITY, f64::min),
            Aggregate::Max => values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            Aggregate::Mean => values.iter().sum::<f64>() / values.len() as f64,
            Aggregate::Median => {
                let mut sorted = values.to_vec();
                sorted.sort_by(|a, b| a.total_cmp(b));
                let mid = sorted.len() / 2;
                if sorted.len() % 2 == 0 {
                    (sorted[mid - 1] + sorted[mid]) / 2.0
                } else {
                    sorted[mid]
                }
            }
        }
    }
}

impl fmt::Display for Aggregate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Aggregate::Count => "count",
            Aggregate::Min => "min",
            Aggregate::Max => "max",
            Aggregate::Mean => "mean",
            Aggregate::Median => "median",
        })
    }
}

/// Visitor that writes `[x, agg_1, .., agg_k]` for every step.
///
/// Output rows go through a [`MatrixBuilder`], so the result stays in the
/// long lane as long as every written value is integral.
#[derive(Debug, Clone)]
pub struct AggregatingVisitor {
    aggregates: Vec<Aggregate>,
    out: MatrixBuilder,
    scratch: Vec<f64>,
}

impl AggregatingVisitor {
    pub fn new(aggregates: impl Into<Vec<Aggregate>>) -> Self {
        let aggregates = aggregates.into();
        let out = MatrixBuilder::new(aggregates.len() + 1);
        Self {
            aggregates,
            out,
            scratch: Vec::new(),
        }
    }

    pub fn aggregates(&self) -> &[Aggregate] {
        &self.aggregates
    }

    /// Rows written so far.
    pub fn rows(&self) -> usize {
        self.out.rows()
    }

    pub fn finish(self) -> Result<DenseMatrix, MatrixError> {
        self.out.finish()
    }
}

impl Visitor for AggregatingVisitor {
    fn visit(&mut self, state: &StepState) -> bool {
        self.out.push_scalar(state.x());
        state.row().fill_f64(&mut self.scratch);
        for agg in &self.aggregates {
            self.out.push_double(agg.apply(&self.scratch));
        }
        true
    }
}

/// Align `config` and reduce every step with `aggregates`.
///
/// Column 0 of the result holds `x`; column `i + 1` holds `aggregates[i]`.
pub fn aggregate(
    config: AlignConfig,
    aggregates: &[Aggregate],
) -> Result<DenseMatrix, AlignError> {
    let mut visitor = AggregatingVisitor::new(aggregates);
    AlignEngine::new(config).run(&mut visitor)?;
    Ok(visitor.finish()?)
}
