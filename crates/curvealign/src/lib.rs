//! Align several sorted `(x, y)` series on the union of their `x` values.
//!
//! This crate bundles the matrix types from `curvealign-common` and the
//! alignment engine from `curvealign-engine`. Build an [`AlignConfig`],
//! then either drive an [`AlignEngine`] with a [`Visitor`] or call
//! [`collect_steps`] / [`aggregate`] for the common cases. The `serde` and
//! `json` features make settings and step snapshots serializable; `tracing`
//! (on by default) emits run and step events.

#[cfg(feature = "common")]
pub use curvealign_common as common;

#[cfg(feature = "engine")]
pub use curvealign_engine as engine;

#[cfg(feature = "common")]
pub use curvealign_common::{DenseMatrix, Lane, Matrix, MatrixBuilder, MatrixError, Scalar};

#[cfg(feature = "engine")]
pub use curvealign_engine::{
    Aggregate, AggregatingVisitor, AlignConfig, AlignConfigBuilder, AlignEngine, AlignError,
    AlignSettings, Boundary, ConfigError, ConfigIssue, Direction, IterationMode,
    MissingValueMode, Phase, RunSummary, StepSnapshot, StepState, Visitor, aggregate,
    collect_steps,
};
