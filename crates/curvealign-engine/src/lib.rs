//! Synchronized alignment of several sorted `(x, y)` series.
//!
//! An [`AlignConfig`] names the source matrices, the columns holding `x` and
//! `y`, and the policies for interpolation and for values missing at either
//! end of a series. [`AlignEngine`] then walks the union of all `x` values in
//! the configured direction and hands each step to a [`Visitor`].

pub mod collect;
pub mod config;
pub mod cursor;
pub mod error;
pub mod policy;
pub mod row;
pub mod state;
pub mod visitor;

pub mod engine;

pub use collect::{Aggregate, AggregatingVisitor, aggregate, collect_steps};
pub use config::{AlignConfig, AlignConfigBuilder, AlignSettings};
pub use cursor::NumericCursor;
pub use engine::{AlignEngine, Phase, RunSummary, new_engine};
pub use error::{AlignError, Axis, ConfigError, ConfigIssue};
pub use policy::{Boundary, Direction, IterationMode, MissingValueMode};
pub use row::{RowAccumulator, RowValues};
pub use state::{StepSnapshot, StepState};
pub use visitor::Visitor;

pub use curvealign_common::{DenseMatrix, Matrix, MatrixBuilder, Scalar};
