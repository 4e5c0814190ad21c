//! Alignment engine
//!
//! Drives one single-pass walk over the union of all source `x` values.

mod lane;
mod track;
mod walker;

#[cfg(test)]
mod tests;

#[cfg(feature = "tracing")]
use curvealign_common::Matrix;

use crate::config::AlignConfig;
use crate::error::AlignError;
use crate::state::StepState;
use crate::visitor::Visitor;

use lane::integer_run;
use track::Track;
use walker::Walker;

/// Where an engine is in its single pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No step computed yet.
    Start,
    /// At least one step has been produced and more may follow.
    Stepping,
    /// Terminal: exhausted, stopped by the visitor, or failed.
    Done,
}

/// Outcome of [`AlignEngine::run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of steps handed to the visitor.
    pub steps: usize,
    /// `true` if `x` and `y` were read as 64-bit integers.
    pub integer_mode: bool,
    /// `true` if the visitor returned `false` before the walk was exhausted.
    pub stopped_early: bool,
}

enum Run {
    Long(Walker<i64>),
    Double(Walker<f64>),
}

/// Stateful driver for one alignment run.
///
/// Construct it from a validated [`AlignConfig`], then either pull steps with
/// [`next_step`](Self::next_step) or push them into a [`Visitor`] with
/// [`run`](Self::run). The engine is single use; once [`Phase::Done`] is
/// reached it yields nothing more.
pub struct AlignEngine {
    config: AlignConfig,
    run: Run,
    state: StepState,
    phase: Phase,
}

impl AlignEngine {
    pub fn new(config: AlignConfig) -> Self {
        let s = config.settings().clone();
        let integer = integer_run(
            config.matrices(),
            s.x_column,
            s.y_column,
            [s.start_replacement, s.end_replacement],
        );

        let x_trim = s.skip_leading_trailing_x_nans.then_some(s.x_column);
        let y_trim = s.skip_leading_trailing_y_nans.then_some(s.y_column);
        let tracks: Vec<Track> = config
            .matrices()
            .iter()
            .enumerate()
            .map(|(idx, m)| {
                let mut track = Track::new(idx, m.clone());
                if s.trims_nans() {
                    track.trim_nans(x_trim, y_trim);
                }
                track
            })
            .collect();

        #[cfg(feature = "tracing")]
        {
            let total_rows: usize = config.matrices().iter().map(|m| m.rows()).sum();
            tracing::debug!(
                matrices = tracks.len(),
                total_rows,
                integer_mode = integer,
                direction = %s.direction,
                mode = %s.mode,
                "align_engine_init"
            );
            for t in tracks.iter() {
                let (start, end) = t.window();
                if start != 0 || end != config.matrices()[t.source].rows() {
                    tracing::debug!(matrix = t.source, start, end, "nan_trimmed_window");
                }
            }
        }

        let matrices = tracks.len();
        let run = if integer {
            Run::Long(Walker::new(tracks, s))
        } else {
            Run::Double(Walker::new(tracks, s))
        };
        Self {
            config,
            run,
            state: StepState::new(integer, matrices),
            phase: Phase::Start,
        }
    }

    pub fn config(&self) -> &AlignConfig {
        &self.config
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// `true` if the run reads values as 64-bit integers.
    #[inline]
    pub fn is_integer(&self) -> bool {
        matches!(self.run, Run::Long(_))
    }

    /// Steps produced so far.
    #[inline]
    pub fn steps(&self) -> usize {
        self.state.step()
    }

    fn tracks(&self) -> &[Track] {
        match &self.run {
            Run::Long(w) => w.tracks(),
            Run::Double(w) => w.tracks(),
        }
    }

    /// Current per-matrix cursor rows, indexed by source matrix.
    pub fn cursors(&self) -> Vec<usize> {
        self.tracks().iter().map(|t| t.cursor()).collect()
    }

    /// Active `[start, end)` row window of every matrix after NaN trimming.
    pub fn windows(&self) -> Vec<(usize, usize)> {
        self.tracks().iter().map(|t| t.window()).collect()
    }

    /// Produce the next step, or `Ok(None)` once the walk is over.
    ///
    /// The returned state is overwritten by the following call.
    pub fn next_step(&mut self) -> Result<Option<&StepState>, AlignError> {
        if self.phase == Phase::Done {
            return Ok(None);
        }
        let advanced = match &mut self.run {
            Run::Long(w) => w.advance(&mut self.state),
            Run::Double(w) => w.advance(&mut self.state),
        };
        match advanced {
            Ok(true) => {
                self.phase = Phase::Stepping;
                #[cfg(feature = "tracing")]
                tracing::trace!(
                    step = self.state.step(),
                    x = %self.state.x(),
                    contributing = self.state.len(),
                    "align_step"
                );
                Ok(Some(&self.state))
            }
            Ok(false) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(steps = self.state.step(), "align_exhausted");
                self.phase = Phase::Done;
                Ok(None)
            }
            Err(e) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(error = %e, step = self.state.step(), "align_failed");
                self.phase = Phase::Done;
                Err(e)
            }
        }
    }

    /// Walk every step through `visitor` until it returns `false` or the
    /// walk is exhausted.
    pub fn run<V: Visitor + ?Sized>(mut self, visitor: &mut V) -> Result<RunSummary, AlignError> {
        #[cfg(feature = "tracing")]
        let _span = tracing::info_span!(
            "align_run",
            matrices = self.config.matrices().len(),
            integer_mode = self.is_integer()
        )
        .entered();

        let mut stopped_early = false;
        while let Some(state) = self.next_step()? {
            if !visitor.visit(state) {
                stopped_early = true;
                self.phase = Phase::Done;
                #[cfg(feature = "tracing")]
                tracing::debug!(steps = self.state.step(), "align_stopped_by_visitor");
                break;
            }
        }
        Ok(RunSummary {
            steps: self.state.step(),
            integer_mode: self.is_integer(),
            stopped_early,
        })
    }
}

/// Construct a new engine for the given configuration
pub fn new_engine(config: AlignConfig) -> AlignEngine {
    AlignEngine::new(config)
}
