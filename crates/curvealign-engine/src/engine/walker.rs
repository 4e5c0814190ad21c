//! Typed stepping logic shared by the integer and double lanes.

use super::lane::RunValue;
use super::track::{Resolution, Track};
use crate::config::AlignSettings;
use crate::error::AlignError;
use crate::policy::{Boundary, Fill};
use crate::state::StepState;

pub(crate) struct Walker<T: RunValue> {
    tracks: Vec<Track>,
    settings: AlignSettings,
    current: Option<T>,
}

impl<T: RunValue> Walker<T> {
    pub(crate) fn new(tracks: Vec<Track>, settings: AlignSettings) -> Self {
        Self {
            tracks,
            settings,
            current: None,
        }
    }

    pub(crate) fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// The next `x` to visit: the walk-order first of every track's first
    /// value beyond the current `x`. Before the first step there is no
    /// current `x`, so each track offers its first sample.
    fn next_goal(&self) -> Option<T> {
        let s = &self.settings;
        self.tracks
            .iter()
            .filter_map(|t| t.peek_beyond(s.x_column, self.current, s.direction))
            .reduce(|a, b| s.direction.first_of(a, b))
    }

    /// Compute the next step into `state`. Returns `Ok(false)` once no track
    /// has anything beyond the last visited `x`.
    pub(crate) fn advance(&mut self, state: &mut StepState) -> Result<bool, AlignError> {
        let Some(goal) = self.next_goal() else {
            return Ok(false);
        };
        self.current = Some(goal);
        state.begin();
        goal.store(state.cursor_mut());

        let s = &self.settings;
        for track in self.tracks.iter_mut() {
            let y: Option<T> = match track.resolve(goal, s.x_column, s.direction) {
                Resolution::Exact(row) => Some(read_y(s, track, row)?),
                Resolution::Between { previous, next } => {
                    Some(read_y(s, track, s.mode.pick(previous, next))?)
                }
                Resolution::MissingStart => fill_missing(s, track, Boundary::Start)?,
                Resolution::MissingEnd => fill_missing(s, track, Boundary::End)?,
                Resolution::Empty => None,
            };
            if let Some(y) = y {
                y.push(state.row_mut(), track.source);
            }
        }
        state.finish();
        Ok(true)
    }
}

fn fill_missing<T: RunValue>(
    s: &AlignSettings,
    track: &Track,
    boundary: Boundary,
) -> Result<Option<T>, AlignError> {
    let row = match boundary {
        Boundary::Start => track.first_row(),
        Boundary::End => track.last_row(),
    };
    match s.missing_mode(boundary).fill(row) {
        None => Ok(None),
        Some(Fill::Row(row)) => read_y(s, track, row).map(Some),
        Some(Fill::Replacement) => Ok(s.replacement(boundary).map(T::from_scalar)),
    }
}

fn read_y<T: RunValue>(s: &AlignSettings, track: &Track, row: usize) -> Result<T, AlignError> {
    let y: T = track.read(row, s.y_column);
    if !y.is_nan() {
        return Ok(y);
    }
    if let Some(replacement) = s.y_nan_replacement {
        return Ok(T::from_f64(replacement));
    }
    if s.skip_leading_trailing_y_nans {
        return Ok(y);
    }
    Err(AlignError::UnexpectedNan {
        matrix: track.source,
        row,
        column: s.y_column,
    })
}
