use crate::state::StepState;

/// Receives one call per aligned `x`.
///
/// Returning `false` ends the run early; that is not an error.
pub trait Visitor {
    fn visit(&mut self, state: &StepState) -> bool;
}

impl<F> Visitor for F
where
    F: FnMut(&StepState) -> bool,
{
    #[inline]
    fn visit(&mut self, state: &StepState) -> bool {
        self(state)
    }
}
