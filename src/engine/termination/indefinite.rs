use super::TerminationCondition;

/// A [`TerminationCondition`] which never signals; the search runs to completion.
#[derive(Clone, Copy, Debug)]
pub struct Indefinite;

impl TerminationCondition for Indefinite {
    fn should_stop(&mut self) -> bool {
        false
    }
}
