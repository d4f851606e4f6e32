use super::SelectionContext;
use crate::engine::predicates::Predicate;

/// Supplies the next decision of the search loop.
///
/// A brancher must be total: while any variable it is responsible for is unfixed it must return
/// a decision, and the returned predicate must not already be satisfied. It must not mutate any
/// domain; decisions are applied by the solver.
pub trait Brancher {
    /// Returns the next decision, or `None` when every variable this brancher considers is
    /// fixed.
    fn next_decision(&mut self, context: &mut SelectionContext<'_>) -> Option<Predicate>;
}
