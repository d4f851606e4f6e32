pub mod solution_iterator;

pub use crate::basic_types::Solution;
#[cfg(doc)]
use crate::termination::TerminationCondition;
#[cfg(doc)]
use crate::Solver;

/// The result of a call to [`Solver::satisfy`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SatisfactionResult {
    /// Indicates that a solution was found; the solution is a snapshot and remains valid when
    /// the search moves on.
    Satisfiable(Solution),
    /// Indicates that there is no (further) solution to the satisfaction problem.
    Unsatisfiable,
    /// Indicates that it is not known whether a solution exists. This is likely due to a
    /// [`TerminationCondition`] triggering.
    Unknown,
}
