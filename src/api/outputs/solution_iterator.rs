//! Contains the structures corresponding to solution iterations.

use std::fmt::Debug;

use super::SatisfactionResult;
use crate::basic_types::Solution;
use crate::branching::Brancher;
use crate::termination::TerminationCondition;
use crate::Solver;

/// A struct which allows the retrieval of multiple solutions to a satisfaction problem.
///
/// The iterator resumes the search past each solution rather than posting blocking
/// constraints, so the solver enumerates every solution exactly once and is exhausted when
/// [`IteratedSolution::Finished`] is returned.
#[derive(Debug)]
pub struct SolutionIterator<'solver, 'brancher, 'termination, B, T> {
    solver: &'solver mut Solver,
    brancher: &'brancher mut B,
    termination: &'termination mut T,
    has_solution: bool,
}

impl<'solver, 'brancher, 'termination, B: Brancher, T: TerminationCondition>
    SolutionIterator<'solver, 'brancher, 'termination, B, T>
{
    pub(crate) fn new(
        solver: &'solver mut Solver,
        brancher: &'brancher mut B,
        termination: &'termination mut T,
    ) -> Self {
        SolutionIterator {
            solver,
            brancher,
            termination,
            has_solution: false,
        }
    }

    /// Find the next solution, resuming the search from where the previous call left off.
    pub fn next_solution(&mut self) -> IteratedSolution {
        match self.solver.satisfy(self.brancher, self.termination) {
            SatisfactionResult::Satisfiable(solution) => {
                self.has_solution = true;
                IteratedSolution::Solution(solution)
            }
            SatisfactionResult::Unsatisfiable => {
                if self.has_solution {
                    IteratedSolution::Finished
                } else {
                    IteratedSolution::Unsatisfiable
                }
            }
            SatisfactionResult::Unknown => IteratedSolution::Unknown,
        }
    }
}

/// Enum which specifies the status of the call to [`SolutionIterator::next_solution`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IteratedSolution {
    /// A new solution was identified.
    Solution(Solution),

    /// No more solutions exist.
    Finished,

    /// The solver was terminated during search.
    Unknown,

    /// There exists no solution.
    Unsatisfiable,
}
