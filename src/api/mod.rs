pub(crate) mod outputs;
pub(crate) mod solver;

pub use outputs::SatisfactionResult;

pub use crate::engine::solver_statistics::SolverStatistics;

pub mod results {
    //! The outcomes of solving, and the iterator over successive solutions.
    pub use super::outputs::solution_iterator;
    pub use super::outputs::SatisfactionResult;
    pub use crate::basic_types::Solution;
}

pub mod predicates {
    //! Atomic predicates over integer variables, the vocabulary of decisions and domain
    //! updates. Most predicates are created through the [`crate::predicate!`] macro.
    pub use crate::engine::predicates::Predicate;
    pub use crate::engine::predicates::PredicateConstructor;
}

pub mod variables {
    //! The handles through which models refer to their integer variables.
    pub use crate::engine::variables::DomainId;
}

pub mod termination {
    //! Conditions under which the solver gives up the search, checked between decisions.
    pub use crate::engine::termination::Combinator;
    pub use crate::engine::termination::DecisionBudget;
    pub use crate::engine::termination::Indefinite;
    pub use crate::engine::termination::TerminationCondition;
    pub use crate::engine::termination::TimeBudget;
}
