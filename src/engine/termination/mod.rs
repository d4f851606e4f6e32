//! Cooperative cancellation of the search.
//!
//! The search loop checks its [`TerminationCondition`] between decisions; when the condition
//! signals, the loop stops with an inconclusive result and leaves the trail consistent.

mod combinator;
mod decision_budget;
mod indefinite;
mod time_budget;

pub use combinator::Combinator;
pub use decision_budget::DecisionBudget;
pub use indefinite::Indefinite;
pub use time_budget::TimeBudget;

/// An external stop signal for the search, checked between decisions.
pub trait TerminationCondition {
    /// True when the search should stop.
    fn should_stop(&mut self) -> bool;

    /// Notifies the condition that the search is about to take a decision.
    fn on_decision(&mut self) {}
}
