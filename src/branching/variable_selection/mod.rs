//! Variable selectors: given the current domains, pick the next variable to branch on.

mod first_fail;
mod input_order;

pub use first_fail::FirstFail;
pub use input_order::InputOrder;

use super::SelectionContext;
use crate::engine::variables::DomainId;

/// Picks the variable to branch on, or `None` when all considered variables are fixed.
pub trait VariableSelector {
    fn select_variable(&mut self, context: &mut SelectionContext<'_>) -> Option<DomainId>;
}
