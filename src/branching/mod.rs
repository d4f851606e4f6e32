//! The branching strategies which decide, at every [Deciding] step of the search, which
//! variable to branch on and which value to try first.
//!
//! A [`Brancher`] is usually composed from a [`VariableSelector`] and a [`ValueSelector`]
//! through the [`IndependentVariableValueBrancher`].
//!
//! [Deciding]: crate::Solver

mod brancher;
mod independent_variable_value_brancher;
mod selection_context;
pub mod value_selection;
pub mod variable_selection;

pub use brancher::Brancher;
pub use independent_variable_value_brancher::IndependentVariableValueBrancher;
pub use selection_context::SelectionContext;

use crate::engine::variables::DomainId;
use value_selection::InDomainMin;
use variable_selection::InputOrder;

/// The default brancher: variables in creation order, smallest value first. This is the
/// strategy the cross-model regression tests rely on, since it makes node counts a pure
/// function of the model.
pub fn default_brancher(
    variables: impl IntoIterator<Item = DomainId>,
) -> IndependentVariableValueBrancher<InputOrder, InDomainMin> {
    IndependentVariableValueBrancher::new(
        InputOrder::new(variables.into_iter().collect()),
        InDomainMin,
    )
}
