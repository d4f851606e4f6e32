use super::value_selection::ValueSelector;
use super::variable_selection::VariableSelector;
use super::Brancher;
use super::SelectionContext;
use crate::engine::predicates::Predicate;

/// A [`Brancher`] which makes its variable choice and its value choice independently, by
/// composing a [`VariableSelector`] with a [`ValueSelector`].
#[derive(Clone, Debug)]
pub struct IndependentVariableValueBrancher<VariableSelection, ValueSelection> {
    variable_selector: VariableSelection,
    value_selector: ValueSelection,
}

impl<VariableSelection, ValueSelection>
    IndependentVariableValueBrancher<VariableSelection, ValueSelection>
{
    pub fn new(variable_selector: VariableSelection, value_selector: ValueSelection) -> Self {
        IndependentVariableValueBrancher {
            variable_selector,
            value_selector,
        }
    }
}

impl<VariableSelection, ValueSelection> Brancher
    for IndependentVariableValueBrancher<VariableSelection, ValueSelection>
where
    VariableSelection: VariableSelector,
    ValueSelection: ValueSelector,
{
    fn next_decision(&mut self, context: &mut SelectionContext<'_>) -> Option<Predicate> {
        self.variable_selector
            .select_variable(context)
            .map(|decision_variable| {
                self.value_selector
                    .select_value(context, decision_variable)
            })
    }
}
