use crate::branching::SelectionContext;
use super::VariableSelector;
use crate::engine::variables::DomainId;

/// Selects the first unfixed variable in the given order.
#[derive(Clone, Debug)]
pub struct InputOrder {
    variables: Vec<DomainId>,
}

impl InputOrder {
    pub fn new(variables: Vec<DomainId>) -> Self {
        InputOrder { variables }
    }
}

impl VariableSelector for InputOrder {
    fn select_variable(&mut self, context: &mut SelectionContext<'_>) -> Option<DomainId> {
        self.variables
            .iter()
            .find(|&&domain_id| !context.is_fixed(domain_id))
            .copied()
    }
}
