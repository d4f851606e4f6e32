use crate::branching::SelectionContext;
use super::ValueSelector;
use crate::engine::predicates::Predicate;
use crate::engine::variables::DomainId;
use crate::predicate;

/// Tries assigning the smallest admissible value.
#[derive(Clone, Copy, Debug)]
pub struct InDomainMin;

impl ValueSelector for InDomainMin {
    fn select_value(
        &mut self,
        context: &mut SelectionContext<'_>,
        decision_variable: DomainId,
    ) -> Predicate {
        let value = context.lower_bound(decision_variable);
        predicate![decision_variable == value]
    }
}
