use crate::branching::SelectionContext;
use super::ValueSelector;
use crate::engine::predicates::Predicate;
use crate::engine::variables::DomainId;
use crate::predicate;

/// Tries assigning the largest admissible value.
#[derive(Clone, Copy, Debug)]
pub struct InDomainMax;

impl ValueSelector for InDomainMax {
    fn select_value(
        &mut self,
        context: &mut SelectionContext<'_>,
        decision_variable: DomainId,
    ) -> Predicate {
        let value = context.upper_bound(decision_variable);
        predicate![decision_variable == value]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basic_types::TestRandom;
    use crate::engine::cp::Assignments;

    #[test]
    fn the_largest_admissible_value_is_selected() {
        let mut assignments = Assignments::default();
        let x = assignments.grow(1, 4);

        let mut random = TestRandom::default();
        let mut context = SelectionContext::new(&assignments, &mut random);

        let decision = InDomainMax.select_value(&mut context, x);
        assert_eq!(decision, predicate![x == 4]);
    }

    #[test]
    fn removing_the_maximum_moves_the_selection_down() {
        let mut assignments = Assignments::default();
        let x = assignments.grow(1, 4);
        assignments.remove_value(x, 4).expect("non-empty domain");

        let mut random = TestRandom::default();
        let mut context = SelectionContext::new(&assignments, &mut random);

        let decision = InDomainMax.select_value(&mut context, x);
        assert_eq!(decision, predicate![x == 3]);
    }
}
