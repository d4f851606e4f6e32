use crate::branching::SelectionContext;
use super::ValueSelector;
use crate::engine::predicates::Predicate;
use crate::engine::variables::DomainId;
use crate::predicate;

/// Tries assigning a uniformly random admissible value.
#[derive(Clone, Copy, Debug)]
pub struct InDomainRandom;

impl ValueSelector for InDomainRandom {
    fn select_value(
        &mut self,
        context: &mut SelectionContext<'_>,
        decision_variable: DomainId,
    ) -> Predicate {
        let values = context.get_values(decision_variable);
        let index = context.random().generate_usize_in_range(0..values.len());
        let value = values[index];

        predicate![decision_variable == value]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basic_types::TestRandom;
    use crate::engine::cp::Assignments;

    #[test]
    fn holes_are_never_selected() {
        let mut assignments = Assignments::default();
        let x = assignments.grow(1, 4);
        assignments.remove_value(x, 2).expect("non-empty domain");

        // Admissible values are [1, 3, 4]; index 1 selects 3.
        let mut random = TestRandom {
            usizes: vec![1],
            ..Default::default()
        };
        let mut context = SelectionContext::new(&assignments, &mut random);

        let decision = InDomainRandom.select_value(&mut context, x);
        assert_eq!(decision, predicate![x == 3]);
    }
}
