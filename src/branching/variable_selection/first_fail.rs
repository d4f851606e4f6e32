use crate::branching::SelectionContext;
use super::VariableSelector;
use crate::engine::variables::DomainId;

/// Selects the unfixed variable with the smallest domain, breaking ties by the given order.
#[derive(Clone, Debug)]
pub struct FirstFail {
    variables: Vec<DomainId>,
}

impl FirstFail {
    pub fn new(variables: Vec<DomainId>) -> Self {
        FirstFail { variables }
    }
}

impl VariableSelector for FirstFail {
    fn select_variable(&mut self, context: &mut SelectionContext<'_>) -> Option<DomainId> {
        self.variables
            .iter()
            .filter(|&&domain_id| !context.is_fixed(domain_id))
            .min_by_key(|&&domain_id| context.get_size(domain_id))
            .copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basic_types::TestRandom;
    use crate::engine::cp::Assignments;

    #[test]
    fn the_smallest_unfixed_domain_is_selected() {
        let mut assignments = Assignments::default();
        let x = assignments.grow(0, 9);
        let y = assignments.grow(3, 5);
        let z = assignments.grow(1, 1);

        let mut random = TestRandom::default();
        let mut context = SelectionContext::new(&assignments, &mut random);

        // z is fixed, so y has the smallest remaining domain.
        let mut selector = FirstFail::new(vec![x, y, z]);
        assert_eq!(selector.select_variable(&mut context), Some(y));
    }

    #[test]
    fn ties_are_broken_by_the_given_order() {
        let mut assignments = Assignments::default();
        let x = assignments.grow(0, 2);
        let y = assignments.grow(4, 6);

        let mut random = TestRandom::default();
        let mut context = SelectionContext::new(&assignments, &mut random);

        let mut selector = FirstFail::new(vec![y, x]);
        assert_eq!(selector.select_variable(&mut context), Some(y));
    }

    #[test]
    fn no_variable_is_selected_once_all_are_fixed() {
        let mut assignments = Assignments::default();
        let x = assignments.grow(2, 2);

        let mut random = TestRandom::default();
        let mut context = SelectionContext::new(&assignments, &mut random);

        let mut selector = FirstFail::new(vec![x]);
        assert_eq!(selector.select_variable(&mut context), None);
    }
}
