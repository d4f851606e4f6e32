use super::is_linear_entailed;
use super::propagate_not_equal;
use super::Comparison;
use super::Term;
use crate::basic_types::Inconsistency;
use crate::basic_types::PropagationStatusCP;
use crate::engine::cp::DomainEvents;
use crate::engine::cp::PropagationContext;
use crate::engine::cp::PropagationContextMut;
use crate::engine::cp::PropagatorId;
use crate::engine::cp::ReadDomains;
use crate::engine::cp::WatchList;
use crate::marrow_assert_simple;

/// The counting propagator for `±x_1 ± x_2 ± ... ± x_n ⊙ rhs` over boolean variables.
///
/// Boolean domains have no interior, so the propagator is coarse: it only reacts to
/// instantiation events, and its filtering reduces to counting fixed variables. No arithmetic
/// bound propagation is needed.
#[derive(Clone, Debug)]
pub(crate) struct BooleanSumPropagator {
    terms: Vec<Term>,
    comparison: Comparison,
    rhs: i32,
}

impl BooleanSumPropagator {
    pub(crate) fn new(terms: Vec<Term>, comparison: Comparison, rhs: i32) -> Self {
        marrow_assert_simple!(terms
            .iter()
            .all(|term| term.coefficient == 1 || term.coefficient == -1));

        BooleanSumPropagator {
            terms,
            comparison,
            rhs,
        }
    }

    pub(crate) fn terms(&self) -> &[Term] {
        &self.terms
    }

    pub(crate) fn register_watches(&self, propagator_id: PropagatorId, watch_list: &mut WatchList) {
        for term in &self.terms {
            watch_list.watch(propagator_id, term.domain_id, DomainEvents::ASSIGN);
        }
    }

    pub(crate) fn propagate(&self, context: &mut PropagationContextMut<'_>) -> PropagationStatusCP {
        match self.comparison {
            Comparison::LessOrEqual => self.propagate_less_or_equal(context),
            Comparison::GreaterOrEqual => self.propagate_greater_or_equal(context),
            Comparison::Equal => {
                self.propagate_less_or_equal(context)?;
                self.propagate_greater_or_equal(context)
            }
            Comparison::NotEqual => propagate_not_equal(context, &self.terms, self.rhs),
        }
    }

    pub(crate) fn is_entailed(&self, context: PropagationContext<'_>) -> bool {
        is_linear_entailed(context, &self.terms, self.comparison, self.rhs)
    }

    /// The smallest sum still reachable: unfixed positive terms contribute 0, unfixed negative
    /// terms contribute -1.
    fn min_count(&self, context: &PropagationContextMut<'_>) -> i32 {
        self.terms
            .iter()
            .map(|term| {
                if term.coefficient > 0 {
                    term.coefficient * context.lower_bound(term.domain_id)
                } else {
                    term.coefficient * context.upper_bound(term.domain_id)
                }
            })
            .sum()
    }

    fn max_count(&self, context: &PropagationContextMut<'_>) -> i32 {
        self.terms
            .iter()
            .map(|term| {
                if term.coefficient > 0 {
                    term.coefficient * context.upper_bound(term.domain_id)
                } else {
                    term.coefficient * context.lower_bound(term.domain_id)
                }
            })
            .sum()
    }

    fn propagate_less_or_equal(
        &self,
        context: &mut PropagationContextMut<'_>,
    ) -> PropagationStatusCP {
        let min = self.min_count(context);

        if min > self.rhs {
            return Err(Inconsistency::Conflict);
        }

        // Every unfixed term can raise the sum by exactly one; once the minimum meets the bound
        // they must all take their minimising value.
        if min == self.rhs {
            for term in &self.terms {
                if !context.is_fixed(term.domain_id) {
                    if term.coefficient > 0 {
                        context.set_upper_bound(term.domain_id, 0)?;
                    } else {
                        context.set_lower_bound(term.domain_id, 1)?;
                    }
                }
            }
        }

        Ok(())
    }

    fn propagate_greater_or_equal(
        &self,
        context: &mut PropagationContextMut<'_>,
    ) -> PropagationStatusCP {
        let max = self.max_count(context);

        if max < self.rhs {
            return Err(Inconsistency::Conflict);
        }

        if max == self.rhs {
            for term in &self.terms {
                if !context.is_fixed(term.domain_id) {
                    if term.coefficient > 0 {
                        context.set_lower_bound(term.domain_id, 1)?;
                    } else {
                        context.set_upper_bound(term.domain_id, 0)?;
                    }
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_solver::TestSolver;
    use crate::engine::variables::DomainId;
    use crate::propagators::Propagator;

    fn signed_terms(signs: &[i32], domain_ids: &[DomainId]) -> Vec<Term> {
        signs
            .iter()
            .zip(domain_ids)
            .map(|(&coefficient, &domain_id)| Term {
                coefficient,
                domain_id,
            })
            .collect()
    }

    #[test]
    fn saturated_upper_bound_fixes_the_rest_to_zero() {
        let mut solver = TestSolver::default();
        let a = solver.new_variable(0, 1);
        let b = solver.new_variable(0, 1);
        let c = solver.new_variable(0, 1);

        // a + b + c <= 1 with a = 1
        let propagator = Propagator::BooleanSum(BooleanSumPropagator::new(
            signed_terms(&[1, 1, 1], &[a, b, c]),
            Comparison::LessOrEqual,
            1,
        ));

        solver.assign(a, 1).expect("non-empty domain");
        solver.propagate(&propagator).expect("no conflict");

        solver.assert_bounds(b, 0, 0);
        solver.assert_bounds(c, 0, 0);
    }

    #[test]
    fn saturated_lower_bound_fixes_the_rest_to_one() {
        let mut solver = TestSolver::default();
        let a = solver.new_variable(0, 1);
        let b = solver.new_variable(0, 1);
        let c = solver.new_variable(0, 1);

        let propagator = Propagator::BooleanSum(BooleanSumPropagator::new(
            signed_terms(&[1, 1, 1], &[a, b, c]),
            Comparison::GreaterOrEqual,
            3,
        ));

        solver.propagate(&propagator).expect("no conflict");

        solver.assert_bounds(a, 1, 1);
        solver.assert_bounds(b, 1, 1);
        solver.assert_bounds(c, 1, 1);
    }

    #[test]
    fn negative_terms_are_fixed_in_the_opposite_direction() {
        let mut solver = TestSolver::default();
        let a = solver.new_variable(0, 1);
        let b = solver.new_variable(0, 1);
        let c = solver.new_variable(0, 1);

        // a + b - c = 2 forces a = 1, b = 1, c = 0
        let propagator = Propagator::BooleanSum(BooleanSumPropagator::new(
            signed_terms(&[1, 1, -1], &[a, b, c]),
            Comparison::Equal,
            2,
        ));

        solver
            .propagate_until_fixed_point(&propagator)
            .expect("no conflict");

        solver.assert_bounds(a, 1, 1);
        solver.assert_bounds(b, 1, 1);
        solver.assert_bounds(c, 0, 0);
    }

    #[test]
    fn conflict_when_the_count_cannot_reach_the_bound() {
        let mut solver = TestSolver::default();
        let a = solver.new_variable(0, 1);
        let b = solver.new_variable(0, 1);
        let c = solver.new_variable(0, 1);

        let propagator = Propagator::BooleanSum(BooleanSumPropagator::new(
            signed_terms(&[1, 1, 1], &[a, b, c]),
            Comparison::Equal,
            4,
        ));

        assert_eq!(solver.propagate(&propagator), Err(Inconsistency::Conflict));
    }

    #[test]
    fn not_equal_forbids_the_completing_assignment() {
        let mut solver = TestSolver::default();
        let a = solver.new_variable(0, 1);
        let b = solver.new_variable(0, 1);
        let c = solver.new_variable(0, 1);

        // a + b + c != 2 with a = 1, b = 1 forces c != 0 i.e. c = 1
        let propagator = Propagator::BooleanSum(BooleanSumPropagator::new(
            signed_terms(&[1, 1, 1], &[a, b, c]),
            Comparison::NotEqual,
            2,
        ));

        solver.assign(a, 1).expect("non-empty domain");
        solver.assign(b, 1).expect("non-empty domain");
        solver.propagate(&propagator).expect("no conflict");

        solver.assert_bounds(c, 1, 1);
    }
}
