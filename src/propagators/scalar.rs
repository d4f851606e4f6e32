use super::is_linear_entailed;
use super::min_activity;
use super::propagate_not_equal;
use super::term_max;
use super::term_min;
use super::tighten_term_max;
use super::tighten_term_min;
use super::Comparison;
use super::Term;
use crate::basic_types::Inconsistency;
use crate::basic_types::PropagationStatusCP;
use crate::engine::cp::DomainEvents;
use crate::engine::cp::PropagationContext;
use crate::engine::cp::PropagationContextMut;
use crate::engine::cp::PropagatorId;
use crate::engine::cp::WatchList;
use crate::marrow_assert_simple;

/// The general bound-consistency propagator for `c_1 * x_1 + ... + c_n * x_n ⊙ rhs` with
/// arbitrary non-zero coefficients.
///
/// This is the fallback of the compiler's shape dispatch; sums with more structure get one of
/// the cheaper specialised propagators instead.
#[derive(Clone, Debug)]
pub(crate) struct ScalarPropagator {
    terms: Vec<Term>,
    comparison: Comparison,
    rhs: i32,
}

impl ScalarPropagator {
    pub(crate) fn new(terms: Vec<Term>, comparison: Comparison, rhs: i32) -> Self {
        marrow_assert_simple!(terms.iter().all(|term| term.coefficient != 0));

        ScalarPropagator {
            terms,
            comparison,
            rhs,
        }
    }

    pub(crate) fn terms(&self) -> &[Term] {
        &self.terms
    }

    pub(crate) fn register_watches(&self, propagator_id: PropagatorId, watch_list: &mut WatchList) {
        let events = match self.comparison {
            Comparison::NotEqual => DomainEvents::ASSIGN,
            _ => DomainEvents::BOUNDS,
        };

        for term in &self.terms {
            watch_list.watch(propagator_id, term.domain_id, events);
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

    fn propagate_less_or_equal(
        &self,
        context: &mut PropagationContextMut<'_>,
    ) -> PropagationStatusCP {
        let rhs = i64::from(self.rhs);
        let min = min_activity(context, &self.terms);

        if min > rhs {
            return Err(Inconsistency::Conflict);
        }

        // Every term gets the slack that remains when all other terms sit at their minimum.
        for term in &self.terms {
            let bound = rhs - (min - term_min(context, term));
            tighten_term_max(context, term, bound)?;
        }

        Ok(())
    }

    fn propagate_greater_or_equal(
        &self,
        context: &mut PropagationContextMut<'_>,
    ) -> PropagationStatusCP {
        let rhs = i64::from(self.rhs);
        let max = super::max_activity(context, &self.terms);

        if max < rhs {
            return Err(Inconsistency::Conflict);
        }

        for term in &self.terms {
            let bound = rhs - (max - term_max(context, term));
            tighten_term_min(context, term, bound)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_solver::TestSolver;
    use crate::propagators::Propagator;

    fn term(coefficient: i32, domain_id: crate::engine::variables::DomainId) -> Term {
        Term {
            coefficient,
            domain_id,
        }
    }

    #[test]
    fn bounds_are_filtered_for_less_or_equal() {
        let mut solver = TestSolver::default();
        let x = solver.new_variable(0, 10);
        let y = solver.new_variable(0, 10);

        // 2x + 3y <= 12
        let propagator = Propagator::Scalar(ScalarPropagator::new(
            vec![term(2, x), term(3, y)],
            Comparison::LessOrEqual,
            12,
        ));

        solver
            .propagate_until_fixed_point(&propagator)
            .expect("no conflict");

        solver.assert_bounds(x, 0, 6);
        solver.assert_bounds(y, 0, 4);
    }

    #[test]
    fn negative_coefficients_tighten_lower_bounds() {
        let mut solver = TestSolver::default();
        let x = solver.new_variable(0, 10);
        let y = solver.new_variable(0, 10);

        // 2x - 3y <= 5, so 3y >= 2x - 5
        let propagator = Propagator::Scalar(ScalarPropagator::new(
            vec![term(2, x), term(-3, y)],
            Comparison::LessOrEqual,
            5,
        ));

        solver.set_lower_bound(x, 10).expect("non-empty domain");
        solver
            .propagate_until_fixed_point(&propagator)
            .expect("no conflict");

        solver.assert_bounds(y, 5, 10);
    }

    #[test]
    fn equality_filters_both_directions() {
        let mut solver = TestSolver::default();
        let x = solver.new_variable(0, 10);
        let y = solver.new_variable(0, 10);

        // 2x + 2y = 11 has no integer solution
        let propagator = Propagator::Scalar(ScalarPropagator::new(
            vec![term(2, x), term(2, y)],
            Comparison::Equal,
            11,
        ));

        assert!(solver.propagate_until_fixed_point(&propagator).is_err());
    }

    #[test]
    fn conflict_when_minimum_exceeds_bound() {
        let mut solver = TestSolver::default();
        let x = solver.new_variable(3, 10);
        let y = solver.new_variable(3, 10);

        let propagator = Propagator::Scalar(ScalarPropagator::new(
            vec![term(2, x), term(2, y)],
            Comparison::LessOrEqual,
            11,
        ));

        assert_eq!(solver.propagate(&propagator), Err(Inconsistency::Conflict));
    }

    #[test]
    fn not_equal_removes_the_last_consistent_value() {
        let mut solver = TestSolver::default();
        let x = solver.new_variable(0, 10);
        let y = solver.new_variable(0, 10);

        // 2x + y != 7 with x = 2 forbids y = 3
        let propagator = Propagator::Scalar(ScalarPropagator::new(
            vec![term(2, x), term(1, y)],
            Comparison::NotEqual,
            7,
        ));

        solver.assign(x, 2).expect("non-empty domain");
        solver.propagate(&propagator).expect("no conflict");

        assert!(!solver.contains(y, 3));
        assert!(solver.contains(y, 2));
        assert!(solver.contains(y, 4));
    }

    #[test]
    fn not_equal_conflicts_when_sum_is_fixed_to_the_bound() {
        let mut solver = TestSolver::default();
        let x = solver.new_variable(2, 2);
        let y = solver.new_variable(3, 3);

        let propagator = Propagator::Scalar(ScalarPropagator::new(
            vec![term(2, x), term(1, y)],
            Comparison::NotEqual,
            7,
        ));

        assert_eq!(solver.propagate(&propagator), Err(Inconsistency::Conflict));
    }

    #[test]
    fn entailment_follows_activity_bounds() {
        let mut solver = TestSolver::default();
        let x = solver.new_variable(0, 2);
        let y = solver.new_variable(0, 2);

        let propagator = Propagator::Scalar(ScalarPropagator::new(
            vec![term(2, x), term(3, y)],
            Comparison::LessOrEqual,
            20,
        ));

        assert!(solver.is_entailed(&propagator));

        let strict = Propagator::Scalar(ScalarPropagator::new(
            vec![term(2, x), term(3, y)],
            Comparison::LessOrEqual,
            5,
        ));
        assert!(!solver.is_entailed(&strict));
    }
}
