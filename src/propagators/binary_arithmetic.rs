use super::is_linear_entailed;
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

/// The direct relation propagator for linear constraints with at most two surviving terms,
/// `a * x + b * y ⊙ rhs` or simpler.
///
/// Constraints this small need none of the sum machinery; each variable is bounded directly
/// against the other. Simplification can leave zero terms, in which case the constraint is a
/// ground fact and propagation only checks it.
#[derive(Clone, Debug)]
pub(crate) struct BinaryArithmeticPropagator {
    terms: Vec<Term>,
    comparison: Comparison,
    rhs: i32,
}

impl BinaryArithmeticPropagator {
    pub(crate) fn new(terms: Vec<Term>, comparison: Comparison, rhs: i32) -> Self {
        marrow_assert_simple!(terms.len() <= 2);
        marrow_assert_simple!(terms.iter().all(|term| term.coefficient != 0));

        BinaryArithmeticPropagator {
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
        if self.terms.is_empty() {
            return self.check_ground();
        }

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

    /// With no terms left the constraint compares 0 against the right-hand side.
    fn check_ground(&self) -> PropagationStatusCP {
        let holds = match self.comparison {
            Comparison::Equal => self.rhs == 0,
            Comparison::NotEqual => self.rhs != 0,
            Comparison::LessOrEqual => self.rhs >= 0,
            Comparison::GreaterOrEqual => self.rhs <= 0,
        };

        if holds {
            Ok(())
        } else {
            Err(Inconsistency::Conflict)
        }
    }

    fn propagate_less_or_equal(
        &self,
        context: &mut PropagationContextMut<'_>,
    ) -> PropagationStatusCP {
        let rhs = i64::from(self.rhs);

        // Each term is bounded by the slack the other term leaves at its minimum.
        for (index, term) in self.terms.iter().enumerate() {
            let other_min = self
                .terms
                .iter()
                .enumerate()
                .filter(|&(other_index, _)| other_index != index)
                .map(|(_, other)| term_min(context, other))
                .sum::<i64>();

            tighten_term_max(context, term, rhs - other_min)?;
        }

        Ok(())
    }

    fn propagate_greater_or_equal(
        &self,
        context: &mut PropagationContextMut<'_>,
    ) -> PropagationStatusCP {
        let rhs = i64::from(self.rhs);

        for (index, term) in self.terms.iter().enumerate() {
            let other_max = self
                .terms
                .iter()
                .enumerate()
                .filter(|&(other_index, _)| other_index != index)
                .map(|(_, other)| term_max(context, other))
                .sum::<i64>();

            tighten_term_min(context, term, rhs - other_max)?;
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

    fn term(coefficient: i32, domain_id: DomainId) -> Term {
        Term {
            coefficient,
            domain_id,
        }
    }

    #[test]
    fn unary_equality_divides_the_bound() {
        let mut solver = TestSolver::default();
        let x = solver.new_variable(0, 10);

        // 2x = 6 fixes x to 3
        let propagator = Propagator::BinaryArithmetic(BinaryArithmeticPropagator::new(
            vec![term(2, x)],
            Comparison::Equal,
            6,
        ));

        solver
            .propagate_until_fixed_point(&propagator)
            .expect("no conflict");

        solver.assert_bounds(x, 3, 3);
    }

    #[test]
    fn unary_equality_without_integer_solution_conflicts() {
        let mut solver = TestSolver::default();
        let x = solver.new_variable(0, 10);

        // 2x = 5 has no integer solution
        let propagator = Propagator::BinaryArithmetic(BinaryArithmeticPropagator::new(
            vec![term(2, x)],
            Comparison::Equal,
            5,
        ));

        assert!(solver.propagate(&propagator).is_err());
    }

    #[test]
    fn binary_equality_bounds_each_variable_against_the_other() {
        let mut solver = TestSolver::default();
        let x = solver.new_variable(0, 10);
        let y = solver.new_variable(0, 10);

        // x + 2y = 8
        let propagator = Propagator::BinaryArithmetic(BinaryArithmeticPropagator::new(
            vec![term(1, x), term(2, y)],
            Comparison::Equal,
            8,
        ));

        solver
            .propagate_until_fixed_point(&propagator)
            .expect("no conflict");

        solver.assert_bounds(x, 0, 8);
        solver.assert_bounds(y, 0, 4);
    }

    #[test]
    fn less_or_equal_with_negative_coefficient() {
        let mut solver = TestSolver::default();
        let x = solver.new_variable(0, 10);
        let y = solver.new_variable(0, 10);

        // x - y <= -4, so x <= y - 4 and y >= x + 4
        let propagator = Propagator::BinaryArithmetic(BinaryArithmeticPropagator::new(
            vec![term(1, x), term(-1, y)],
            Comparison::LessOrEqual,
            -4,
        ));

        solver
            .propagate_until_fixed_point(&propagator)
            .expect("no conflict");

        solver.assert_bounds(x, 0, 6);
        solver.assert_bounds(y, 4, 10);
    }

    #[test]
    fn not_equal_waits_until_one_variable_is_fixed() {
        let mut solver = TestSolver::default();
        let x = solver.new_variable(0, 10);
        let y = solver.new_variable(0, 10);

        // x - y != 0, i.e. x != y
        let propagator = Propagator::BinaryArithmetic(BinaryArithmeticPropagator::new(
            vec![term(1, x), term(-1, y)],
            Comparison::NotEqual,
            0,
        ));

        solver.propagate(&propagator).expect("no conflict");
        assert!(solver.contains(y, 5));

        solver.assign(x, 5).expect("non-empty domain");
        solver.propagate(&propagator).expect("no conflict");
        assert!(!solver.contains(y, 5));
    }

    #[test]
    fn ground_relation_is_checked() {
        let mut solver = TestSolver::default();

        let falsified = Propagator::BinaryArithmetic(BinaryArithmeticPropagator::new(
            vec![],
            Comparison::Equal,
            3,
        ));
        assert_eq!(solver.propagate(&falsified), Err(Inconsistency::Conflict));

        let satisfied = Propagator::BinaryArithmetic(BinaryArithmeticPropagator::new(
            vec![],
            Comparison::LessOrEqual,
            3,
        ));
        assert!(solver.propagate(&satisfied).is_ok());
    }
}
