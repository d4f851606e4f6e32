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

/// The specialised propagator for unweighted sums `x_1 + ... + x_n ⊙ rhs`.
///
/// With all coefficients equal to one, the slack computation needs no division; this is the
/// payoff of the compiler's shape dispatch for plain sums.
#[derive(Clone, Debug)]
pub(crate) struct SumPropagator {
    terms: Vec<Term>,
    comparison: Comparison,
    rhs: i32,
}

impl SumPropagator {
    pub(crate) fn new(terms: Vec<Term>, comparison: Comparison, rhs: i32) -> Self {
        marrow_assert_simple!(terms.iter().all(|term| term.coefficient == 1));

        SumPropagator {
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
        let min_sum: i64 = self
            .terms
            .iter()
            .map(|term| i64::from(context.lower_bound(term.domain_id)))
            .sum();

        if min_sum > rhs {
            return Err(Inconsistency::Conflict);
        }

        for term in &self.terms {
            let slack = rhs - (min_sum - i64::from(context.lower_bound(term.domain_id)));
            context.set_upper_bound(term.domain_id, super::clamp(slack))?;
        }

        Ok(())
    }

    fn propagate_greater_or_equal(
        &self,
        context: &mut PropagationContextMut<'_>,
    ) -> PropagationStatusCP {
        let rhs = i64::from(self.rhs);
        let max_sum: i64 = self
            .terms
            .iter()
            .map(|term| i64::from(context.upper_bound(term.domain_id)))
            .sum();

        if max_sum < rhs {
            return Err(Inconsistency::Conflict);
        }

        for term in &self.terms {
            let slack = rhs - (max_sum - i64::from(context.upper_bound(term.domain_id)));
            context.set_lower_bound(term.domain_id, super::clamp(slack))?;
        }

        Ok(())
    }
}
