//! The propagator implementations of the linear constraint family.
//!
//! The propagator kinds form a closed set: the linear-combination compiler in
//! [`crate::constraints`] selects the kind once, at posting time, based on the shape of the
//! simplified constraint. The engine then dispatches on the [`Propagator`] enum on the hot
//! filtering path.

mod binary_arithmetic;
mod boolean_sum;
mod scalar;
mod sum;

pub(crate) use binary_arithmetic::BinaryArithmeticPropagator;
pub(crate) use boolean_sum::BooleanSumPropagator;
use num::Integer;
pub(crate) use scalar::ScalarPropagator;
pub(crate) use sum::SumPropagator;

use crate::basic_types::Inconsistency;
use crate::basic_types::PropagationStatusCP;
use crate::engine::cp::EmptyDomain;
use crate::engine::cp::PropagationContext;
use crate::engine::cp::PropagationContextMut;
use crate::engine::cp::PropagatorId;
use crate::engine::cp::ReadDomains;
use crate::engine::cp::WatchList;
use crate::engine::variables::DomainId;

/// One weighted term `coefficient * variable` of a linear constraint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Term {
    pub(crate) coefficient: i32,
    pub(crate) domain_id: DomainId,
}

/// The comparison a linear constraint imposes between its weighted sum and its right-hand side.
///
/// Strict comparisons are normalised away at posting time, so propagators only ever see these
/// four.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Comparison {
    Equal,
    NotEqual,
    LessOrEqual,
    GreaterOrEqual,
}

/// The concrete filtering algorithm installed for a constraint, exposed so the dispatch
/// decisions of the compiler can be observed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PropagatorKind {
    /// A direct relation over at most two weighted terms.
    BinaryArithmetic,
    /// A counting-based filter for ±1-weighted sums of booleans.
    BooleanSum,
    /// A bound-consistency filter for unweighted sums.
    Sum,
    /// The general bound-consistency filter for weighted sums.
    Scalar,
}

/// A single filtering unit, selected once by the compiler.
///
/// The variants are concrete structs rather than trait objects; the set of kinds is closed and
/// dispatch stays a jump table.
#[derive(Clone, Debug)]
pub(crate) enum Propagator {
    BinaryArithmetic(BinaryArithmeticPropagator),
    BooleanSum(BooleanSumPropagator),
    Sum(SumPropagator),
    Scalar(ScalarPropagator),
}

impl Propagator {
    /// Applies the tightest valid reduction to the domains of the propagator's variables.
    ///
    /// Calling this again without an intervening domain change performs no further reduction,
    /// and no value which remains consistent with the constraint is ever removed.
    pub(crate) fn propagate(&self, context: &mut PropagationContextMut<'_>) -> PropagationStatusCP {
        match self {
            Propagator::BinaryArithmetic(propagator) => propagator.propagate(context),
            Propagator::BooleanSum(propagator) => propagator.propagate(context),
            Propagator::Sum(propagator) => propagator.propagate(context),
            Propagator::Scalar(propagator) => propagator.propagate(context),
        }
    }

    /// True once the constraint is guaranteed satisfied for every remaining domain combination,
    /// which lets the engine retire the propagator for the rest of the branch.
    pub(crate) fn is_entailed(&self, context: PropagationContext<'_>) -> bool {
        match self {
            Propagator::BinaryArithmetic(propagator) => propagator.is_entailed(context),
            Propagator::BooleanSum(propagator) => propagator.is_entailed(context),
            Propagator::Sum(propagator) => propagator.is_entailed(context),
            Propagator::Scalar(propagator) => propagator.is_entailed(context),
        }
    }

    /// The priority class used by the scheduling heuristic of the engine; lower runs earlier.
    pub(crate) fn priority(&self) -> u32 {
        match self {
            Propagator::BinaryArithmetic(_) => 0,
            Propagator::BooleanSum(_) => 1,
            Propagator::Sum(_) => 2,
            Propagator::Scalar(_) => 3,
        }
    }

    pub(crate) fn name(&self) -> &'static str {
        match self {
            Propagator::BinaryArithmetic(_) => "BinaryArithmetic",
            Propagator::BooleanSum(_) => "BooleanSum",
            Propagator::Sum(_) => "Sum",
            Propagator::Scalar(_) => "Scalar",
        }
    }

    pub(crate) fn kind(&self) -> PropagatorKind {
        match self {
            Propagator::BinaryArithmetic(_) => PropagatorKind::BinaryArithmetic,
            Propagator::BooleanSum(_) => PropagatorKind::BooleanSum,
            Propagator::Sum(_) => PropagatorKind::Sum,
            Propagator::Scalar(_) => PropagatorKind::Scalar,
        }
    }

    pub(crate) fn terms(&self) -> &[Term] {
        match self {
            Propagator::BinaryArithmetic(propagator) => propagator.terms(),
            Propagator::BooleanSum(propagator) => propagator.terms(),
            Propagator::Sum(propagator) => propagator.terms(),
            Propagator::Scalar(propagator) => propagator.terms(),
        }
    }

    /// Subscribes the propagator to the domain events it must react to.
    pub(crate) fn register_watches(&self, propagator_id: PropagatorId, watch_list: &mut WatchList) {
        match self {
            Propagator::BinaryArithmetic(propagator) => {
                propagator.register_watches(propagator_id, watch_list)
            }
            Propagator::BooleanSum(propagator) => {
                propagator.register_watches(propagator_id, watch_list)
            }
            Propagator::Sum(propagator) => propagator.register_watches(propagator_id, watch_list),
            Propagator::Scalar(propagator) => {
                propagator.register_watches(propagator_id, watch_list)
            }
        }
    }
}

/// The number of priority classes used by [`Propagator::priority`].
pub(crate) const NUM_PRIORITY_LEVELS: u32 = 4;

/// The smallest value `coefficient * variable` can take under the current domain.
fn term_min(context: &impl ReadDomains, term: &Term) -> i64 {
    let coefficient = i64::from(term.coefficient);
    if coefficient >= 0 {
        coefficient * i64::from(context.lower_bound(term.domain_id))
    } else {
        coefficient * i64::from(context.upper_bound(term.domain_id))
    }
}

/// The largest value `coefficient * variable` can take under the current domain.
fn term_max(context: &impl ReadDomains, term: &Term) -> i64 {
    let coefficient = i64::from(term.coefficient);
    if coefficient >= 0 {
        coefficient * i64::from(context.upper_bound(term.domain_id))
    } else {
        coefficient * i64::from(context.lower_bound(term.domain_id))
    }
}

fn min_activity(context: &impl ReadDomains, terms: &[Term]) -> i64 {
    terms.iter().map(|term| term_min(context, term)).sum()
}

fn max_activity(context: &impl ReadDomains, terms: &[Term]) -> i64 {
    terms.iter().map(|term| term_max(context, term)).sum()
}

/// Enforces `coefficient * variable <= bound` on the domain of the term's variable.
fn tighten_term_max(
    context: &mut PropagationContextMut<'_>,
    term: &Term,
    bound: i64,
) -> Result<(), EmptyDomain> {
    let coefficient = i64::from(term.coefficient);
    if coefficient > 0 {
        context.set_upper_bound(term.domain_id, clamp(bound.div_floor(&coefficient)))
    } else {
        context.set_lower_bound(term.domain_id, clamp(bound.div_ceil(&coefficient)))
    }
}

/// Enforces `coefficient * variable >= bound` on the domain of the term's variable.
fn tighten_term_min(
    context: &mut PropagationContextMut<'_>,
    term: &Term,
    bound: i64,
) -> Result<(), EmptyDomain> {
    let coefficient = i64::from(term.coefficient);
    if coefficient > 0 {
        context.set_lower_bound(term.domain_id, clamp(bound.div_ceil(&coefficient)))
    } else {
        context.set_upper_bound(term.domain_id, clamp(bound.div_floor(&coefficient)))
    }
}

fn clamp(value: i64) -> i32 {
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// Disequality filtering shared by the sum-like propagators: the weighted sum can only be forced
/// to a single value once at most one variable is unfixed, so nothing is done before that.
fn propagate_not_equal(
    context: &mut PropagationContextMut<'_>,
    terms: &[Term],
    rhs: i32,
) -> PropagationStatusCP {
    let mut unfixed = None;
    let mut fixed_sum: i64 = 0;

    for term in terms {
        match context.assigned_value(term.domain_id) {
            Some(value) => fixed_sum += i64::from(term.coefficient) * i64::from(value),
            None => {
                if unfixed.is_some() {
                    return Ok(());
                }
                unfixed = Some(term);
            }
        }
    }

    let rhs = i64::from(rhs);

    match unfixed {
        None => {
            if fixed_sum == rhs {
                Err(Inconsistency::Conflict)
            } else {
                Ok(())
            }
        }
        Some(term) => {
            let coefficient = i64::from(term.coefficient);
            let remainder = rhs - fixed_sum;

            // The variable only has a forbidden value if the coefficient exactly divides what
            // remains of the right-hand side.
            if remainder % coefficient == 0 {
                let forbidden = remainder / coefficient;
                if let Ok(forbidden) = i32::try_from(forbidden) {
                    context.remove(term.domain_id, forbidden)?;
                }
            }
            Ok(())
        }
    }
}

/// Entailment for the whole linear family, based on the activity bounds of the weighted sum.
fn is_linear_entailed(
    context: PropagationContext<'_>,
    terms: &[Term],
    comparison: Comparison,
    rhs: i32,
) -> bool {
    let rhs = i64::from(rhs);
    let min = min_activity(&context, terms);
    let max = max_activity(&context, terms);

    match comparison {
        Comparison::Equal => min == rhs && max == rhs,
        Comparison::NotEqual => rhs < min || rhs > max,
        Comparison::LessOrEqual => max <= rhs,
        Comparison::GreaterOrEqual => min >= rhs,
    }
}

