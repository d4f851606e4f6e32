//! The linear-combination compiler.
//!
//! Posting a weighted sum does not install a fixed propagator; the compiler first simplifies
//! the term list and then selects the cheapest filtering algorithm which is sound for the
//! resulting shape. The selection is deterministic, so two logically equivalent postings
//! always produce identically shaped propagators.

use fnv::FnvHashMap;

use crate::basic_types::ConstraintOperationError;
use crate::engine::cp::Assignments;
use crate::engine::variables::DomainId;
use crate::propagators::BinaryArithmeticPropagator;
use crate::propagators::BooleanSumPropagator;
use crate::propagators::Comparison;
use crate::propagators::Propagator;
use crate::propagators::ScalarPropagator;
use crate::propagators::SumPropagator;
use crate::propagators::Term;

/// The comparison operators accepted when posting a linear constraint. The strict comparisons
/// are normalised to their non-strict counterparts at posting time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RelationalOperator {
    Equal,
    NotEqual,
    LessThan,
    LessOrEqual,
    GreaterThan,
    GreaterOrEqual,
}

/// A handle to a posted constraint, returned by the solver. The handle can be used to inspect
/// which propagator the compiler installed for the constraint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ConstraintHandle {
    pub(crate) index: u32,
}

/// Compiles `sum(coefficient * variable) ⊙ rhs` into the single propagator implementing it.
pub(crate) fn compile_linear(
    assignments: &Assignments,
    terms: Vec<Term>,
    operator: RelationalOperator,
    rhs: i32,
) -> Propagator {
    let (comparison, rhs) = normalise(operator, rhs);
    let terms = simplify(terms);

    dispatch(assignments, terms, comparison, rhs)
}

/// Compiles `sum(coefficient * variable) ⊙ result` by folding the result variable into the term
/// list with coefficient -1 and a right-hand side of zero, after rejecting self-referential
/// postings.
pub(crate) fn compile_scalar(
    assignments: &Assignments,
    variables: &[DomainId],
    coefficients: &[i32],
    operator: RelationalOperator,
    result: DomainId,
) -> Result<Propagator, ConstraintOperationError> {
    if variables.len() != coefficients.len() {
        return Err(ConstraintOperationError::MismatchedTerms {
            num_variables: variables.len(),
            num_coefficients: coefficients.len(),
        });
    }

    // A result variable among the terms is a configuration error, not something to decompose
    // silently.
    if variables.contains(&result) {
        return Err(ConstraintOperationError::SelfReferentialScalar);
    }

    let mut terms: Vec<Term> = variables
        .iter()
        .zip(coefficients)
        .map(|(&domain_id, &coefficient)| Term {
            coefficient,
            domain_id,
        })
        .collect();
    terms.push(Term {
        coefficient: -1,
        domain_id: result,
    });

    Ok(compile_linear(assignments, terms, operator, 0))
}

fn normalise(operator: RelationalOperator, rhs: i32) -> (Comparison, i32) {
    match operator {
        RelationalOperator::Equal => (Comparison::Equal, rhs),
        RelationalOperator::NotEqual => (Comparison::NotEqual, rhs),
        RelationalOperator::LessThan => (Comparison::LessOrEqual, rhs - 1),
        RelationalOperator::LessOrEqual => (Comparison::LessOrEqual, rhs),
        RelationalOperator::GreaterThan => (Comparison::GreaterOrEqual, rhs + 1),
        RelationalOperator::GreaterOrEqual => (Comparison::GreaterOrEqual, rhs),
    }
}

/// Merges duplicate variable references by summing their coefficients and drops terms whose
/// coefficient is (or becomes) zero. First-occurrence order of the variables is preserved,
/// which keeps the compilation independent of how the duplicates were spread over the posting.
pub(crate) fn simplify(terms: Vec<Term>) -> Vec<Term> {
    let mut position: FnvHashMap<DomainId, usize> = FnvHashMap::default();
    let mut merged: Vec<Term> = Vec::with_capacity(terms.len());

    for term in terms {
        match position.get(&term.domain_id) {
            Some(&index) => merged[index].coefficient += term.coefficient,
            None => {
                let _ = position.insert(term.domain_id, merged.len());
                merged.push(term);
            }
        }
    }

    merged.retain(|term| term.coefficient != 0);
    merged
}

fn dispatch(
    assignments: &Assignments,
    terms: Vec<Term>,
    comparison: Comparison,
    rhs: i32,
) -> Propagator {
    // Up to two terms is a direct relation; no sum machinery required.
    if terms.len() <= 2 {
        return Propagator::BinaryArithmetic(BinaryArithmeticPropagator::new(
            terms, comparison, rhs,
        ));
    }

    let all_boolean = terms
        .iter()
        .all(|term| assignments.is_boolean_domain(term.domain_id));
    let all_unit = terms
        .iter()
        .all(|term| term.coefficient == 1 || term.coefficient == -1);

    if all_boolean && all_unit {
        return Propagator::BooleanSum(BooleanSumPropagator::new(terms, comparison, rhs));
    }

    if terms.iter().all(|term| term.coefficient == 1) {
        return Propagator::Sum(SumPropagator::new(terms, comparison, rhs));
    }

    Propagator::Scalar(ScalarPropagator::new(terms, comparison, rhs))
}
