use thiserror::Error;

/// Errors related to posting constraints to the solver. These are fatal at model construction
/// time; a constraint which triggers one of these is rejected before any search begins.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConstraintOperationError {
    #[error("adding the constraint failed because it is infeasible at the root")]
    InfeasibleConstraint,
    #[error("adding the constraint failed because the solver is in an infeasible state")]
    InfeasibleState,
    #[error("a scalar constraint cannot use its result variable as one of its terms")]
    SelfReferentialScalar,
    #[error("expected one coefficient per variable, got {num_coefficients} coefficients for {num_variables} variables")]
    MismatchedTerms {
        num_variables: usize,
        num_coefficients: usize,
    },
}
