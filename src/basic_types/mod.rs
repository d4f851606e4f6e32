mod constraint_operation_error;
mod propagation_status_cp;
mod random;
mod solution;
mod trail;

pub use constraint_operation_error::ConstraintOperationError;
pub(crate) use propagation_status_cp::Inconsistency;
pub(crate) use propagation_status_cp::PropagationStatusCP;
pub use random::Random;
pub use solution::Solution;
pub(crate) use trail::Trail;

#[cfg(test)]
pub(crate) use random::tests::TestRandom;
