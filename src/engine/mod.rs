pub(crate) mod constraint_satisfaction_solver;
pub(crate) mod cp;
pub(crate) mod predicates;
pub(crate) mod solver_statistics;
pub(crate) mod termination;
pub(crate) mod variables;

#[cfg(test)]
pub(crate) mod test_solver;
