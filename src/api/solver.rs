use super::outputs::solution_iterator::SolutionIterator;
use super::outputs::SatisfactionResult;
use crate::basic_types::ConstraintOperationError;
use crate::branching::default_brancher;
use crate::branching::value_selection::InDomainMin;
use crate::branching::variable_selection::InputOrder;
use crate::branching::Brancher;
use crate::branching::IndependentVariableValueBrancher;
use crate::constraints::ConstraintHandle;
use crate::constraints::RelationalOperator;
use crate::engine::constraint_satisfaction_solver::CSPSolverExecutionFlag;
use crate::engine::constraint_satisfaction_solver::ConstraintSatisfactionSolver;
use crate::engine::solver_statistics::SolverStatistics;
use crate::engine::termination::TerminationCondition;
use crate::engine::variables::DomainId;
use crate::propagators::PropagatorKind;
use crate::propagators::Term;

/// The brancher returned by [`Solver::default_brancher`]: variables in creation order,
/// smallest value first.
pub type DefaultBrancher = IndependentVariableValueBrancher<InputOrder, InDomainMin>;

/// The entry point for declaring a model and solving it.
///
/// A model is built by creating integer variables (see [`Solver::new_bounded_integer`]) and
/// posting constraints over them (see [`Solver::linear`] and [`Solver::scalar`]). Posting is
/// only possible before the search starts; a posting which fails with
/// [`ConstraintOperationError::InfeasibleConstraint`] makes the solver unusable for further
/// postings.
///
/// Solving is done through [`Solver::satisfy`], which finds a single solution, or through
/// [`Solver::get_solution_iterator`], which enumerates all of them. Successive calls to
/// [`Solver::satisfy`] resume the search past the previously found solution.
#[derive(Debug, Default)]
pub struct Solver {
    satisfaction_solver: ConstraintSatisfactionSolver,
}

impl Solver {
    /// Creates a solver whose random value selections are seeded with `seed`. Two solvers with
    /// the same seed and the same model explore the same search tree.
    pub fn with_seed(seed: u64) -> Solver {
        Solver {
            satisfaction_solver: ConstraintSatisfactionSolver::with_seed(seed),
        }
    }

    /// Creates an integer variable with domain `[lower_bound, upper_bound]`.
    pub fn new_bounded_integer(&mut self, lower_bound: i32, upper_bound: i32) -> DomainId {
        self.satisfaction_solver
            .new_bounded_integer(lower_bound, upper_bound)
    }

    /// Creates an integer variable whose domain is exactly the given non-empty set of values.
    pub fn new_sparse_integer(&mut self, values: &[i32]) -> DomainId {
        self.satisfaction_solver.new_sparse_integer(values)
    }

    /// Creates a variable with domain `[0, 1]`.
    pub fn new_boolean(&mut self) -> DomainId {
        self.satisfaction_solver.new_boolean()
    }

    /// Posts the linear constraint `sum of coefficient * variable <operator> rhs`.
    ///
    /// The constraint is simplified (duplicate variables are merged, zero coefficients are
    /// dropped) and compiled into the most specialised propagator which applies; the chosen
    /// shape can be inspected through [`Solver::propagator_kind`].
    pub fn linear(
        &mut self,
        terms: Vec<(i32, DomainId)>,
        operator: RelationalOperator,
        rhs: i32,
    ) -> Result<ConstraintHandle, ConstraintOperationError> {
        let terms = terms
            .into_iter()
            .map(|(coefficient, domain_id)| Term {
                coefficient,
                domain_id,
            })
            .collect();

        self.satisfaction_solver.add_linear(terms, operator, rhs)
    }

    /// Posts the constraint `sum of coefficients[i] * variables[i] <operator> result`, where
    /// `result` is itself a variable of the model.
    ///
    /// The `variables` and `coefficients` slices must have the same length, and `result` may
    /// not occur among `variables`; violating either is an error.
    pub fn scalar(
        &mut self,
        variables: &[DomainId],
        coefficients: &[i32],
        operator: RelationalOperator,
        result: DomainId,
    ) -> Result<ConstraintHandle, ConstraintOperationError> {
        self.satisfaction_solver
            .add_scalar(variables, coefficients, operator, result)
    }

    /// Searches for the next solution to the model.
    ///
    /// The first call starts from the root; every further call resumes past the previously
    /// found solution, so repeated calls enumerate all solutions followed by
    /// [`SatisfactionResult::Unsatisfiable`]. [`SatisfactionResult::Unknown`] is returned when
    /// the termination condition signals before the search concludes; the search can then be
    /// resumed by calling [`Solver::satisfy`] again with a fresh condition.
    pub fn satisfy(
        &mut self,
        brancher: &mut impl Brancher,
        termination: &mut impl TerminationCondition,
    ) -> SatisfactionResult {
        match self.satisfaction_solver.solve(brancher, termination) {
            CSPSolverExecutionFlag::Feasible => {
                SatisfactionResult::Satisfiable(self.satisfaction_solver.get_solution())
            }
            CSPSolverExecutionFlag::Infeasible => SatisfactionResult::Unsatisfiable,
            CSPSolverExecutionFlag::Timeout => SatisfactionResult::Unknown,
        }
    }

    /// Creates an iterator over all solutions of the model.
    pub fn get_solution_iterator<
        'this,
        'brancher,
        'termination,
        B: Brancher,
        T: TerminationCondition,
    >(
        &'this mut self,
        brancher: &'brancher mut B,
        termination: &'termination mut T,
    ) -> SolutionIterator<'this, 'brancher, 'termination, B, T> {
        SolutionIterator::new(self, brancher, termination)
    }

    /// Creates the default branching strategy over all variables of the model.
    pub fn default_brancher(&self) -> DefaultBrancher {
        default_brancher(self.satisfaction_solver.domains())
    }

    /// The current lower bound of the variable.
    pub fn lower_bound(&self, domain_id: DomainId) -> i32 {
        self.satisfaction_solver.lower_bound(domain_id)
    }

    /// The current upper bound of the variable.
    pub fn upper_bound(&self, domain_id: DomainId) -> i32 {
        self.satisfaction_solver.upper_bound(domain_id)
    }

    /// The values currently in the domain of the variable, in increasing order.
    pub fn domain_values(&self, domain_id: DomainId) -> Vec<i32> {
        self.satisfaction_solver.domain_values(domain_id)
    }

    /// The counters accumulated by the search so far.
    pub fn statistics(&self) -> &SolverStatistics {
        self.satisfaction_solver.statistics()
    }

    /// Logs the statistics through [`crate::statistics::log_statistic`].
    pub fn log_statistics(&self) {
        self.satisfaction_solver.statistics().log();
    }

    /// The number of propagators installed in the solver.
    pub fn num_propagators(&self) -> usize {
        self.satisfaction_solver.num_propagators()
    }

    /// The propagator shape a posted constraint was compiled into.
    pub fn propagator_kind(&self, handle: ConstraintHandle) -> PropagatorKind {
        self.satisfaction_solver.propagator_kind(handle)
    }

    /// The number of terms of the propagator a posted constraint was compiled into, after
    /// simplification.
    pub fn propagator_num_terms(&self, handle: ConstraintHandle) -> usize {
        self.satisfaction_solver.propagator_num_terms(handle)
    }
}
