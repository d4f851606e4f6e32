//! The propagation-and-search kernel: the fixpoint-computing propagation engine and the
//! depth-first search loop driving it.

use log::debug;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use super::cp::Assignments;
use super::cp::PropagationContext;
use super::cp::PropagationContextMut;
use super::cp::PropagatorId;
use super::cp::PropagatorQueue;
use super::cp::WatchList;
use super::predicates::Predicate;
use super::solver_statistics::SolverStatistics;
use super::termination::TerminationCondition;
use super::variables::DomainId;
use crate::basic_types::ConstraintOperationError;
use crate::basic_types::PropagationStatusCP;
use crate::basic_types::Solution;
use crate::branching::Brancher;
use crate::branching::SelectionContext;
use crate::constraints;
use crate::constraints::ConstraintHandle;
use crate::constraints::RelationalOperator;
use crate::containers::KeyedVec;
use crate::marrow_assert_eq_simple;
use crate::marrow_assert_moderate;
use crate::marrow_assert_simple;
use crate::propagators::Propagator;
use crate::propagators::PropagatorKind;
use crate::propagators::Term;
use crate::propagators::NUM_PRIORITY_LEVELS;

/// The status of the propagation engine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum EngineStatus {
    /// No propagation has run since the last domain change.
    #[default]
    Idle,
    /// The engine is in the middle of a propagation pass.
    Propagating,
    /// No propagator can shrink any domain further given the current information.
    Fixpoint,
    /// A propagation pass was aborted because a domain became empty or a propagator proved its
    /// constraint unsatisfiable.
    Contradicted,
}

/// The conclusion of one [`ConstraintSatisfactionSolver::solve`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum CSPSolverExecutionFlag {
    /// All variables are fixed and every constraint is satisfied.
    Feasible,
    /// The remaining search space contains no (further) solution.
    Infeasible,
    /// The termination condition signalled before the search concluded.
    Timeout,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum SearchState {
    /// The solver can take (further) decisions.
    #[default]
    Ready,
    /// The previous solve call ended in a solution; resuming continues past it.
    Solution,
    /// The search space is fully explored.
    Exhausted,
    /// The model is infeasible at the root.
    Infeasible,
}

#[derive(Debug)]
struct PropagatorRecord {
    propagator: Propagator,
    /// The decision level at which the propagator became entailed; entailed propagators are
    /// retired from scheduling until the search backtracks past that level.
    entailed_at: Option<usize>,
}

/// A decision paired with its not-yet-tried negation. The decision was applied at its own
/// decision level; when both branches are exhausted the choice point is popped.
#[derive(Clone, Copy, Debug)]
struct ChoicePoint {
    predicate: Predicate,
    negation_tried: bool,
}

/// One solving session: the domains, the propagators, the propagation engine, and the search
/// loop. Sessions share no state; every solver owns its trail and domains exclusively.
#[derive(Debug)]
pub(crate) struct ConstraintSatisfactionSolver {
    assignments: Assignments,
    watch_list: WatchList,
    propagator_queue: PropagatorQueue,
    propagators: KeyedVec<PropagatorId, PropagatorRecord>,
    choice_points: Vec<ChoicePoint>,
    engine_status: EngineStatus,
    state: SearchState,
    statistics: SolverStatistics,
    random_generator: SmallRng,
}

impl Default for ConstraintSatisfactionSolver {
    fn default() -> Self {
        ConstraintSatisfactionSolver::with_seed(42)
    }
}

impl ConstraintSatisfactionSolver {
    pub(crate) fn with_seed(seed: u64) -> Self {
        ConstraintSatisfactionSolver {
            assignments: Assignments::default(),
            watch_list: WatchList::default(),
            propagator_queue: PropagatorQueue::new(NUM_PRIORITY_LEVELS),
            propagators: KeyedVec::default(),
            choice_points: Vec::default(),
            engine_status: EngineStatus::default(),
            state: SearchState::default(),
            statistics: SolverStatistics::default(),
            random_generator: SmallRng::seed_from_u64(seed),
        }
    }

    pub(crate) fn new_bounded_integer(&mut self, lower_bound: i32, upper_bound: i32) -> DomainId {
        let domain_id = self.assignments.grow(lower_bound, upper_bound);
        self.watch_list.grow();
        marrow_assert_eq_simple!(self.assignments.num_domains(), self.watch_list.num_domains());
        domain_id
    }

    /// Creates a variable with the given admissible values; values outside the set are removed
    /// at the root and are never restored by backtracking.
    pub(crate) fn new_sparse_integer(&mut self, values: &[i32]) -> DomainId {
        marrow_assert_simple!(!values.is_empty());

        let lower_bound = values.iter().min().copied().unwrap_or_default();
        let upper_bound = values.iter().max().copied().unwrap_or_default();
        let domain_id = self.new_bounded_integer(lower_bound, upper_bound);

        for value in lower_bound..=upper_bound {
            if !values.contains(&value) {
                // Only interior values are removed; the domain cannot become empty here.
                let result = self.assignments.remove_value(domain_id, value);
                marrow_assert_moderate!(result.is_ok());
            }
        }

        domain_id
    }

    pub(crate) fn new_boolean(&mut self) -> DomainId {
        self.new_bounded_integer(0, 1)
    }

    pub(crate) fn add_linear(
        &mut self,
        terms: Vec<Term>,
        operator: RelationalOperator,
        rhs: i32,
    ) -> Result<ConstraintHandle, ConstraintOperationError> {
        if self.state == SearchState::Infeasible {
            return Err(ConstraintOperationError::InfeasibleState);
        }

        let propagator = constraints::compile_linear(&self.assignments, terms, operator, rhs);
        self.post_propagator(propagator)
    }

    pub(crate) fn add_scalar(
        &mut self,
        variables: &[DomainId],
        coefficients: &[i32],
        operator: RelationalOperator,
        result: DomainId,
    ) -> Result<ConstraintHandle, ConstraintOperationError> {
        if self.state == SearchState::Infeasible {
            return Err(ConstraintOperationError::InfeasibleState);
        }

        let propagator = constraints::compile_scalar(
            &self.assignments,
            variables,
            coefficients,
            operator,
            result,
        )?;
        self.post_propagator(propagator)
    }

    /// Installs the propagator and runs the engine to its initial fixpoint. A contradiction
    /// here means the model is infeasible at the root; the solver becomes unusable for further
    /// postings.
    fn post_propagator(
        &mut self,
        propagator: Propagator,
    ) -> Result<ConstraintHandle, ConstraintOperationError> {
        marrow_assert_simple!(
            self.assignments.get_decision_level() == 0,
            "constraints can only be posted at the root"
        );

        let priority = propagator.priority();
        let propagator_id = self.propagators.push(PropagatorRecord {
            propagator,
            entailed_at: None,
        });

        self.propagators[propagator_id]
            .propagator
            .register_watches(propagator_id, &mut self.watch_list);
        self.propagator_queue
            .enqueue_propagator(propagator_id, priority);

        if self.propagate().is_err() {
            self.state = SearchState::Infeasible;
            self.assignments.drain_domain_events().for_each(drop);
            return Err(ConstraintOperationError::InfeasibleConstraint);
        }

        Ok(ConstraintHandle {
            index: propagator_id.0,
        })
    }

    /// Runs propagation to a fixpoint or a contradiction.
    ///
    /// The pending set starts from the domain events which accumulated since the previous pass.
    /// Propagators are popped per priority class and re-invoked until no propagator can shrink
    /// any domain further. The fixpoint reached is independent of the pop order; the order only
    /// influences how much work it takes to get there.
    fn propagate(&mut self) -> PropagationStatusCP {
        self.engine_status = EngineStatus::Propagating;

        loop {
            self.schedule_watchers_of_pending_events();

            let Some(propagator_id) = self.propagator_queue.pop() else {
                break;
            };

            let record = &self.propagators[propagator_id];
            if record.entailed_at.is_some() {
                continue;
            }

            self.statistics.num_propagations += 1;

            let mut context = PropagationContextMut::new(&mut self.assignments);
            if let Err(inconsistency) = record.propagator.propagate(&mut context) {
                debug!(
                    "{} {} found a conflict",
                    record.propagator.name(),
                    propagator_id
                );
                self.propagator_queue.clear();
                self.assignments.drain_domain_events().for_each(drop);
                self.engine_status = EngineStatus::Contradicted;
                return Err(inconsistency);
            }

            let context = PropagationContext::new(&self.assignments);
            if record.propagator.is_entailed(context) {
                self.propagators[propagator_id].entailed_at =
                    Some(self.assignments.get_decision_level());
            }
        }

        self.engine_status = EngineStatus::Fixpoint;
        Ok(())
    }

    /// Moves the accumulated domain events into the pending set, filtered by the event masks of
    /// the watching propagators. Retired propagators are not scheduled.
    fn schedule_watchers_of_pending_events(&mut self) {
        let events: Vec<_> = self.assignments.drain_domain_events().collect();

        for (event, domain_id) in events {
            for &propagator_id in self.watch_list.get_affected_propagators(event, domain_id) {
                let record = &self.propagators[propagator_id];
                if record.entailed_at.is_none() {
                    self.propagator_queue
                        .enqueue_propagator(propagator_id, record.propagator.priority());
                }
            }
        }
    }

    /// Searches for the next solution, resuming from where the previous call left off.
    pub(crate) fn solve(
        &mut self,
        brancher: &mut impl Brancher,
        termination: &mut impl TerminationCondition,
    ) -> CSPSolverExecutionFlag {
        match self.state {
            SearchState::Infeasible | SearchState::Exhausted => {
                return CSPSolverExecutionFlag::Infeasible;
            }
            SearchState::Solution => {
                // Continue past the previous solution by treating it as a dead end.
                if !self.backtrack_to_untried_alternative() {
                    return CSPSolverExecutionFlag::Infeasible;
                }
                self.state = SearchState::Ready;
            }
            SearchState::Ready => {}
        }

        loop {
            if self.propagate().is_err() {
                self.statistics.num_conflicts += 1;
                if !self.backtrack_to_untried_alternative() {
                    return CSPSolverExecutionFlag::Infeasible;
                }
                continue;
            }

            if self.all_variables_assigned() {
                self.statistics.num_solutions += 1;
                self.state = SearchState::Solution;
                debug!(
                    "solution found at decision level {}",
                    self.assignments.get_decision_level()
                );
                return CSPSolverExecutionFlag::Feasible;
            }

            // The stop signal is checked between decisions; the trail stays consistent.
            if termination.should_stop() {
                return CSPSolverExecutionFlag::Timeout;
            }

            let mut context =
                SelectionContext::new(&self.assignments, &mut self.random_generator);
            let Some(decision) = brancher.next_decision(&mut context) else {
                // The brancher broke its contract: undetermined variables remain but no
                // decision was produced. This is fatal for the session.
                panic!("the branching strategy produced no decision while variables remain unfixed");
            };
            marrow_assert_moderate!(
                self.assignments.evaluate_predicate(decision).is_none(),
                "the branching strategy must return an undetermined predicate"
            );

            termination.on_decision();
            self.statistics.num_decisions += 1;

            self.assignments.increase_decision_level();
            self.statistics.peak_depth = self
                .statistics
                .peak_depth
                .max(self.assignments.get_decision_level() as u64);
            self.choice_points.push(ChoicePoint {
                predicate: decision,
                negation_tried: false,
            });

            if self.assignments.post_predicate(decision).is_err() {
                self.statistics.num_conflicts += 1;
                if !self.backtrack_to_untried_alternative() {
                    return CSPSolverExecutionFlag::Infeasible;
                }
            }
        }
    }

    /// Unwinds choice points until one has an untried negation, undoes the trail to the level
    /// before that choice point, and applies the negation at a fresh decision level.
    ///
    /// Returns false when no untried alternative remains; the search space is then exhausted
    /// and the trail is rewound to the root.
    fn backtrack_to_untried_alternative(&mut self) -> bool {
        loop {
            let Some(choice_point) = self.choice_points.last_mut() else {
                self.state = SearchState::Exhausted;
                if self.assignments.get_decision_level() > 0 {
                    self.synchronise(0);
                }
                return false;
            };

            if choice_point.negation_tried {
                let _ = self.choice_points.pop();
                continue;
            }

            choice_point.negation_tried = true;
            let negation = !choice_point.predicate;

            let target_level = self.choice_points.len() - 1;
            if self.assignments.get_decision_level() > target_level {
                self.synchronise(target_level);
            }

            self.assignments.increase_decision_level();
            if self.assignments.post_predicate(negation).is_err() {
                self.statistics.num_conflicts += 1;
                continue;
            }

            return true;
        }
    }

    /// Restores the domains to the given decision level and un-retires the propagators whose
    /// entailment no longer holds there.
    fn synchronise(&mut self, new_decision_level: usize) {
        self.assignments.synchronise(new_decision_level);

        for record in self.propagators.iter_mut() {
            if record
                .entailed_at
                .is_some_and(|level| level > new_decision_level)
            {
                record.entailed_at = None;
            }
        }
    }

    fn all_variables_assigned(&self) -> bool {
        self.assignments
            .get_domains()
            .all(|domain_id| self.assignments.is_domain_assigned(domain_id))
    }

    /// Extracts the solution at the current (fully assigned) state.
    pub(crate) fn get_solution(&self) -> Solution {
        marrow_assert_simple!(self.all_variables_assigned());

        let mut values = KeyedVec::default();
        for domain_id in self.assignments.get_domains() {
            let _ = values.push(self.assignments.get_lower_bound(domain_id));
        }
        Solution::new(values)
    }

    pub(crate) fn statistics(&self) -> &SolverStatistics {
        &self.statistics
    }

    pub(crate) fn engine_status(&self) -> EngineStatus {
        self.engine_status
    }

    pub(crate) fn lower_bound(&self, domain_id: DomainId) -> i32 {
        self.assignments.get_lower_bound(domain_id)
    }

    pub(crate) fn upper_bound(&self, domain_id: DomainId) -> i32 {
        self.assignments.get_upper_bound(domain_id)
    }

    pub(crate) fn domain_values(&self, domain_id: DomainId) -> Vec<i32> {
        self.assignments.get_domain_values(domain_id)
    }

    pub(crate) fn domains(&self) -> impl Iterator<Item = DomainId> {
        self.assignments.get_domains()
    }

    pub(crate) fn num_propagators(&self) -> usize {
        self.propagators.len()
    }

    pub(crate) fn propagator_kind(&self, handle: ConstraintHandle) -> PropagatorKind {
        self.propagators[PropagatorId(handle.index)].propagator.kind()
    }

    pub(crate) fn propagator_num_terms(&self, handle: ConstraintHandle) -> usize {
        self.propagators[PropagatorId(handle.index)]
            .propagator
            .terms()
            .len()
    }
}
