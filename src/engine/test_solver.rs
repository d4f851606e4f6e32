//! A test harness which wires a single propagator to an assignments arena, without the
//! scheduling machinery of the full engine.

use crate::basic_types::PropagationStatusCP;
use crate::engine::cp::Assignments;
use crate::engine::cp::EmptyDomain;
use crate::engine::cp::PropagationContext;
use crate::engine::cp::PropagationContextMut;
use crate::engine::variables::DomainId;
use crate::propagators::Propagator;

#[derive(Debug, Default)]
pub(crate) struct TestSolver {
    pub(crate) assignments: Assignments,
}

impl TestSolver {
    pub(crate) fn new_variable(&mut self, lower_bound: i32, upper_bound: i32) -> DomainId {
        self.assignments.grow(lower_bound, upper_bound)
    }

    pub(crate) fn propagate(&mut self, propagator: &Propagator) -> PropagationStatusCP {
        let mut context = PropagationContextMut::new(&mut self.assignments);
        propagator.propagate(&mut context)
    }

    /// Runs the propagator until it makes no further domain change, mimicking how the engine
    /// re-invokes a propagator whose own variables changed.
    pub(crate) fn propagate_until_fixed_point(
        &mut self,
        propagator: &Propagator,
    ) -> PropagationStatusCP {
        loop {
            self.propagate(propagator)?;

            if self.assignments.drain_domain_events().next().is_none() {
                return Ok(());
            }
        }
    }

    pub(crate) fn is_entailed(&self, propagator: &Propagator) -> bool {
        propagator.is_entailed(PropagationContext::new(&self.assignments))
    }

    pub(crate) fn lower_bound(&self, domain_id: DomainId) -> i32 {
        self.assignments.get_lower_bound(domain_id)
    }

    pub(crate) fn upper_bound(&self, domain_id: DomainId) -> i32 {
        self.assignments.get_upper_bound(domain_id)
    }

    pub(crate) fn contains(&self, domain_id: DomainId, value: i32) -> bool {
        self.assignments.is_value_in_domain(domain_id, value)
    }

    pub(crate) fn set_lower_bound(
        &mut self,
        domain_id: DomainId,
        bound: i32,
    ) -> Result<(), EmptyDomain> {
        self.assignments.tighten_lower_bound(domain_id, bound)
    }

    pub(crate) fn set_upper_bound(
        &mut self,
        domain_id: DomainId,
        bound: i32,
    ) -> Result<(), EmptyDomain> {
        self.assignments.tighten_upper_bound(domain_id, bound)
    }

    pub(crate) fn assign(&mut self, domain_id: DomainId, value: i32) -> Result<(), EmptyDomain> {
        self.assignments.make_assignment(domain_id, value)
    }

    pub(crate) fn assert_bounds(&self, domain_id: DomainId, lower_bound: i32, upper_bound: i32) {
        let actual_lower_bound = self.lower_bound(domain_id);
        let actual_upper_bound = self.upper_bound(domain_id);

        assert_eq!(
            (lower_bound, upper_bound),
            (actual_lower_bound, actual_upper_bound),
            "The expected bounds [{lower_bound}..{upper_bound}] did not match the actual bounds [{actual_lower_bound}..{actual_upper_bound}]"
        );
    }
}
