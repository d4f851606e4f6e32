use super::Assignments;
use super::EmptyDomain;
use crate::engine::variables::DomainId;

/// Read access to the domains, shared by both propagation contexts.
pub(crate) trait ReadDomains {
    fn lower_bound(&self, domain_id: DomainId) -> i32;

    fn upper_bound(&self, domain_id: DomainId) -> i32;

    fn contains(&self, domain_id: DomainId, value: i32) -> bool;

    fn is_fixed(&self, domain_id: DomainId) -> bool {
        self.lower_bound(domain_id) == self.upper_bound(domain_id)
    }

    fn assigned_value(&self, domain_id: DomainId) -> Option<i32> {
        self.is_fixed(domain_id).then(|| self.lower_bound(domain_id))
    }
}

/// A read-only view of the domains, handed to propagators for entailment checks.
#[derive(Clone, Copy, Debug)]
pub(crate) struct PropagationContext<'a> {
    assignments: &'a Assignments,
}

impl<'a> PropagationContext<'a> {
    pub(crate) fn new(assignments: &'a Assignments) -> Self {
        PropagationContext { assignments }
    }
}

/// A mutable view of the domains, handed to propagators while they filter. All domain
/// operations go through this context so every change is trailed and announced.
#[derive(Debug)]
pub(crate) struct PropagationContextMut<'a> {
    assignments: &'a mut Assignments,
}

impl<'a> PropagationContextMut<'a> {
    pub(crate) fn new(assignments: &'a mut Assignments) -> Self {
        PropagationContextMut { assignments }
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

    pub(crate) fn remove(&mut self, domain_id: DomainId, value: i32) -> Result<(), EmptyDomain> {
        self.assignments.remove_value(domain_id, value)
    }
}

impl ReadDomains for PropagationContext<'_> {
    fn lower_bound(&self, domain_id: DomainId) -> i32 {
        self.assignments.get_lower_bound(domain_id)
    }

    fn upper_bound(&self, domain_id: DomainId) -> i32 {
        self.assignments.get_upper_bound(domain_id)
    }

    fn contains(&self, domain_id: DomainId, value: i32) -> bool {
        self.assignments.is_value_in_domain(domain_id, value)
    }
}

impl ReadDomains for PropagationContextMut<'_> {
    fn lower_bound(&self, domain_id: DomainId) -> i32 {
        self.assignments.get_lower_bound(domain_id)
    }

    fn upper_bound(&self, domain_id: DomainId) -> i32 {
        self.assignments.get_upper_bound(domain_id)
    }

    fn contains(&self, domain_id: DomainId, value: i32) -> bool {
        self.assignments.is_value_in_domain(domain_id, value)
    }
}
