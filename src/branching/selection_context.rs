use crate::basic_types::Random;
use crate::engine::cp::Assignments;
use crate::engine::variables::DomainId;

/// The view of the solver state handed to branchers: read access to the current domains plus a
/// source of randomness. Branchers cannot mutate domains through this context.
#[derive(Debug)]
pub struct SelectionContext<'a> {
    assignments: &'a Assignments,
    random_generator: &'a mut dyn Random,
}

impl<'a> SelectionContext<'a> {
    pub(crate) fn new(assignments: &'a Assignments, random_generator: &'a mut dyn Random) -> Self {
        SelectionContext {
            assignments,
            random_generator,
        }
    }

    pub fn lower_bound(&self, domain_id: DomainId) -> i32 {
        self.assignments.get_lower_bound(domain_id)
    }

    pub fn upper_bound(&self, domain_id: DomainId) -> i32 {
        self.assignments.get_upper_bound(domain_id)
    }

    pub fn is_fixed(&self, domain_id: DomainId) -> bool {
        self.assignments.is_domain_assigned(domain_id)
    }

    pub fn contains(&self, domain_id: DomainId, value: i32) -> bool {
        self.assignments.is_value_in_domain(domain_id, value)
    }

    /// The number of values currently admissible for the variable.
    pub fn get_size(&self, domain_id: DomainId) -> usize {
        self.assignments.get_domain_size(domain_id)
    }

    /// The admissible values of the variable, in increasing order.
    pub fn get_values(&self, domain_id: DomainId) -> Vec<i32> {
        self.assignments.get_domain_values(domain_id)
    }

    /// All variables of the session, in creation order.
    pub fn domains(&self) -> impl Iterator<Item = DomainId> {
        self.assignments.get_domains()
    }

    pub fn random(&mut self) -> &mut dyn Random {
        self.random_generator
    }
}
