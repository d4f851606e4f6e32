use fnv::FnvHashSet;

use super::DomainEvent;
use super::EventSink;
use crate::basic_types::Trail;
use crate::containers::KeyedVec;
use crate::engine::predicates::Predicate;
use crate::engine::variables::DomainId;
use crate::marrow_assert_moderate;
use crate::marrow_assert_simple;

/// The arena which owns the domains of all variables in one solving session, together with the
/// trail which makes every domain operation reversible.
///
/// Domains only ever shrink within one branch of the search; they are restored, never re-grown
/// independently, by [`Assignments::synchronise`]. An operation which would empty a domain
/// reports [`EmptyDomain`] and is expected to be followed by a backtrack.
#[derive(Clone, Debug, Default)]
pub(crate) struct Assignments {
    trail: Trail<TrailEntry>,
    domains: KeyedVec<DomainId, IntegerDomain>,
    events: EventSink,
}

/// A domain operation which would have left no admissible value for a variable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct EmptyDomain;

#[derive(Clone, Copy, Debug)]
struct TrailEntry {
    predicate: Predicate,
    old_lower_bound: i32,
    old_upper_bound: i32,
}

/// A single integer domain: a closed interval [lb, ub] with an explicit set of removed interior
/// values. A boolean is a domain with bounds within [0, 1].
#[derive(Clone, Debug)]
struct IntegerDomain {
    lower_bound: i32,
    upper_bound: i32,
    holes: FnvHashSet<i32>,
}

impl Assignments {
    /// Creates a new domain [lower_bound, upper_bound] and returns its handle.
    pub(crate) fn grow(&mut self, lower_bound: i32, upper_bound: i32) -> DomainId {
        marrow_assert_simple!(lower_bound <= upper_bound);

        self.events.grow();
        self.domains.push(IntegerDomain {
            lower_bound,
            upper_bound,
            holes: FnvHashSet::default(),
        })
    }

    pub(crate) fn num_domains(&self) -> usize {
        self.domains.len()
    }

    pub(crate) fn get_domains(&self) -> impl Iterator<Item = DomainId> {
        self.domains.keys()
    }

    pub(crate) fn get_decision_level(&self) -> usize {
        self.trail.get_checkpoint()
    }

    pub(crate) fn increase_decision_level(&mut self) {
        self.trail.new_checkpoint()
    }

    pub(crate) fn get_lower_bound(&self, domain_id: DomainId) -> i32 {
        self.domains[domain_id].lower_bound
    }

    pub(crate) fn get_upper_bound(&self, domain_id: DomainId) -> i32 {
        self.domains[domain_id].upper_bound
    }

    pub(crate) fn is_value_in_domain(&self, domain_id: DomainId, value: i32) -> bool {
        let domain = &self.domains[domain_id];

        value >= domain.lower_bound
            && value <= domain.upper_bound
            && !domain.holes.contains(&value)
    }

    pub(crate) fn is_domain_assigned(&self, domain_id: DomainId) -> bool {
        let domain = &self.domains[domain_id];
        domain.lower_bound == domain.upper_bound
    }

    pub(crate) fn get_assigned_value(&self, domain_id: DomainId) -> Option<i32> {
        let domain = &self.domains[domain_id];
        (domain.lower_bound == domain.upper_bound).then_some(domain.lower_bound)
    }

    /// The number of values currently admissible for the variable.
    pub(crate) fn get_domain_size(&self, domain_id: DomainId) -> usize {
        let domain = &self.domains[domain_id];
        let width = (domain.upper_bound - domain.lower_bound + 1) as usize;
        let holes_within = domain
            .holes
            .iter()
            .filter(|&&value| value > domain.lower_bound && value < domain.upper_bound)
            .count();
        width - holes_within
    }

    /// True iff the bounds of the variable lie within [0, 1].
    pub(crate) fn is_boolean_domain(&self, domain_id: DomainId) -> bool {
        let domain = &self.domains[domain_id];
        domain.lower_bound >= 0 && domain.upper_bound <= 1
    }

    /// The admissible values of the variable, in increasing order.
    pub(crate) fn get_domain_values(&self, domain_id: DomainId) -> Vec<i32> {
        let domain = &self.domains[domain_id];
        (domain.lower_bound..=domain.upper_bound)
            .filter(|value| !domain.holes.contains(value))
            .collect()
    }

    /// A snapshot of the domain as (lower bound, upper bound, removed interior values in
    /// increasing order). Two snapshots are equal exactly when the domains admit the same
    /// values through the same representation.
    pub(crate) fn get_domain_description(&self, domain_id: DomainId) -> (i32, i32, Vec<i32>) {
        let domain = &self.domains[domain_id];
        let mut holes: Vec<i32> = domain
            .holes
            .iter()
            .copied()
            .filter(|&value| value > domain.lower_bound && value < domain.upper_bound)
            .collect();
        holes.sort_unstable();
        (domain.lower_bound, domain.upper_bound, holes)
    }

    pub(crate) fn tighten_lower_bound(
        &mut self,
        domain_id: DomainId,
        new_lower_bound: i32,
    ) -> Result<(), EmptyDomain> {
        let domain = &self.domains[domain_id];

        if new_lower_bound <= domain.lower_bound {
            return Ok(());
        }

        self.trail.push(TrailEntry {
            predicate: Predicate::LowerBound {
                domain_id,
                lower_bound: new_lower_bound,
            },
            old_lower_bound: domain.lower_bound,
            old_upper_bound: domain.upper_bound,
        });

        let domain = &mut self.domains[domain_id];
        domain.lower_bound = new_lower_bound;

        // The bound lands on the first admissible value; removed values at the boundary are
        // skipped over.
        while domain.lower_bound <= domain.upper_bound
            && domain.holes.contains(&domain.lower_bound)
        {
            domain.lower_bound += 1;
        }

        if domain.lower_bound > domain.upper_bound {
            return Err(EmptyDomain);
        }

        self.events.event_occurred(DomainEvent::LowerBound, domain_id);
        if self.is_domain_assigned(domain_id) {
            self.events.event_occurred(DomainEvent::Assign, domain_id);
        }

        Ok(())
    }

    pub(crate) fn tighten_upper_bound(
        &mut self,
        domain_id: DomainId,
        new_upper_bound: i32,
    ) -> Result<(), EmptyDomain> {
        let domain = &self.domains[domain_id];

        if new_upper_bound >= domain.upper_bound {
            return Ok(());
        }

        self.trail.push(TrailEntry {
            predicate: Predicate::UpperBound {
                domain_id,
                upper_bound: new_upper_bound,
            },
            old_lower_bound: domain.lower_bound,
            old_upper_bound: domain.upper_bound,
        });

        let domain = &mut self.domains[domain_id];
        domain.upper_bound = new_upper_bound;

        while domain.upper_bound >= domain.lower_bound
            && domain.holes.contains(&domain.upper_bound)
        {
            domain.upper_bound -= 1;
        }

        if domain.lower_bound > domain.upper_bound {
            return Err(EmptyDomain);
        }

        self.events.event_occurred(DomainEvent::UpperBound, domain_id);
        if self.is_domain_assigned(domain_id) {
            self.events.event_occurred(DomainEvent::Assign, domain_id);
        }

        Ok(())
    }

    pub(crate) fn remove_value(
        &mut self,
        domain_id: DomainId,
        value: i32,
    ) -> Result<(), EmptyDomain> {
        if !self.is_value_in_domain(domain_id, value) {
            return Ok(());
        }

        let domain = &self.domains[domain_id];

        // Removing a bound value is a bound tightening, which keeps lb <= ub in the stored
        // representation.
        if value == domain.lower_bound {
            return self.tighten_lower_bound(domain_id, value + 1);
        }
        if value == domain.upper_bound {
            return self.tighten_upper_bound(domain_id, value - 1);
        }

        self.trail.push(TrailEntry {
            predicate: Predicate::NotEqual {
                domain_id,
                not_equal_constant: value,
            },
            old_lower_bound: domain.lower_bound,
            old_upper_bound: domain.upper_bound,
        });

        let domain = &mut self.domains[domain_id];
        let _ = domain.holes.insert(value);

        self.events.event_occurred(DomainEvent::Removal, domain_id);

        Ok(())
    }

    pub(crate) fn make_assignment(
        &mut self,
        domain_id: DomainId,
        value: i32,
    ) -> Result<(), EmptyDomain> {
        self.tighten_lower_bound(domain_id, value)?;
        self.tighten_upper_bound(domain_id, value)
    }

    /// Applies the domain operation described by the predicate.
    pub(crate) fn post_predicate(&mut self, predicate: Predicate) -> Result<(), EmptyDomain> {
        match predicate {
            Predicate::LowerBound {
                domain_id,
                lower_bound,
            } => self.tighten_lower_bound(domain_id, lower_bound),
            Predicate::UpperBound {
                domain_id,
                upper_bound,
            } => self.tighten_upper_bound(domain_id, upper_bound),
            Predicate::NotEqual {
                domain_id,
                not_equal_constant,
            } => self.remove_value(domain_id, not_equal_constant),
            Predicate::Equal {
                domain_id,
                equality_constant,
            } => self.make_assignment(domain_id, equality_constant),
        }
    }

    /// Determines whether the predicate holds under the current domains: `Some(true)` when it is
    /// guaranteed, `Some(false)` when it is impossible, and `None` while undetermined.
    pub(crate) fn evaluate_predicate(&self, predicate: Predicate) -> Option<bool> {
        match predicate {
            Predicate::LowerBound {
                domain_id,
                lower_bound,
            } => {
                if self.get_lower_bound(domain_id) >= lower_bound {
                    Some(true)
                } else if self.get_upper_bound(domain_id) < lower_bound {
                    Some(false)
                } else {
                    None
                }
            }
            Predicate::UpperBound {
                domain_id,
                upper_bound,
            } => {
                if self.get_upper_bound(domain_id) <= upper_bound {
                    Some(true)
                } else if self.get_lower_bound(domain_id) > upper_bound {
                    Some(false)
                } else {
                    None
                }
            }
            Predicate::NotEqual {
                domain_id,
                not_equal_constant,
            } => {
                if !self.is_value_in_domain(domain_id, not_equal_constant) {
                    Some(true)
                } else if self.get_assigned_value(domain_id) == Some(not_equal_constant) {
                    Some(false)
                } else {
                    None
                }
            }
            Predicate::Equal {
                domain_id,
                equality_constant,
            } => {
                if !self.is_value_in_domain(domain_id, equality_constant) {
                    Some(false)
                } else if self.get_assigned_value(domain_id) == Some(equality_constant) {
                    Some(true)
                } else {
                    None
                }
            }
        }
    }

    /// Drains the domain events which occurred since the previous drain.
    pub(crate) fn drain_domain_events(
        &mut self,
    ) -> impl Iterator<Item = (DomainEvent, DomainId)> + '_ {
        self.events.drain()
    }

    /// Restores the domains to their state at the given decision level by undoing all trail
    /// entries pushed since, in reverse chronological order. Pending domain events are
    /// discarded, since they describe changes which no longer hold.
    pub(crate) fn synchronise(&mut self, new_decision_level: usize) {
        marrow_assert_simple!(new_decision_level < self.get_decision_level());

        self.events.drain().for_each(drop);

        for entry in self.trail.synchronise(new_decision_level) {
            let domain_id = entry.predicate.get_domain();
            let domain = &mut self.domains[domain_id];

            if let Predicate::NotEqual {
                not_equal_constant, ..
            } = entry.predicate
            {
                let removed = domain.holes.remove(&not_equal_constant);
                marrow_assert_moderate!(removed);
            }

            domain.lower_bound = entry.old_lower_bound;
            domain.upper_bound = entry.old_upper_bound;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lower_bound_change_lower_bound_event() {
        let mut assignments = Assignments::default();
        let d1 = assignments.grow(1, 5);

        assignments
            .tighten_lower_bound(d1, 2)
            .expect("non-empty domain");

        let events = assignments.drain_domain_events().collect::<Vec<_>>();
        assert_eq!(events.len(), 1);
        assert!(events.contains(&(DomainEvent::LowerBound, d1)));
    }

    #[test]
    fn fixing_a_domain_also_announces_assignment() {
        let mut assignments = Assignments::default();
        let d1 = assignments.grow(1, 5);

        assignments
            .tighten_upper_bound(d1, 1)
            .expect("non-empty domain");

        let events = assignments.drain_domain_events().collect::<Vec<_>>();
        assert_eq!(events.len(), 2);
        assert!(events.contains(&(DomainEvent::UpperBound, d1)));
        assert!(events.contains(&(DomainEvent::Assign, d1)));
    }

    #[test]
    fn removing_the_bound_value_tightens_the_bound() {
        let mut assignments = Assignments::default();
        let d1 = assignments.grow(1, 5);

        assignments.remove_value(d1, 1).expect("non-empty domain");

        assert_eq!(assignments.get_lower_bound(d1), 2);
        let events = assignments.drain_domain_events().collect::<Vec<_>>();
        assert!(events.contains(&(DomainEvent::LowerBound, d1)));
        assert!(!events.contains(&(DomainEvent::Removal, d1)));
    }

    #[test]
    fn removing_an_interior_value_punches_a_hole() {
        let mut assignments = Assignments::default();
        let d1 = assignments.grow(1, 5);

        assignments.remove_value(d1, 3).expect("non-empty domain");

        assert!(!assignments.is_value_in_domain(d1, 3));
        assert_eq!(assignments.get_lower_bound(d1), 1);
        assert_eq!(assignments.get_upper_bound(d1), 5);
        assert_eq!(assignments.get_domain_size(d1), 4);

        let events = assignments.drain_domain_events().collect::<Vec<_>>();
        assert!(events.contains(&(DomainEvent::Removal, d1)));
    }

    #[test]
    fn bound_tightening_skips_over_holes() {
        let mut assignments = Assignments::default();
        let d1 = assignments.grow(1, 5);

        assignments.remove_value(d1, 3).expect("non-empty domain");
        assignments
            .tighten_lower_bound(d1, 3)
            .expect("non-empty domain");

        assert_eq!(assignments.get_lower_bound(d1), 4);
    }

    #[test]
    fn emptying_a_domain_is_reported() {
        let mut assignments = Assignments::default();
        let d1 = assignments.grow(1, 5);

        assert_eq!(assignments.tighten_lower_bound(d1, 6), Err(EmptyDomain));
    }

    #[test]
    fn assigning_to_a_hole_is_an_empty_domain() {
        let mut assignments = Assignments::default();
        let d1 = assignments.grow(1, 5);

        assignments.remove_value(d1, 3).expect("non-empty domain");
        assert_eq!(assignments.make_assignment(d1, 3), Err(EmptyDomain));
    }

    #[test]
    fn synchronise_restores_domains_exactly() {
        let mut assignments = Assignments::default();
        let d1 = assignments.grow(1, 5);
        let d2 = assignments.grow(-3, 7);

        assignments.remove_value(d1, 3).expect("non-empty domain");
        let before = (
            assignments.get_domain_description(d1),
            assignments.get_domain_description(d2),
        );

        assignments.increase_decision_level();
        assignments
            .tighten_lower_bound(d1, 4)
            .expect("non-empty domain");
        assignments.remove_value(d2, 0).expect("non-empty domain");
        assignments.make_assignment(d2, 5).expect("non-empty domain");

        assignments.synchronise(0);

        let after = (
            assignments.get_domain_description(d1),
            assignments.get_domain_description(d2),
        );
        assert_eq!(before, after);
    }

    #[test]
    fn synchronise_discards_pending_events() {
        let mut assignments = Assignments::default();
        let d1 = assignments.grow(1, 5);

        assignments.increase_decision_level();
        assignments
            .tighten_lower_bound(d1, 4)
            .expect("non-empty domain");

        assignments.synchronise(0);

        assert!(assignments.drain_domain_events().next().is_none());
    }

    #[test]
    fn evaluating_predicates() {
        let mut assignments = Assignments::default();
        let d1 = assignments.grow(1, 5);

        assert_eq!(
            assignments.evaluate_predicate(crate::predicate![d1 >= 1]),
            Some(true)
        );
        assert_eq!(
            assignments.evaluate_predicate(crate::predicate![d1 >= 6]),
            Some(false)
        );
        assert_eq!(
            assignments.evaluate_predicate(crate::predicate![d1 >= 3]),
            None
        );
        assert_eq!(
            assignments.evaluate_predicate(crate::predicate![d1 == 2]),
            None
        );

        assignments.make_assignment(d1, 2).expect("non-empty domain");

        assert_eq!(
            assignments.evaluate_predicate(crate::predicate![d1 == 2]),
            Some(true)
        );
        assert_eq!(
            assignments.evaluate_predicate(crate::predicate![d1 != 2]),
            Some(false)
        );
    }
}
