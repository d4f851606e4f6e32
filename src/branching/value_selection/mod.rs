//! Value selectors: given a branching variable, pick the value (as a [`Predicate`]) to try
//! first.
//!
//! [`Predicate`]: crate::predicates::Predicate

mod in_domain_max;
mod in_domain_min;
mod in_domain_random;

pub use in_domain_max::InDomainMax;
pub use in_domain_min::InDomainMin;
pub use in_domain_random::InDomainRandom;

use super::SelectionContext;
use crate::engine::predicates::Predicate;
use crate::engine::variables::DomainId;

/// Picks the decision predicate for the given unfixed variable. The returned predicate must be
/// undetermined under the current domains, so both it and its negation restrict the domain.
pub trait ValueSelector {
    fn select_value(
        &mut self,
        context: &mut SelectionContext<'_>,
        decision_variable: DomainId,
    ) -> Predicate;
}
