use crate::containers::KeyedVec;
use crate::engine::variables::DomainId;

/// A full assignment of the variables of a model, extracted from the solver when every domain is
/// fixed. A [`Solution`] is a snapshot and remains valid when the search moves on.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Solution {
    values: KeyedVec<DomainId, i32>,
}

impl Solution {
    pub(crate) fn new(values: KeyedVec<DomainId, i32>) -> Self {
        Solution { values }
    }

    /// The value assigned to `domain_id` in this solution.
    pub fn value(&self, domain_id: DomainId) -> i32 {
        self.values[domain_id]
    }

    /// The number of variables in the solution.
    pub fn num_domains(&self) -> usize {
        self.values.len()
    }

    /// Iterate over the assigned values, in variable creation order.
    pub fn values(&self) -> impl Iterator<Item = i32> + '_ {
        self.values.iter().copied()
    }
}
