use crate::engine::cp::EmptyDomain;

/// The result of invoking a constraint programming propagator. The propagation can either
/// succeed or identify a contradiction of the current partial assignment.
pub(crate) type PropagationStatusCP = Result<(), Inconsistency>;

/// The reason a propagation pass was aborted. A contradiction is a control-flow signal which is
/// recovered by the search loop through backtracking; it is never surfaced to the user directly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Inconsistency {
    /// A domain operation left no admissible value for some variable.
    EmptyDomain,
    /// A propagator proved its constraint cannot be satisfied under the current domains without
    /// performing a domain operation.
    Conflict,
}

impl From<EmptyDomain> for Inconsistency {
    fn from(_: EmptyDomain) -> Self {
        Inconsistency::EmptyDomain
    }
}
