use crate::statistics::log_statistic;

/// Cumulative counters of one solving session, reported to the statistics collaborator through
/// the logging facade.
#[derive(Clone, Copy, Debug, Default)]
pub struct SolverStatistics {
    /// The number of decisions taken by the search loop.
    pub num_decisions: u64,
    /// The number of contradictions recovered through backtracking.
    pub num_conflicts: u64,
    /// The number of propagator invocations by the engine.
    pub num_propagations: u64,
    /// The number of solutions found so far.
    pub num_solutions: u64,
    /// The deepest decision level the search reached.
    pub peak_depth: u64,
}

impl SolverStatistics {
    pub fn log(&self) {
        log_statistic("numberOfDecisions", self.num_decisions);
        log_statistic("numberOfConflicts", self.num_conflicts);
        log_statistic("numberOfPropagations", self.num_propagations);
        log_statistic("numberOfSolutions", self.num_solutions);
        log_statistic("peakDepth", self.peak_depth);
    }
}
