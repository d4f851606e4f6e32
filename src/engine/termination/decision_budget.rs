use super::TerminationCondition;

/// A [`TerminationCondition`] which allows the search a fixed number of decisions.
#[derive(Clone, Copy, Debug)]
pub struct DecisionBudget {
    remaining: u64,
}

impl DecisionBudget {
    pub fn new(num_decisions: u64) -> DecisionBudget {
        DecisionBudget {
            remaining: num_decisions,
        }
    }
}

impl TerminationCondition for DecisionBudget {
    fn should_stop(&mut self) -> bool {
        self.remaining == 0
    }

    fn on_decision(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }
}
