use crate::reconciliation::domain::chain_merger::CyclePolicy;

/// Configuration for a reconciliation pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReconcileConfig {
    pub cycle_policy: CyclePolicy,
}

impl ReconcileConfig {
    pub fn with_cycle_policy(mut self, policy: CyclePolicy) -> Self {
        self.cycle_policy = policy;
        self
    }
}
