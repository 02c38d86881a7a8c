use std::time::Duration;

use dashmap::DashMap;
use dummy_controller_core::resources::crd::v1alpha1::dummy::Dummy;
use kube::runtime::reflector::ObjectRef;

const INITIAL_ERROR_REQUEUE_SECS: u64 = 5;
pub const MAX_REQUEUE_SECS: u64 = 60 * 5;

/// Per-key exponential backoff for passes that didn't converge.
pub struct ErrorBackoff {
    failures: DashMap<ObjectRef<Dummy>, u32>,
    initial: Duration,
    max: Duration,
}

impl Default for ErrorBackoff {
    fn default() -> Self {
        Self::new(
            Duration::from_secs(INITIAL_ERROR_REQUEUE_SECS),
            Duration::from_secs(MAX_REQUEUE_SECS),
        )
    }
}

impl ErrorBackoff {
    pub fn new(initial: Duration, max: Duration) -> Self {
        Self {
            failures: DashMap::new(),
            initial,
            max,
        }
    }

    /// Records a failed attempt and returns how long to wait before the next one
    pub fn next_delay(&self, key: &ObjectRef<Dummy>) -> Duration {
        let mut failures = self.failures.entry(key.clone()).or_insert(0);
        let delay = self.delay_for(*failures);

        *failures = failures.saturating_add(1);

        delay
    }

    pub fn reset(&self, key: &ObjectRef<Dummy>) {
        self.failures.remove(key);
    }

    fn delay_for(&self, failures: u32) -> Duration {
        self.initial
            .checked_mul(2u32.saturating_pow(failures))
            .map_or(self.max, |delay| delay.min(self.max))
    }
}
