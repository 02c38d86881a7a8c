use std::{sync::Arc, time::Duration};

use dummy_controller_core::{
    kubernetes::store::DummyStore, resources::controller::ControllerConfig,
};

use super::backoff::{ErrorBackoff, MAX_REQUEUE_SECS};

pub struct ReconcilerContext {
    pub store: Arc<dyn DummyStore>,
    pub config: ControllerConfig,
    /// passes that returned an error
    pub backoff: ErrorBackoff,
    /// passes that asked to be retried right away, starts at `retry_delay`
    pub retry_backoff: ErrorBackoff,
}

impl ReconcilerContext {
    pub fn new(store: Arc<dyn DummyStore>, config: ControllerConfig) -> Self {
        let retry_backoff =
            ErrorBackoff::new(config.retry_delay, Duration::from_secs(MAX_REQUEUE_SECS));

        Self {
            store,
            config,
            backoff: ErrorBackoff::default(),
            retry_backoff,
        }
    }
}
