use std::time::Duration;

use kube::runtime::controller::Action;

pub mod backoff;
pub mod context;
pub mod dummy;
pub mod error;
pub mod pod;
pub mod status;

#[cfg(test)]
pub mod testing;

/// What the controller should do with a key once a reconciliation pass is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requeue {
    /// run again as soon as possible
    Immediately,
    After(Duration),
    /// wait for the next change event
    Never,
}

impl Requeue {
    /// `retry_delay` is only used by [`Requeue::Immediately`]
    pub fn into_action(self, retry_delay: Duration) -> Action {
        match self {
            Requeue::Immediately => Action::requeue(retry_delay),
            Requeue::After(duration) => Action::requeue(duration),
            Requeue::Never => Action::await_change(),
        }
    }
}
