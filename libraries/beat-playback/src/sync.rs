//! Background remote sync
//!
//! Local state always changes first; the remote call runs detached. What a
//! failure means is decided per operation by a [`SyncPolicy`], never ad hoc
//! at the call site.

use std::future::Future;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// How a failed remote call relates to the local change it mirrors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncPolicy {
    /// Advisory write: log the failure, keep the local change
    BestEffort,

    /// Correctness-sensitive write: the caller must undo the local change
    RevertOnFailure,
}

/// Result of a background remote call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Remote side accepted the change
    Committed,

    /// Failed under `BestEffort`; nothing to undo
    Ignored(String),

    /// Failed under `RevertOnFailure`; the local change must be rolled back
    RevertRequired(String),
}

impl SyncOutcome {
    fn from_result(label: &str, policy: SyncPolicy, result: beat_core::Result<()>) -> Self {
        match (result, policy) {
            (Ok(()), _) => {
                debug!(operation = label, "Remote sync committed");
                SyncOutcome::Committed
            }
            (Err(e), SyncPolicy::BestEffort) => {
                warn!(operation = label, error = %e, "Remote sync failed, keeping local state");
                SyncOutcome::Ignored(e.to_string())
            }
            (Err(e), SyncPolicy::RevertOnFailure) => {
                warn!(operation = label, error = %e, "Remote sync failed, local change must be reverted");
                SyncOutcome::RevertRequired(e.to_string())
            }
        }
    }
}

/// Run `call` detached on the current tokio runtime
///
/// Returns `None` (and logs) when no runtime is active, so synchronous
/// callers never panic over telemetry.
pub fn spawn_remote<F>(
    label: &'static str,
    policy: SyncPolicy,
    call: F,
) -> Option<JoinHandle<SyncOutcome>>
where
    F: Future<Output = beat_core::Result<()>> + Send + 'static,
{
    let Ok(handle) = tokio::runtime::Handle::try_current() else {
        warn!(operation = label, "No async runtime, skipping remote sync");
        return None;
    };

    Some(handle.spawn(async move { SyncOutcome::from_result(label, policy, call.await) }))
}
