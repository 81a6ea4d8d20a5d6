//! Detached cache reconciliation tasks.

use recall_core::RecallResult;
use std::future::Future;
use tracing::{debug, info, warn};

/// Runs `fut` on its own tokio task without keeping a handle.
///
/// Nothing awaits or cancels the task; its outcome is only logged. A cache
/// miss is expected during reconciliation and logs at `info`; any other
/// failure logs at `warn`. Callers must move owned snapshots into `fut`.
pub fn spawn_reconcile<F>(task: &'static str, fut: F)
where
    F: Future<Output = RecallResult<()>> + Send + 'static,
{
    tokio::spawn(async move {
        match fut.await {
            Ok(()) => debug!(task, "Cache reconciled"),
            Err(e) if e.is_cache_miss() => {
                info!(task, error = %e, "Cache entry missing, skipping reconciliation");
            }
            Err(e) => warn!(task, error = %e, "Cache reconciliation failed"),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use recall_core::RecallError;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test]
    async fn test_task_runs_detached() {
        let ran = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&ran);

        spawn_reconcile("test", async move {
            flag.store(true, Ordering::SeqCst);
            Ok(())
        });

        for _ in 0..100 {
            if ran.load(Ordering::SeqCst) {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("background task never ran");
    }

    #[tokio::test]
    async fn test_failure_does_not_propagate() {
        spawn_reconcile("miss", async { Err(RecallError::cache_miss("k", "1")) });
        spawn_reconcile("down", async {
            Err(RecallError::Cache("connection refused".to_string()))
        });
        tokio::task::yield_now().await;
    }
}
