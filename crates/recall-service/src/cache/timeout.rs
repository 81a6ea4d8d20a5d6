//! Deadline wrapper for cache round trips.

use recall_core::{RecallError, RecallResult};
use std::future::Future;
use std::time::Duration;

/// Runs `fut` under `duration`, failing with [`RecallError::Timeout`] when
/// the deadline passes first.
pub async fn with_timeout<Fut, T>(duration: Duration, operation: &str, fut: Fut) -> RecallResult<T>
where
    Fut: Future<Output = RecallResult<T>>,
{
    tokio::time::timeout(duration, fut).await.map_err(|_| {
        RecallError::Timeout(format!("Cache {operation} timed out after {duration:?}"))
    })?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_timeout_success() {
        let result = with_timeout(Duration::from_secs(1), "get", async { Ok(42) }).await;
        assert_eq!(result.unwrap(), 42);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_exceeded() {
        let result = with_timeout(Duration::from_secs(30), "hgetall", async {
            tokio::time::sleep(Duration::from_secs(31)).await;
            Ok(())
        })
        .await;

        match result {
            Err(RecallError::Timeout(msg)) => assert!(msg.contains("hgetall")),
            other => panic!("Expected timeout, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_inner_error_passes_through() {
        let result: RecallResult<()> = with_timeout(Duration::from_secs(1), "hget", async {
            Err(RecallError::Cache("connection refused".to_string()))
        })
        .await;
        assert!(matches!(result, Err(RecallError::Cache(_))));
    }
}
