use crate::config::RetryConfig;
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::warn;

/// Run a store operation with jittered exponential backoff
///
/// Errors rejected by `should_retry` are returned at once.
pub async fn retry_with_backoff<F, Fut, T, E, R>(
    config: &RetryConfig,
    should_retry: R,
    mut operation: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
    R: Fn(&E) -> bool,
{
    let max_attempts = config.max_attempts.max(1);
    let mut attempts = 0;
    let mut backoff_ms = config.backoff_base_ms;

    loop {
        attempts += 1;

        match operation().await {
            Ok(result) => return Ok(result),
            Err(e) if !should_retry(&e) => return Err(e),
            Err(e) if attempts >= max_attempts => {
                warn!("Giving up after {} store attempts: {}", attempts, e);
                return Err(e);
            }
            Err(e) => {
                // base * 2^attempt + random(0..base)
                let jitter = rand::random::<u64>() % config.backoff_base_ms.max(1);
                let delay = Duration::from_millis(backoff_ms + jitter);

                warn!(
                    "Store attempt {} failed: {}. Retrying in {:?}...",
                    attempts, e, delay
                );

                sleep(delay).await;
                backoff_ms = backoff_ms.saturating_mul(2);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn fast(max_attempts: u32) -> RetryConfig {
        RetryConfig {
            max_attempts,
            backoff_base_ms: 1,
        }
    }

    fn unavailable() -> StoreError {
        StoreError::Io {
            path: "tasks.json".into(),
            source: std::io::Error::new(std::io::ErrorKind::Interrupted, "busy"),
        }
    }

    #[tokio::test]
    async fn test_first_write_succeeds() {
        let result: Result<usize, StoreError> =
            retry_with_backoff(&fast(3), StoreError::is_transient, || async { Ok(7) }).await;

        assert_eq!(result.unwrap(), 7);
    }

    #[tokio::test]
    async fn test_recovers_after_transient_failures() {
        let calls = AtomicU32::new(0);

        let result = retry_with_backoff(&fast(3), StoreError::is_transient, || async {
            if calls.fetch_add(1, Ordering::SeqCst) < 2 {
                Err(unavailable())
            } else {
                Ok(7)
            }
        })
        .await;

        assert_eq!(result.unwrap(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_gives_up_after_max_attempts() {
        let calls = AtomicU32::new(0);

        let result: Result<usize, StoreError> =
            retry_with_backoff(&fast(3), StoreError::is_transient, || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(unavailable())
            })
            .await;

        assert!(matches!(result, Err(StoreError::Io { .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_zero_backoff_base() {
        let config = RetryConfig {
            max_attempts: 2,
            backoff_base_ms: 0,
        };

        let result: Result<usize, StoreError> =
            retry_with_backoff(&config, StoreError::is_transient, || async { Err(unavailable()) })
                .await;

        assert!(matches!(result, Err(StoreError::Io { .. })));
    }

    #[tokio::test]
    async fn test_permanent_failure_is_not_retried() {
        let calls = AtomicU32::new(0);

        let result: Result<usize, StoreError> =
            retry_with_backoff(&fast(3), StoreError::is_transient, || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(StoreError::TaskNotFound("t".into()))
            })
            .await;

        assert!(matches!(result, Err(StoreError::TaskNotFound(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
