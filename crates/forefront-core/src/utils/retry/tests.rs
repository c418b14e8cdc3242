use super::*;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

#[test]
fn test_retry_config_defaults() {
    let config = RetryConfig::default();
    assert_eq!(config.max_attempts, 2);
    assert_eq!(config.initial_delay, Duration::from_millis(250));
    assert!(config.jitter);
    assert_eq!(RetryConfig::disabled().max_attempts, 1);
}

#[test]
fn test_max_attempts_never_zero() {
    assert_eq!(RetryConfig::new().with_max_attempts(0).max_attempts, 1);
}

#[test]
fn test_delay_growth_and_cap() {
    let config = RetryConfig::new()
        .with_initial_delay(Duration::from_millis(100))
        .with_max_delay(Duration::from_millis(300))
        .with_backoff_multiplier(2.0)
        .with_jitter(false);

    assert_eq!(config.delay_after(1), Duration::from_millis(100));
    assert_eq!(config.delay_after(2), Duration::from_millis(200));
    assert_eq!(config.delay_after(3), Duration::from_millis(300));
}

#[test]
fn test_jitter_bounded() {
    let config = RetryConfig::new()
        .with_initial_delay(Duration::from_millis(400))
        .with_jitter(true);
    let delay = config.delay_after(1);
    assert!(delay >= Duration::from_millis(400));
    assert!(delay < Duration::from_millis(500));
}

async fn run_counting(
    config: &RetryConfig,
    succeed_on: u32,
    retryable: bool,
) -> (Result<u32, RetryError<&'static str>>, u32) {
    let counter = Arc::new(AtomicU32::new(0));
    let c = counter.clone();
    let result = retry_with_backoff(
        config,
        || {
            let c = c.clone();
            async move {
                let n = c.fetch_add(1, Ordering::SeqCst) + 1;
                if n >= succeed_on {
                    Ok(n)
                } else {
                    Err("backend unavailable")
                }
            }
        },
        |_| retryable,
    )
    .await;
    (result, counter.load(Ordering::SeqCst))
}

#[tokio::test]
async fn test_success_first_attempt() {
    let config = RetryConfig::new().with_initial_delay(Duration::from_millis(1));
    let (result, calls) = run_counting(&config, 1, true).await;
    assert_eq!(result.unwrap(), 1);
    assert_eq!(calls, 1);
}

#[tokio::test]
async fn test_single_retry_recovers() {
    let config = RetryConfig::new()
        .with_max_attempts(2)
        .with_initial_delay(Duration::from_millis(1));
    let (result, calls) = run_counting(&config, 2, true).await;
    assert_eq!(result.unwrap(), 2);
    assert_eq!(calls, 2);
}

#[tokio::test]
async fn test_gives_up_after_max_attempts() {
    let config = RetryConfig::new()
        .with_max_attempts(3)
        .with_initial_delay(Duration::from_millis(1));
    let (result, calls) = run_counting(&config, 10, true).await;
    let err = result.unwrap_err();
    assert_eq!(err.attempts, 3);
    assert_eq!(err.last_error, "backend unavailable");
    assert_eq!(calls, 3);
    assert!(err.to_string().contains("3 attempt(s)"));
}

#[tokio::test]
async fn test_non_retryable_returns_immediately() {
    let config = RetryConfig::new()
        .with_max_attempts(5)
        .with_initial_delay(Duration::from_millis(1));
    let (result, calls) = run_counting(&config, 10, false).await;
    assert_eq!(result.unwrap_err().attempts, 1);
    assert_eq!(calls, 1);
}
