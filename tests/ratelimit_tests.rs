//! Integration tests for the rate limit coordinator.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use restcord::clients::RateLimiter;
use tokio::time::Instant;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_bucket_has_a_single_holder_across_threads() {
    let limiter = Arc::new(RateLimiter::new());
    let in_flight = Arc::new(AtomicUsize::new(0));
    let max_seen = Arc::new(AtomicUsize::new(0));

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let limiter = Arc::clone(&limiter);
            let in_flight = Arc::clone(&in_flight);
            let max_seen = Arc::clone(&max_seen);
            tokio::spawn(async move {
                let mut guard = limiter.acquire("shared").await;
                guard.wait_deferred().await;

                let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                max_seen.fetch_max(now, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(2)).await;
                in_flight.fetch_sub(1, Ordering::SeqCst);
            })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(max_seen.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_deferred_release_outlives_the_guard() {
    let limiter = RateLimiter::new();

    {
        let mut guard = limiter.acquire("channel:1").await;
        guard.defer_for(Duration::from_millis(200));
    }

    let started = Instant::now();
    let mut next = limiter.acquire("channel:1").await;
    next.wait_deferred().await;

    assert!(started.elapsed() >= Duration::from_millis(190));
    assert!(next.release_at().is_none());
}

#[tokio::test]
async fn test_global_gate_extends_to_latest_deadline() {
    let limiter = RateLimiter::new();

    limiter.close_global_for(Duration::from_millis(200));
    limiter.close_global_for(Duration::from_millis(50));
    assert!(limiter.is_global_closed());

    let started = Instant::now();
    limiter.wait_for_global().await;

    assert!(started.elapsed() >= Duration::from_millis(190));
    assert!(!limiter.is_global_closed());
}

#[tokio::test]
async fn test_idle_buckets_are_swept() {
    let limiter = RateLimiter::with_sweep_threshold(4);

    for i in 0..32 {
        let _guard = limiter.acquire(&format!("bucket:{i}")).await;
    }

    assert!(limiter.bucket_count() <= 4);
}
