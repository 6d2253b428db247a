//! Rate limit coordination for the Discord API.
//!
//! A [`RateLimiter`] is owned by one [`HttpClient`](crate::clients::HttpClient)
//! and holds two pieces of shared state:
//!
//! - A lock table mapping each bucket key to a fair async mutex. Holding a
//!   [`BucketGuard`] is the right to have one request in flight for that
//!   bucket.
//! - A global gate. A global 429 closes it until a deadline; while it is
//!   closed no request on any bucket proceeds past [`RateLimiter::wait_for_global`].
//!
//! # Deferred release
//!
//! When a response reports that a bucket is exhausted, the holder calls
//! [`BucketGuard::defer_for`]. The guard still unlocks when dropped, but the
//! release time is recorded in the bucket, and the next holder sleeps until
//! it passes before sending. Because the deadline lives in the bucket and
//! not in a spawned task, dropping a request future never loses it.
//!
//! # Example
//!
//! ```rust
//! use restcord::clients::RateLimiter;
//! use std::time::Duration;
//!
//! # tokio_test::block_on(async {
//! let limiter = RateLimiter::new();
//!
//! let mut guard = limiter.acquire("1::/channels/{channel_id}").await;
//! guard.defer_for(Duration::from_millis(5));
//! drop(guard);
//!
//! // Waits until the deferred release has passed
//! let _guard = limiter.acquire("1::/channels/{channel_id}").await;
//! # });
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::sync::OwnedMutexGuard;
use tokio::time::{sleep_until, Instant};

/// Number of lock table entries above which idle entries are swept.
pub const DEFAULT_SWEEP_THRESHOLD: usize = 256;

/// Longest deferral accepted by [`BucketGuard::defer_for`] and
/// [`RateLimiter::close_global_for`].
const MAX_DELAY: Duration = Duration::from_secs(86_400);

#[derive(Debug, Default)]
struct BucketState {
    release_at: Option<Instant>,
}

type BucketLock = Arc<tokio::sync::Mutex<BucketState>>;

/// Per-bucket locks and the global gate for one transport.
#[derive(Debug)]
pub struct RateLimiter {
    buckets: Mutex<HashMap<String, BucketLock>>,
    global_until: Mutex<Option<Instant>>,
    sweep_threshold: usize,
}

// Verify RateLimiter is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RateLimiter>();
    assert_send_sync::<BucketGuard>();
};

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

impl RateLimiter {
    /// Creates a limiter with an open gate and an empty lock table.
    #[must_use]
    pub fn new() -> Self {
        Self::with_sweep_threshold(DEFAULT_SWEEP_THRESHOLD)
    }

    /// Creates a limiter that sweeps idle buckets once the table holds more
    /// than `threshold` entries.
    #[must_use]
    pub fn with_sweep_threshold(threshold: usize) -> Self {
        Self {
            buckets: Mutex::new(HashMap::new()),
            global_until: Mutex::new(None),
            sweep_threshold: threshold,
        }
    }

    /// Acquires exclusive use of `bucket`.
    ///
    /// Waiters are served in FIFO order. If the previous holder deferred its
    /// release, this waits for the deferral to pass before returning.
    pub async fn acquire(&self, bucket: &str) -> BucketGuard {
        let lock = self.bucket_lock(bucket);
        let mut guard = BucketGuard {
            bucket: bucket.to_string(),
            state: lock.lock_owned().await,
        };
        guard.wait_deferred().await;
        guard
    }

    /// Suspends while the global gate is closed.
    ///
    /// Closures that extend the deadline while this is waiting are honoured.
    pub async fn wait_for_global(&self) {
        loop {
            let until = {
                let gate = self.global_until.lock().unwrap_or_else(PoisonError::into_inner);
                match *gate {
                    Some(until) if until > Instant::now() => until,
                    _ => return,
                }
            };
            tracing::debug!(
                "Global rate limit in effect, waiting {:.3}s",
                until.saturating_duration_since(Instant::now()).as_secs_f64()
            );
            sleep_until(until).await;
        }
    }

    /// Closes the global gate for `duration`.
    ///
    /// An already closed gate is only ever extended, never shortened.
    pub fn close_global_for(&self, duration: Duration) {
        let deadline = Instant::now() + duration.min(MAX_DELAY);
        let mut gate = self.global_until.lock().unwrap_or_else(PoisonError::into_inner);
        *gate = Some(gate.map_or(deadline, |current| current.max(deadline)));
    }

    /// Returns `true` while the global gate is closed.
    #[must_use]
    pub fn is_global_closed(&self) -> bool {
        self.global_until
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some_and(|until| until > Instant::now())
    }

    /// Returns the number of buckets in the lock table.
    #[must_use]
    pub fn bucket_count(&self) -> usize {
        self.buckets
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn bucket_lock(&self, bucket: &str) -> BucketLock {
        let mut buckets = self.buckets.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(lock) = buckets.get(bucket) {
            return Arc::clone(lock);
        }

        if buckets.len() >= self.sweep_threshold {
            let before = buckets.len();
            buckets.retain(|_, lock| !is_idle(lock));
            tracing::debug!(
                "Swept {} idle rate limit buckets, {} remain",
                before - buckets.len(),
                buckets.len()
            );
        }

        let lock = BucketLock::default();
        buckets.insert(bucket.to_string(), Arc::clone(&lock));
        lock
    }
}

/// An entry is idle when only the table references it, nobody holds it,
/// and no deferred release is pending.
fn is_idle(lock: &BucketLock) -> bool {
    if Arc::strong_count(lock) > 1 {
        return false;
    }
    lock.try_lock().is_ok_and(|state| {
        state
            .release_at
            .map_or(true, |release_at| release_at <= Instant::now())
    })
}

/// Exclusive use of one rate limit bucket.
///
/// Dropping the guard unlocks the bucket. A release deferred with
/// [`defer_for`](Self::defer_for) is carried over to the next holder.
#[derive(Debug)]
pub struct BucketGuard {
    bucket: String,
    state: OwnedMutexGuard<BucketState>,
}

impl BucketGuard {
    /// Returns the bucket key.
    #[must_use]
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Defers the release of the bucket by `delay` from now.
    pub fn defer_for(&mut self, delay: Duration) {
        self.state.release_at = Some(Instant::now() + delay.min(MAX_DELAY));
    }

    /// Returns the pending release time, if one was deferred.
    #[must_use]
    pub fn release_at(&self) -> Option<Instant> {
        self.state.release_at
    }

    /// Sleeps until a deferred release has passed.
    ///
    /// The deadline is cleared only after the sleep completes.
    pub async fn wait_deferred(&mut self) {
        if let Some(release_at) = self.state.release_at {
            if release_at > Instant::now() {
                tracing::debug!(
                    "Bucket {} is exhausted, waiting {:.3}s",
                    self.bucket,
                    release_at.saturating_duration_since(Instant::now()).as_secs_f64()
                );
                sleep_until(release_at).await;
            }
            self.state.release_at = None;
        }
    }
}
