//! Clock abstraction for cache-expiry decisions.
//!
//! Cache entries carry absolute expiry timestamps, so anything that decides
//! "expired or not" takes a [`Clock`] instead of calling `Utc::now()`
//! directly. Production code uses [`SystemClock`]; tests use [`ManualClock`]
//! to pin and advance time.

use chrono::{DateTime, TimeZone, Utc};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

/// A source of the current time.
pub trait Clock: Send + Sync {
    /// Returns the current instant.
    fn now(&self) -> DateTime<Utc>;

    /// Returns the current instant as seconds since the Unix epoch.
    fn now_secs(&self) -> i64 {
        self.now().timestamp()
    }
}

/// The real system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock pinned to an explicit instant, advanced by hand.
///
/// Cloning shares the underlying instant, so a test can hold one handle
/// while the component under test holds another.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now_secs: Arc<AtomicI64>,
}

impl ManualClock {
    /// Creates a clock pinned to the given epoch-seconds instant.
    #[must_use]
    pub fn at(epoch_secs: i64) -> Self {
        Self {
            now_secs: Arc::new(AtomicI64::new(epoch_secs)),
        }
    }

    /// Advances the clock by the given number of seconds.
    pub fn advance_secs(&self, secs: i64) {
        self.now_secs.fetch_add(secs, Ordering::SeqCst);
    }

    /// Pins the clock to a new instant.
    pub fn set_secs(&self, epoch_secs: i64) {
        self.now_secs.store(epoch_secs, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        Utc.timestamp_opt(self.now_secs.load(Ordering::SeqCst), 0)
            .single()
            .expect("manual clock instant out of range")
    }

    fn now_secs(&self) -> i64 {
        self.now_secs.load(Ordering::SeqCst)
    }
}
