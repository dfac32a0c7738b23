//! Millisecond time source for the id generator.

/// Wall-clock milliseconds since the Unix epoch.
#[cfg_attr(test, mockall::automock)]
pub trait Clock: Send + Sync {
    fn now_millis(&self) -> i64;
}

/// [`Clock`] backed by the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}
