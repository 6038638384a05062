/*!
 * Clock
 * Wall-clock and monotonic time utilities
 */

use std::sync::OnceLock;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

// Zero point for monotonic readings, set on first use
fn epoch() -> Instant {
    static EPOCH: OnceLock<Instant> = OnceLock::new();
    *EPOCH.get_or_init(Instant::now)
}

/// Seconds since the Unix epoch (0 if the system clock predates it)
#[must_use]
pub fn unix_time() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Milliseconds of monotonic time since the process clock was first read
#[must_use]
pub fn system_time_ms() -> u64 {
    epoch().elapsed().as_millis() as u64
}

/// Monotonic time elapsed since the process clock was first read
#[must_use]
pub fn uptime() -> Duration {
    epoch().elapsed()
}
