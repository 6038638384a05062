/*!
 * Thread Module
 * Thread lifecycle management, diagnostics, and cooperative control
 */

pub mod manager;
pub mod registry;
pub mod types;
pub mod watermark;

// Re-export for convenience
pub use manager::{ThreadManager, ThreadManagerBuilder};
pub use registry::ThreadHandle;
pub use types::{SpawnConfig, ThreadInfo, ThreadPriority, ThreadState};

use std::time::Duration;

/// Suspend the calling thread for at least `duration`
///
/// Never wakes early; may sleep longer under scheduling pressure.
pub fn sleep(duration: Duration) {
    std::thread::sleep(duration);
}

/// Suspend the calling thread for at least `time_ms` milliseconds
pub fn sleep_ms(time_ms: u64) {
    sleep(Duration::from_millis(time_ms));
}
