/*!
 * Scheduler Bootstrap
 * One-time process-wide initialization and priority translation
 */

mod priority;

pub use priority::PriorityMap;
pub(crate) use priority::apply_native;

use crate::clock;
use crate::core::types::ThreadResult;
use crate::core::ThreadError;
use log::info;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

// Enforces the one-start-per-process contract
static STARTED: AtomicBool = AtomicBool::new(false);

/// Process-wide scheduler bootstrap
///
/// Started exactly once per process; a second start fails with
/// AlreadyStarted. The started scheduler is passed by reference to every
/// thread manager - holding an `Arc<Scheduler>` is proof the bootstrap ran,
/// and creating threads without one fails with NotInitialized.
pub struct Scheduler {
    mapping: PriorityMap,
    started_at_ms: u64,
}

impl Scheduler {
    /// Start the scheduler with the default priority mapping
    pub fn start() -> ThreadResult<Arc<Self>> {
        Self::start_with_mapping(PriorityMap::default())
    }

    /// Start the scheduler with a custom priority mapping
    pub fn start_with_mapping(mapping: PriorityMap) -> ThreadResult<Arc<Self>> {
        if STARTED
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(ThreadError::AlreadyStarted);
        }

        info!("Scheduler started: mapping={:?}", mapping);
        Ok(Arc::new(Self {
            mapping,
            started_at_ms: clock::system_time_ms(),
        }))
    }

    /// Priority translation table established at bootstrap
    #[inline]
    #[must_use]
    pub fn mapping(&self) -> &PriorityMap {
        &self.mapping
    }

    /// Time elapsed since the scheduler was started
    #[must_use]
    pub fn uptime(&self) -> Duration {
        Duration::from_millis(clock::system_time_ms().saturating_sub(self.started_at_ms))
    }
}

/// Shared bootstrap for unit tests - start() is one-shot per process
#[cfg(test)]
pub(crate) fn test_scheduler() -> Arc<Scheduler> {
    use std::sync::OnceLock;
    static SCHED: OnceLock<Arc<Scheduler>> = OnceLock::new();
    Arc::clone(SCHED.get_or_init(|| Scheduler::start().expect("first start in process")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_start_fails() {
        let _sched = test_scheduler();
        assert!(matches!(
            Scheduler::start(),
            Err(ThreadError::AlreadyStarted)
        ));
    }

    #[test]
    fn test_uptime_advances() {
        let sched = test_scheduler();
        let before = sched.uptime();
        std::thread::sleep(Duration::from_millis(5));
        assert!(sched.uptime() > before);
    }
}
