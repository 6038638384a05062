/*!
 * PAL OS Library
 * Cross-platform thread management abstraction layer
 */

pub mod clock;
pub mod core;
pub mod scheduler;
pub mod thread;

// Re-exports
pub use crate::core::errors::ThreadError;
pub use crate::core::types::{ThreadId, ThreadResult};
pub use scheduler::{PriorityMap, Scheduler};
pub use thread::{
    sleep, sleep_ms, SpawnConfig, ThreadHandle, ThreadInfo, ThreadManager, ThreadManagerBuilder,
    ThreadPriority, ThreadState,
};
