/*!
 * System Limits and Constants
 *
 * Centralized location for thread PAL limits and thresholds.
 * All values include rationale comments explaining WHY they exist.
 */

/// Maximum thread name length in bytes (32)
/// Bounded so names stay cheap to copy into diagnostics snapshots; embedded
/// RTOS targets bound task names the same way
pub const THREAD_NAME_MAX: usize = 32;

/// Minimum stack size (16KB)
/// Requests below this are clamped up; matches the floor POSIX imposes via
/// PTHREAD_STACK_MIN on common targets
pub const MIN_STACK_SIZE: usize = 16 * 1024;

/// Default stack size (2MB)
/// Matches the platform default for spawned threads
pub const DEFAULT_STACK_SIZE: usize = 2 * 1024 * 1024;

/// Maximum live thread records in the registry (4096)
/// Guards against handle leaks exhausting the process; creation beyond this
/// fails with ResourceExhausted
pub const MAX_THREADS: usize = 4096;
