/*!
 * Core Types
 * Common types used across the thread PAL
 */

/// Thread identifier - stable slot index into the handle registry
pub type ThreadId = u32;

/// Handle generation counter - detects use of stale handles after free
pub type Generation = u32;

/// Stack size in bytes
pub type StackSize = usize;

/// Common result type for thread operations
pub type ThreadResult<T> = Result<T, super::errors::ThreadError>;
