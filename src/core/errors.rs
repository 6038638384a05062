/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 */

use crate::core::types::ThreadId;
use crate::thread::types::ThreadState;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Thread PAL errors with serialization support
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum ThreadError {
    #[error("Scheduler not started")]
    #[diagnostic(
        code(thread::not_initialized),
        help("Call Scheduler::start() and attach it to the manager before creating threads.")
    )]
    NotInitialized,

    #[error("Scheduler already started")]
    #[diagnostic(
        code(scheduler::already_started),
        help("Scheduler::start() is a one-time process-wide bootstrap. Share the existing handle.")
    )]
    AlreadyStarted,

    #[error("Resource exhausted: {0}")]
    #[diagnostic(
        code(thread::resource_exhausted),
        help("The OS could not allocate a thread or stack. Free threads or lower stack sizes.")
    )]
    ResourceExhausted(String),

    #[error("Invalid thread handle: {0}")]
    #[diagnostic(
        code(thread::invalid_handle),
        help("The handle was freed or never valid. Handles must not be used after free.")
    )]
    InvalidHandle(ThreadId),

    #[error("Thread {0} is still running")]
    #[diagnostic(
        code(thread::still_running),
        help("Join the thread before freeing its handle; free does not detach.")
    )]
    StillRunning(ThreadId),

    #[error("Invalid argument: {0}")]
    #[diagnostic(
        code(thread::invalid_argument),
        help("Check stack size and name length against the documented limits.")
    )]
    InvalidArgument(String),

    #[error("Invalid state transition: {from:?} -> {to:?}")]
    #[diagnostic(
        code(thread::invalid_state_transition),
        help("Thread states only move forward: Running -> Stopped -> Terminated.")
    )]
    InvalidStateTransition { from: ThreadState, to: ThreadState },
}
