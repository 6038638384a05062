/*!
 * Thread Types
 * Common types for thread lifecycle management
 */

use crate::core::limits::{MIN_STACK_SIZE, THREAD_NAME_MAX};
use crate::core::types::{StackSize, ThreadId, ThreadResult};
use crate::core::ThreadError;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU8, Ordering};

/// Thread priority levels
///
/// Advisory hints translated to native scheduling parameters by the
/// scheduler's priority map; no hard real-time guarantee is implied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThreadPriority {
    /// Low priority
    Low,
    /// Normal priority
    #[default]
    Normal,
    /// High priority
    High,
}

/// Thread state
///
/// Transitions are monotonic: Running -> Stopped -> Terminated or
/// Running -> Terminated. No transition reverses state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThreadState {
    /// Thread is running (initial state, entered by create)
    Running,
    /// Thread is suspended (legal intermediate for suspend-capable backends)
    Stopped,
    /// Entry function returned or panicked
    Terminated,
}

impl ThreadState {
    /// Check whether a transition to `next` moves the state machine forward
    #[must_use]
    pub const fn can_transition_to(self, next: ThreadState) -> bool {
        match (self, next) {
            (ThreadState::Running, ThreadState::Stopped)
            | (ThreadState::Running, ThreadState::Terminated)
            | (ThreadState::Stopped, ThreadState::Terminated) => true,
            (ThreadState::Running, ThreadState::Running)
            | (ThreadState::Stopped, ThreadState::Running)
            | (ThreadState::Stopped, ThreadState::Stopped)
            | (ThreadState::Terminated, _) => false,
        }
    }

    /// Check if thread has terminated
    #[inline(always)]
    #[must_use]
    pub const fn is_terminated(self) -> bool {
        matches!(self, ThreadState::Terminated)
    }

    const fn as_u8(self) -> u8 {
        match self {
            ThreadState::Running => 0,
            ThreadState::Stopped => 1,
            ThreadState::Terminated => 2,
        }
    }

    const fn from_u8(value: u8) -> Self {
        match value {
            0 => ThreadState::Running,
            1 => ThreadState::Stopped,
            _ => ThreadState::Terminated,
        }
    }
}

/// Lock-free thread state cell enforcing forward-only transitions
pub struct AtomicState(AtomicU8);

impl AtomicState {
    #[inline]
    #[must_use]
    pub fn new(state: ThreadState) -> Self {
        Self(AtomicU8::new(state.as_u8()))
    }

    /// Read the current state
    #[inline(always)]
    #[must_use]
    pub fn load(&self) -> ThreadState {
        ThreadState::from_u8(self.0.load(Ordering::Acquire))
    }

    /// Advance the state machine to `to`
    ///
    /// Idempotent: advancing to the current state is a no-op. A backward
    /// transition fails with InvalidStateTransition.
    pub fn advance(&self, to: ThreadState) -> ThreadResult<()> {
        let mut current = self.0.load(Ordering::Acquire);
        loop {
            let from = ThreadState::from_u8(current);
            if from == to {
                return Ok(());
            }
            if !from.can_transition_to(to) {
                return Err(ThreadError::InvalidStateTransition { from, to });
            }
            match self.0.compare_exchange_weak(
                current,
                to.as_u8(),
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => return Ok(()),
                Err(observed) => current = observed,
            }
        }
    }
}

impl std::fmt::Debug for AtomicState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("AtomicState").field(&self.load()).finish()
    }
}

/// Thread metadata snapshot for diagnostics
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ThreadInfo {
    pub id: ThreadId,
    pub name: String,
    pub priority: ThreadPriority,
    pub state: ThreadState,
    pub stack_size: StackSize,
    pub stack_watermark: usize,
    pub uptime_ms: u64,
}

/// Configuration for thread creation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SpawnConfig {
    name: String,
    priority: ThreadPriority,
    stack_size: StackSize,
}

impl SpawnConfig {
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            priority: ThreadPriority::Normal,
            stack_size: crate::core::limits::DEFAULT_STACK_SIZE,
        }
    }

    #[inline]
    #[must_use]
    pub fn with_priority(mut self, priority: ThreadPriority) -> Self {
        self.priority = priority;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_stack_size(mut self, stack_size: StackSize) -> Self {
        self.stack_size = stack_size;
        self
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    #[must_use]
    pub const fn priority(&self) -> ThreadPriority {
        self.priority
    }

    #[inline]
    #[must_use]
    pub const fn stack_size(&self) -> StackSize {
        self.stack_size
    }

    /// Validate the configuration, returning the effective stack size
    ///
    /// A zero stack size and an over-long name are rejected; undersized
    /// stacks are clamped up to MIN_STACK_SIZE.
    pub(crate) fn validate(&self) -> ThreadResult<StackSize> {
        if self.stack_size == 0 {
            return Err(ThreadError::InvalidArgument(
                "stack size must be non-zero".to_string(),
            ));
        }
        if self.name.len() > THREAD_NAME_MAX {
            return Err(ThreadError::InvalidArgument(format!(
                "thread name exceeds {} bytes: {}",
                THREAD_NAME_MAX,
                self.name.len()
            )));
        }
        Ok(self.stack_size.max(MIN_STACK_SIZE))
    }
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self::new("")
    }
}
