/*!
 * Handle Registry
 * Arena of thread records addressed by stable index/generation handles
 */

use super::types::{AtomicState, ThreadInfo, ThreadPriority, ThreadState};
use crate::clock;
use crate::core::limits::MAX_THREADS;
use crate::core::types::{Generation, StackSize, ThreadId, ThreadResult};
use crate::core::ThreadError;
use crossbeam_queue::SegQueue;
use dashmap::DashMap;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

/// Opaque reference to one OS-backed thread
///
/// Cheap to copy; a stale handle (used after free) fails every operation
/// with InvalidHandle because its generation no longer matches the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ThreadHandle {
    id: ThreadId,
    generation: Generation,
}

impl ThreadHandle {
    #[inline]
    #[must_use]
    pub const fn id(&self) -> ThreadId {
        self.id
    }
}

/// Record backing one handle
///
/// The underlying OS thread's lifetime is tied to this record: the spawn
/// wrapper holds a clone of the Arc until the entry function returns.
pub(crate) struct ThreadRecord {
    pub id: ThreadId,
    pub generation: Generation,
    pub name: String,
    pub priority: ThreadPriority,
    pub stack_size: StackSize,
    pub state: AtomicState,
    watermark: AtomicUsize,
    spawned_at_ms: u64,
    // Taken exactly once; the mutex also serializes concurrent joiners
    pub join: Mutex<Option<JoinHandle<()>>>,
}

impl ThreadRecord {
    fn new(
        id: ThreadId,
        generation: Generation,
        name: String,
        priority: ThreadPriority,
        stack_size: StackSize,
    ) -> Self {
        Self {
            id,
            generation,
            name,
            priority,
            stack_size,
            state: AtomicState::new(ThreadState::Running),
            watermark: AtomicUsize::new(0),
            spawned_at_ms: clock::system_time_ms(),
            join: Mutex::new(None),
        }
    }

    /// Record an observed stack depth; the watermark only ever grows
    #[inline]
    pub(crate) fn record_watermark(&self, depth: usize) {
        self.watermark.fetch_max(depth, Ordering::Relaxed);
    }

    #[inline]
    #[must_use]
    pub(crate) fn stack_watermark(&self) -> usize {
        self.watermark.load(Ordering::Relaxed)
    }

    #[must_use]
    pub(crate) fn info(&self) -> ThreadInfo {
        ThreadInfo {
            id: self.id,
            name: self.name.clone(),
            priority: self.priority,
            state: self.state.load(),
            stack_size: self.stack_size,
            stack_watermark: self.stack_watermark(),
            uptime_ms: clock::system_time_ms().saturating_sub(self.spawned_at_ms),
        }
    }
}

/// Registry of live thread records
///
/// Freed slot indices recycle through a lock-free free list with a bumped
/// generation, so handle validation stays O(1).
pub(crate) struct Registry {
    slots: DashMap<ThreadId, Arc<ThreadRecord>>,
    free: SegQueue<(ThreadId, Generation)>,
    next_id: AtomicU32,
}

impl Registry {
    pub(crate) fn new() -> Self {
        Self {
            slots: DashMap::new(),
            free: SegQueue::new(),
            next_id: AtomicU32::new(1),
        }
    }

    /// Allocate a slot and insert a fresh record in Running state
    pub(crate) fn allocate(
        &self,
        name: String,
        priority: ThreadPriority,
        stack_size: StackSize,
    ) -> ThreadResult<(ThreadHandle, Arc<ThreadRecord>)> {
        if self.slots.len() >= MAX_THREADS {
            return Err(ThreadError::ResourceExhausted(format!(
                "thread registry full ({} live records)",
                MAX_THREADS
            )));
        }

        let (id, generation) = self
            .free
            .pop()
            .unwrap_or_else(|| (self.next_id.fetch_add(1, Ordering::SeqCst), 0));

        let record = Arc::new(ThreadRecord::new(id, generation, name, priority, stack_size));
        self.slots.insert(id, Arc::clone(&record));

        Ok((ThreadHandle { id, generation }, record))
    }

    /// Look up a record, rejecting stale handles
    pub(crate) fn get(&self, handle: ThreadHandle) -> ThreadResult<Arc<ThreadRecord>> {
        self.slots
            .get(&handle.id)
            .filter(|r| r.generation == handle.generation)
            .map(|r| Arc::clone(r.value()))
            .ok_or(ThreadError::InvalidHandle(handle.id))
    }

    /// Remove a record and recycle its slot under a new generation
    pub(crate) fn release(&self, handle: ThreadHandle) -> ThreadResult<Arc<ThreadRecord>> {
        let removed = self
            .slots
            .remove_if(&handle.id, |_, r| r.generation == handle.generation);
        match removed {
            Some((id, record)) => {
                self.free.push((id, handle.generation.wrapping_add(1)));
                Ok(record)
            }
            None => Err(ThreadError::InvalidHandle(handle.id)),
        }
    }

    #[must_use]
    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }

    /// Snapshot every live record for diagnostics
    #[must_use]
    pub(crate) fn snapshot(&self) -> Vec<ThreadInfo> {
        self.slots.iter().map(|r| r.value().info()).collect()
    }
}
