/*!
 * Thread Management
 * Handles thread creation, joining, freeing, and diagnostics
 */

use super::registry::{Registry, ThreadHandle, ThreadRecord};
use super::types::{SpawnConfig, ThreadInfo, ThreadState};
use super::watermark;
use crate::core::types::ThreadResult;
use crate::core::ThreadError;
use crate::scheduler::Scheduler;
use log::{info, warn};
use std::sync::Arc;
use std::thread;

/// Thread lifecycle manager
///
/// Owns the handle registry and spawns OS-backed threads. Requires a started
/// Scheduler; `create` on a manager without one fails with NotInitialized.
/// Clones share the same registry.
pub struct ThreadManager {
    registry: Arc<Registry>,
    scheduler: Option<Arc<Scheduler>>,
}

/// Builder for ThreadManager
pub struct ThreadManagerBuilder {
    scheduler: Option<Arc<Scheduler>>,
}

impl ThreadManagerBuilder {
    /// Create a new ThreadManager builder
    pub fn new() -> Self {
        Self { scheduler: None }
    }

    /// Attach the started scheduler bootstrap
    pub fn with_scheduler(mut self, scheduler: Arc<Scheduler>) -> Self {
        self.scheduler = Some(scheduler);
        self
    }

    /// Build the ThreadManager
    pub fn build(self) -> ThreadManager {
        let mut features = Vec::new();
        if self.scheduler.is_some() {
            features.push("scheduler");
        }
        info!(
            "Thread manager initialized{}",
            if features.is_empty() {
                " (uninitialized - create will fail)".to_string()
            } else {
                format!(" with: {}", features.join(", "))
            }
        );

        ThreadManager {
            registry: Arc::new(Registry::new()),
            scheduler: self.scheduler,
        }
    }
}

impl Default for ThreadManagerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// Advances the record to Terminated when the entry function returns or
// unwinds, so join observes termination even across panics
struct Finalizer {
    record: Arc<ThreadRecord>,
}

impl Drop for Finalizer {
    fn drop(&mut self) {
        watermark::probe();
        if let Err(e) = self.record.state.advance(ThreadState::Terminated) {
            warn!(
                "thread '{}' (id {}) termination transition failed: {}",
                self.record.name, self.record.id, e
            );
        }
        watermark::clear();
    }
}

// Nested frame so the wrapper probe observes a nonzero depth
#[inline(never)]
fn run_entry<F: FnOnce()>(entry: F) {
    watermark::probe();
    entry();
}

impl ThreadManager {
    /// Create a manager with no scheduler attached
    pub fn new() -> Self {
        ThreadManagerBuilder::new().build()
    }

    /// Create a manager bound to a started scheduler
    pub fn with_scheduler(scheduler: Arc<Scheduler>) -> Self {
        ThreadManagerBuilder::new()
            .with_scheduler(scheduler)
            .build()
    }

    /// Create a builder for constructing a ThreadManager
    pub fn builder() -> ThreadManagerBuilder {
        ThreadManagerBuilder::new()
    }

    /// Create and start a new OS-backed thread running `entry`
    ///
    /// The returned handle starts in Running state. Fails with
    /// NotInitialized before the scheduler bootstrap and ResourceExhausted
    /// when the OS cannot allocate a thread or stack.
    pub fn create<F>(&self, config: SpawnConfig, entry: F) -> ThreadResult<ThreadHandle>
    where
        F: FnOnce() + Send + 'static,
    {
        let scheduler = self.scheduler.as_ref().ok_or(ThreadError::NotInitialized)?;
        let stack_size = config.validate()?;

        let (handle, record) =
            self.registry
                .allocate(config.name().to_string(), config.priority(), stack_size)?;

        let nice = scheduler.mapping().nice_for(config.priority());
        let thread_record = Arc::clone(&record);
        let spawned = thread::Builder::new()
            .name(config.name().to_string())
            .stack_size(stack_size)
            .spawn(move || {
                let base = watermark::frame_position();
                watermark::install(base, Arc::clone(&thread_record));
                crate::scheduler::apply_native(nice);

                let _finalizer = Finalizer {
                    record: thread_record,
                };
                run_entry(entry);
            });

        match spawned {
            Ok(join) => {
                *record.join.lock() = Some(join);
                info!(
                    "Created thread '{}' (id {}, priority {:?}, stack {} bytes)",
                    record.name, record.id, record.priority, stack_size
                );
                Ok(handle)
            }
            Err(e) => {
                // Return the reserved slot before surfacing the failure
                let _ = self.registry.release(handle);
                Err(ThreadError::ResourceExhausted(format!(
                    "spawn '{}' failed: {}",
                    config.name(),
                    e
                )))
            }
        }
    }

    /// Block until the thread reaches Terminated
    ///
    /// Idempotent: re-join after termination returns immediately. Safe to
    /// call from multiple threads; the record's join mutex serializes them
    /// and later callers observe the terminated state. A panicking entry
    /// function is contained and treated as termination.
    pub fn join(&self, handle: ThreadHandle) -> ThreadResult<()> {
        let record = self.registry.get(handle)?;

        let mut slot = record.join.lock();
        if let Some(join) = slot.take() {
            if join.join().is_err() {
                warn!(
                    "thread '{}' (id {}) panicked; treating as terminated",
                    record.name, record.id
                );
            }
            // The spawn wrapper normally advances the state itself; this is
            // idempotent for the panic path
            record.state.advance(ThreadState::Terminated)?;
        }
        Ok(())
    }

    /// Release a terminated thread's handle
    ///
    /// Fails with StillRunning while the thread is live - there is no
    /// force-detach; join first. The handle is invalid afterwards.
    pub fn free(&self, handle: ThreadHandle) -> ThreadResult<()> {
        let record = self.registry.get(handle)?;
        match record.state.load() {
            ThreadState::Running | ThreadState::Stopped => {
                Err(ThreadError::StillRunning(handle.id()))
            }
            ThreadState::Terminated => {
                let record = self.registry.release(handle)?;
                // Detach an unjoined handle; the OS thread has already exited
                drop(record.join.lock().take());
                info!("Freed thread '{}' (id {})", record.name, record.id);
                Ok(())
            }
        }
    }

    /// Get the thread's assigned name
    pub fn get_name(&self, handle: ThreadHandle) -> ThreadResult<String> {
        Ok(self.registry.get(handle)?.name.clone())
    }

    /// Get the peak stack usage observed so far, in bytes
    ///
    /// Monotonically non-decreasing for a live handle; grows as the thread
    /// calls `watermark::probe`.
    pub fn get_stack_watermark(&self, handle: ThreadHandle) -> ThreadResult<usize> {
        Ok(self.registry.get(handle)?.stack_watermark())
    }

    /// Get the current lifecycle state
    pub fn get_state(&self, handle: ThreadHandle) -> ThreadResult<ThreadState> {
        Ok(self.registry.get(handle)?.state.load())
    }

    /// Snapshot one thread's metadata
    pub fn info(&self, handle: ThreadHandle) -> ThreadResult<ThreadInfo> {
        Ok(self.registry.get(handle)?.info())
    }

    /// Snapshot every live thread
    pub fn list(&self) -> Vec<ThreadInfo> {
        self.registry.snapshot()
    }

    /// Number of live thread records
    pub fn thread_count(&self) -> usize {
        self.registry.len()
    }
}

impl Clone for ThreadManager {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
            scheduler: self.scheduler.clone(),
        }
    }
}

impl Default for ThreadManager {
    fn default() -> Self {
        Self::new()
    }
}
