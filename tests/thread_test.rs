/*!
 * Thread Manager Tests
 * Tests for thread creation, lifecycle, join semantics, and diagnostics
 */

use pal_os::thread::watermark;
use pal_os::{
    Scheduler, SpawnConfig, ThreadError, ThreadManager, ThreadPriority, ThreadState,
};
use pretty_assertions::assert_eq;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};
use std::time::{Duration, Instant};

// Scheduler::start is one-shot per process; every test shares the bootstrap
fn scheduler() -> Arc<Scheduler> {
    static SCHED: OnceLock<Arc<Scheduler>> = OnceLock::new();
    let _ = env_logger::builder().is_test(true).try_init();
    Arc::clone(SCHED.get_or_init(|| Scheduler::start().expect("first start in process")))
}

fn manager() -> ThreadManager {
    ThreadManager::with_scheduler(scheduler())
}

#[test]
fn test_worker_scenario() {
    let tm = manager();
    let ran = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&ran);

    let handle = tm
        .create(
            SpawnConfig::new("worker")
                .with_priority(ThreadPriority::Normal)
                .with_stack_size(4096),
            move || flag.store(true, Ordering::SeqCst),
        )
        .unwrap();

    tm.join(handle).unwrap();
    assert!(ran.load(Ordering::SeqCst));
    assert_eq!(tm.get_name(handle).unwrap(), "worker");

    tm.free(handle).unwrap();

    // Every operation on the freed handle fails with InvalidHandle
    assert!(matches!(
        tm.get_name(handle),
        Err(ThreadError::InvalidHandle(_))
    ));
    assert!(matches!(
        tm.get_stack_watermark(handle),
        Err(ThreadError::InvalidHandle(_))
    ));
    assert!(matches!(tm.join(handle), Err(ThreadError::InvalidHandle(_))));
    assert!(matches!(tm.free(handle), Err(ThreadError::InvalidHandle(_))));
}

#[test]
fn test_join_blocks_until_entry_returns() {
    let tm = manager();
    let handle = tm
        .create(SpawnConfig::new("sleeper"), || pal_os::sleep_ms(80))
        .unwrap();

    let start = Instant::now();
    tm.join(handle).unwrap();
    assert!(start.elapsed() >= Duration::from_millis(80));
    assert_eq!(tm.get_state(handle).unwrap(), ThreadState::Terminated);

    tm.free(handle).unwrap();
}

#[test]
fn test_join_idempotent() {
    let tm = manager();
    let handle = tm.create(SpawnConfig::new("once"), || {}).unwrap();

    tm.join(handle).unwrap();

    // Re-join after termination returns immediately
    let start = Instant::now();
    tm.join(handle).unwrap();
    assert!(start.elapsed() < Duration::from_millis(20));

    tm.free(handle).unwrap();
}

#[test]
fn test_concurrent_join_is_safe() {
    let tm = manager();
    let target = tm
        .create(SpawnConfig::new("target"), || pal_os::sleep_ms(50))
        .unwrap();

    let joiners: Vec<_> = (0..3)
        .map(|_| {
            let tm = tm.clone();
            std::thread::spawn(move || tm.join(target))
        })
        .collect();

    for joiner in joiners {
        joiner.join().unwrap().unwrap();
    }
    assert_eq!(tm.get_state(target).unwrap(), ThreadState::Terminated);
    tm.free(target).unwrap();
}

#[inline(never)]
fn burn_stack(depth: usize) {
    let pad = [0u8; 256];
    std::hint::black_box(&pad);
    if depth > 0 {
        burn_stack(depth - 1);
    } else {
        watermark::probe();
    }
}

#[test]
fn test_stack_watermark_monotonic() {
    let tm = manager();
    let handle = tm
        .create(SpawnConfig::new("prober").with_stack_size(64 * 1024), || {
            burn_stack(4);
            burn_stack(16);
        })
        .unwrap();

    tm.join(handle).unwrap();

    let first = tm.get_stack_watermark(handle).unwrap();
    assert!(first > 0);

    // Monotonically non-decreasing across repeated reads
    let second = tm.get_stack_watermark(handle).unwrap();
    assert!(second >= first);

    tm.free(handle).unwrap();
}

#[test]
fn test_priorities_complete_regardless_of_order() {
    let tm = manager();
    let done = Arc::new(AtomicUsize::new(0));

    let low_done = Arc::clone(&done);
    let low = tm
        .create(
            SpawnConfig::new("low").with_priority(ThreadPriority::Low),
            move || {
                low_done.fetch_add(1, Ordering::SeqCst);
            },
        )
        .unwrap();

    let high_done = Arc::clone(&done);
    let high = tm
        .create(
            SpawnConfig::new("high").with_priority(ThreadPriority::High),
            move || {
                high_done.fetch_add(1, Ordering::SeqCst);
            },
        )
        .unwrap();

    tm.join(low).unwrap();
    tm.join(high).unwrap();
    assert_eq!(done.load(Ordering::SeqCst), 2);

    tm.free(low).unwrap();
    tm.free(high).unwrap();
}

#[test]
fn test_free_running_thread_fails() {
    let tm = manager();
    let handle = tm
        .create(SpawnConfig::new("busy"), || pal_os::sleep_ms(100))
        .unwrap();

    assert!(matches!(tm.free(handle), Err(ThreadError::StillRunning(_))));

    tm.join(handle).unwrap();
    tm.free(handle).unwrap();
}

#[test]
fn test_create_without_scheduler_fails() {
    // A manager without the bootstrap reference rejects creation even though
    // the process-wide scheduler has been started by other tests
    let tm = ThreadManager::new();
    let err = tm.create(SpawnConfig::new("w"), || {}).unwrap_err();
    assert!(matches!(err, ThreadError::NotInitialized));
}

#[test]
fn test_invalid_spawn_configs() {
    let tm = manager();

    let err = tm
        .create(SpawnConfig::new("w").with_stack_size(0), || {})
        .unwrap_err();
    assert!(matches!(err, ThreadError::InvalidArgument(_)));

    let err = tm
        .create(SpawnConfig::new("x".repeat(200)), || {})
        .unwrap_err();
    assert!(matches!(err, ThreadError::InvalidArgument(_)));

    // Nothing leaked into the registry
    assert_eq!(tm.thread_count(), 0);
}

#[test]
fn test_info_snapshot_serializes() {
    let tm = manager();
    let handle = tm
        .create(SpawnConfig::new("snap"), || pal_os::sleep_ms(30))
        .unwrap();

    let info = tm.info(handle).unwrap();
    assert_eq!(info.name, "snap");
    assert_eq!(info.priority, ThreadPriority::Normal);
    assert_eq!(info.state, ThreadState::Running);
    assert!(info.stack_size > 0);

    let json = serde_json::to_string(&info).unwrap();
    assert!(json.contains("\"name\":\"snap\""));
    assert!(json.contains("\"state\":\"running\""));

    tm.join(handle).unwrap();
    tm.free(handle).unwrap();
}

#[test]
fn test_sleep_minimum_duration() {
    let start = Instant::now();
    pal_os::sleep(Duration::from_millis(50));
    assert!(start.elapsed() >= Duration::from_millis(50));
}
