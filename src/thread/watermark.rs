/*!
 * Stack Watermark
 * Cooperative stack high-water-mark sampling for live threads
 */

use super::registry::ThreadRecord;
use std::cell::RefCell;
use std::sync::Arc;

struct ProbeAnchor {
    base: usize,
    record: Arc<ThreadRecord>,
}

thread_local! {
    static ANCHOR: RefCell<Option<ProbeAnchor>> = const { RefCell::new(None) };
}

/// Capture a position near the top of the calling thread's stack
///
/// Must be called from the spawn wrapper before any real work; the returned
/// address anchors all later depth measurements.
#[inline(never)]
pub(crate) fn frame_position() -> usize {
    let marker = 0u8;
    std::ptr::addr_of!(marker) as usize
}

pub(crate) fn install(base: usize, record: Arc<ThreadRecord>) {
    ANCHOR.with(|anchor| *anchor.borrow_mut() = Some(ProbeAnchor { base, record }));
}

pub(crate) fn clear() {
    ANCHOR.with(|anchor| *anchor.borrow_mut() = None);
}

/// Record the calling thread's current stack depth
///
/// The thread's watermark is the maximum depth observed across all probes,
/// so repeated calls are monotonically non-decreasing. No-op on threads not
/// created through a ThreadManager.
#[inline(never)]
pub fn probe() {
    let marker = 0u8;
    let position = std::ptr::addr_of!(marker) as usize;
    ANCHOR.with(|anchor| {
        if let Some(probe) = anchor.borrow().as_ref() {
            probe.record.record_watermark(probe.base.abs_diff(position));
        }
    });
}
