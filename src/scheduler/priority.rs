/*!
 * Priority Mapping
 * Translates PAL thread priorities to native scheduling parameters
 */

use crate::core::types::ThreadResult;
use crate::core::ThreadError;
use crate::thread::types::ThreadPriority;
use serde::{Deserialize, Serialize};

/// Nice-value range accepted by the host OS
const NICE_MIN: i32 = -20;
const NICE_MAX: i32 = 19;

/// Mapping from PAL priorities to OS nice values
///
/// Nice values are inverted: a larger value means less CPU favor, so a valid
/// map satisfies `low >= normal >= high`. Priorities are advisory; the map
/// affects scheduling order, not completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PriorityMap {
    low: i32,
    normal: i32,
    high: i32,
}

impl Default for PriorityMap {
    fn default() -> Self {
        Self {
            low: 10,
            normal: 0,
            high: -10,
        }
    }
}

impl PriorityMap {
    /// Build a custom map, validating range and ordering
    pub fn new(low: i32, normal: i32, high: i32) -> ThreadResult<Self> {
        for nice in [low, normal, high] {
            if !(NICE_MIN..=NICE_MAX).contains(&nice) {
                return Err(ThreadError::InvalidArgument(format!(
                    "nice value {} outside {}..={}",
                    nice, NICE_MIN, NICE_MAX
                )));
            }
        }
        if low < normal || normal < high {
            return Err(ThreadError::InvalidArgument(format!(
                "priority map must satisfy low >= normal >= high, got {}/{}/{}",
                low, normal, high
            )));
        }
        Ok(Self { low, normal, high })
    }

    /// Nice value for a PAL priority
    #[inline]
    #[must_use]
    pub const fn nice_for(&self, priority: ThreadPriority) -> i32 {
        match priority {
            ThreadPriority::Low => self.low,
            ThreadPriority::Normal => self.normal,
            ThreadPriority::High => self.high,
        }
    }
}

/// Apply a nice value to the calling thread
///
/// Advisory: failures (e.g. raising priority without privileges) are logged
/// and never fatal.
#[cfg(target_os = "linux")]
pub(crate) fn apply_native(nice: i32) {
    // who = 0 targets the calling thread on Linux
    let rc = unsafe { nix::libc::setpriority(nix::libc::PRIO_PROCESS as _, 0, nice) };
    if rc != 0 {
        log::warn!(
            "setpriority({}) failed: {}",
            nice,
            std::io::Error::last_os_error()
        );
    }
}

#[cfg(not(target_os = "linux"))]
pub(crate) fn apply_native(_nice: i32) {}
