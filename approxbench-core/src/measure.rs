//! Wall-Clock Timing
//!
//! Pass durations come from `std::time::Instant`, which is monotonic on every
//! supported platform. Durations are reported as fractional microseconds.

use std::time::Instant;

/// Timer for one pass over the sample set
pub struct Timer {
    start: Instant,
}

impl Timer {
    /// Start a new timer
    #[inline(always)]
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Stop the timer and return elapsed microseconds
    #[inline(always)]
    pub fn stop_us(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1_000_000.0
    }
}

/// Pin the current thread to a specific core
///
/// Keeps all passes on one core so cache state and clock domain do not change
/// between repetitions. Core indices outside the affinity mask are rejected
/// with `InvalidInput`.
#[cfg(target_os = "linux")]
pub fn pin_to_cpu(cpu: usize) -> Result<(), std::io::Error> {
    use std::mem::MaybeUninit;

    // CPU_SET indexes the mask without a bounds check
    if cpu >= libc::CPU_SETSIZE as usize {
        return Err(std::io::Error::from(std::io::ErrorKind::InvalidInput));
    }

    // SAFETY: cpu_set_t is a plain bitmask; zeroed is its empty value and the
    // CPU_* helpers only touch that bitmask.
    unsafe {
        let mut set = MaybeUninit::<libc::cpu_set_t>::zeroed();
        let set_ref = set.assume_init_mut();

        libc::CPU_ZERO(set_ref);
        libc::CPU_SET(cpu, set_ref);

        let result = libc::sched_setaffinity(0, std::mem::size_of::<libc::cpu_set_t>(), set_ref);

        if result == 0 {
            Ok(())
        } else {
            Err(std::io::Error::last_os_error())
        }
    }
}

/// Pin the current thread to a specific core (no-op off Linux)
#[cfg(not(target_os = "linux"))]
pub fn pin_to_cpu(_cpu: usize) -> Result<(), std::io::Error> {
    Ok(())
}
