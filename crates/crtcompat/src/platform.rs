//! Platform shims: sleeping in seconds and milliseconds.

use std::time::Duration;

/// Sleeps for `millis` milliseconds.
pub fn sleep_ms(millis: u32) {
    std::thread::sleep(Duration::from_millis(u64::from(millis)));
}

cfg_if::cfg_if! {
    if #[cfg(crtcompat_seconds_sleep_shim)] {
        /// Sleeps for `seconds` seconds through the millisecond primitive.
        ///
        /// Always returns 0: the millisecond primitive is not interruptible.
        pub fn sleep(seconds: u32) -> u32 {
            sleep_ms(seconds.saturating_mul(1000));
            0
        }
    } else if #[cfg(unix)] {
        /// `seconds` as a `time_t`, saturating where `time_t` is 32 bits.
        fn request_secs(seconds: u32) -> libc::time_t {
            libc::time_t::try_from(seconds).unwrap_or(libc::time_t::MAX)
        }

        /// Sleeps for `seconds` seconds.
        ///
        /// Returns the number of whole seconds left when interrupted by a
        /// signal, 0 otherwise.
        pub fn sleep(seconds: u32) -> u32 {
            let req = libc::timespec {
                tv_sec: request_secs(seconds),
                tv_nsec: 0,
            };
            let mut rem = libc::timespec {
                tv_sec: 0,
                tv_nsec: 0,
            };
            // SAFETY: both pointers refer to live, properly aligned stack values.
            let rc = unsafe { libc::nanosleep(&req, &mut rem) };
            if rc == 0 {
                return 0;
            }
            let mut remaining = u32::try_from(rem.tv_sec.max(0)).unwrap_or(seconds);
            if rem.tv_nsec > 0 {
                remaining = remaining.saturating_add(1);
            }
            log::debug!("sleep({seconds}) interrupted, {remaining}s left");
            remaining
        }
    } else {
        /// Sleeps for `seconds` seconds.
        pub fn sleep(seconds: u32) -> u32 {
            std::thread::sleep(Duration::from_secs(u64::from(seconds)));
            0
        }
    }
}
