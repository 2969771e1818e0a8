//! # crtcompat
//!
//! Build-time compatibility layer between the classic C library names
//! (`strcpy`, `sprintf`, `gets`, ...) and the bounds-checked ones
//! (`strcpy_s`, `sprintf_s`, `gets_s`, ...).
//!
//! The build script resolves exactly one path per compilation:
//!
//! - **forward**: the bounds-checked family is native. Classic names are
//!   re-exposed over it, with the capacity taken from the destination array
//!   extent ([`forward`]).
//! - **fallback**: the bounds-checked family is missing. Its names are
//!   emulated over the classic primitives and **the capacity argument is
//!   ignored** ([`fallback`]). Every such call is counted in [`gap`] and
//!   logged according to [`config::GapWarnings`].
//!
//! Both modules are always compiled; the crate root re-exports the names of
//! the active path. [`SELECTION`] describes what was chosen.

pub mod backend;
pub mod config;
pub mod fallback;
pub mod feature;
pub mod forward;
pub mod gap;
pub mod platform;

pub use backend::{ActiveBackend, CompatBackend, Emulated, Native};
pub use config::{GapWarnings, gap_warnings, set_gap_warnings};
pub use crtcompat_core::errno::{EINVAL, ENOENT, ERANGE, STRUNCATE, TRUNCATE};
pub use crtcompat_core::stdio::{EOF, ScanArg};
pub use crtcompat_core::stdlib::{RAND_MAX, Rand};
pub use crtcompat_core::string::{Strtok, strlen, strnlen, strtok_r};
pub use crtcompat_core::{CheckedError, Errno, Status};
pub use feature::{CDialect, CompatPath, Selection};
pub use gap::{UncheckedOp, total_unchecked_calls, unchecked_calls};
pub use platform::{sleep, sleep_ms};

/// The selection the build script made for this compilation.
pub const SELECTION: Selection = Selection {
    path: if cfg!(crtcompat_forward) {
        CompatPath::Forward
    } else {
        CompatPath::Fallback
    },
    remap_copies: cfg!(crtcompat_remap_copies),
    remap_scans: cfg!(crtcompat_remap_scans),
    seconds_sleep_shim: cfg!(crtcompat_seconds_sleep_shim),
    inline_keyword: !cfg!(crtcompat_inline_suppressed),
};

// Classic names no path touches.
pub use crtcompat_core::stdio::{fgets, fprintf, fscanf, scanf, sprintf, sscanf};
pub use crtcompat_core::stdlib::{getenv, rand, srand};

cfg_if::cfg_if! {
    if #[cfg(crtcompat_forward)] {
        pub use forward::{fopen, gets, gets_from, printf, scan_s_arg};
        pub use crtcompat_core::stdio::{
            fopen_s, fprintf_s, fscanf_s, gets_s, printf_s, scanf_s, sprintf_s, sscanf_s,
        };
        pub use crtcompat_core::stdlib::{getenv_s, rand_s};
        pub use crtcompat_core::string::{
            memcpy_s, memmove_s, strcat_s, strcpy_s, strlwr_s, strncat_s, strncpy_s, strtok_s,
            strupr_s,
        };
    } else {
        pub use fallback::{
            fopen_s, fprintf_s, getenv_s, gets_s, gets_s_from, memcpy_s, memmove_s, printf_s,
            rand_s, scan_s_arg, sprintf_s, strcat_s, strcpy_s, strlwr_s, strncat_s, strncpy_s,
            strtok_s, strupr_s,
        };
        pub use crtcompat_core::stdio::{fopen, printf};
    }
}

cfg_if::cfg_if! {
    if #[cfg(all(crtcompat_forward, crtcompat_remap_copies))] {
        pub use forward::{memcpy, memmove, strcat, strcpy, strlwr, strncat, strncpy, strupr};
    } else {
        pub use crtcompat_core::string::{
            memcpy, memmove, strcat, strcpy, strlwr, strncat, strncpy, strupr,
        };
    }
}

#[cfg(all(crtcompat_fallback, crtcompat_remap_scans))]
pub use fallback::{fscanf_s, scanf_s, sscanf_s};

/// `printf(fmt, ...)` through the active path's `printf`.
#[macro_export]
macro_rules! printf {
    ($($arg:tt)*) => {
        $crate::printf(::std::format_args!($($arg)*))
    };
}

/// `printf_s(fmt, ...)` through the active path's `printf_s`.
#[macro_export]
macro_rules! printf_s {
    ($($arg:tt)*) => {
        $crate::printf_s(::std::format_args!($($arg)*))
    };
}

/// `sprintf(dst, fmt, ...)`.
#[macro_export]
macro_rules! sprintf {
    ($dst:expr, $($arg:tt)*) => {
        $crate::sprintf($dst, ::std::format_args!($($arg)*))
    };
}

/// `sprintf_s(dst, dst_size, fmt, ...)` through the active path's `sprintf_s`.
#[macro_export]
macro_rules! sprintf_s {
    ($dst:expr, $size:expr, $($arg:tt)*) => {
        $crate::sprintf_s($dst, $size, ::std::format_args!($($arg)*))
    };
}

/// `fprintf_s(stream, fmt, ...)` through the active path's `fprintf_s`.
#[macro_export]
macro_rules! fprintf_s {
    ($stream:expr, $($arg:tt)*) => {
        $crate::fprintf_s($stream, ::std::format_args!($($arg)*))
    };
}
