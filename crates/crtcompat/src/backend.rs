//! The two compatibility paths behind one interface.
//!
//! [`Native`] runs the bounds-checked primitives, [`Emulated`] runs the
//! fallback forwards over the classic ones. The build picks one of them as
//! [`ActiveBackend`]; code that wants to stay path-agnostic goes through it.

use std::fmt;

use crtcompat_core::stdio::{self as core_stdio, ScanArg};
use crtcompat_core::string::checked;
use crtcompat_core::{CheckedError, Status};

use crate::fallback;
use crate::feature::CompatPath;
use crate::platform;

pub trait CompatBackend {
    /// Path this backend implements.
    const PATH: CompatPath;

    /// String copy into `dst` with declared capacity `dst_size`.
    fn copy(dst: &mut [u8], dst_size: usize, src: &[u8]) -> Status;

    /// Formatted output into `dst` with declared capacity `dst_size`.
    /// Returns the number of bytes written, not counting the NUL.
    fn format(
        dst: &mut [u8],
        dst_size: usize,
        args: fmt::Arguments<'_>,
    ) -> Result<usize, CheckedError>;

    /// Formatted input from `input`.
    fn scan(input: &[u8], format: &[u8], args: &mut [ScanArg<'_>]) -> Result<i32, CheckedError>;

    /// Seconds-resolution sleep. Returns the seconds left if interrupted.
    fn sleep(seconds: u32) -> u32 {
        platform::sleep(seconds)
    }
}

/// Bounds-checked primitives, capacity enforced.
#[derive(Debug, Clone, Copy, Default)]
pub struct Native;

impl CompatBackend for Native {
    const PATH: CompatPath = CompatPath::Forward;

    fn copy(dst: &mut [u8], dst_size: usize, src: &[u8]) -> Status {
        Status::from(checked::strcpy_s(dst, dst_size, src))
    }

    fn format(
        dst: &mut [u8],
        dst_size: usize,
        args: fmt::Arguments<'_>,
    ) -> Result<usize, CheckedError> {
        core_stdio::sprintf_s(dst, dst_size, args)
    }

    fn scan(input: &[u8], format: &[u8], args: &mut [ScanArg<'_>]) -> Result<i32, CheckedError> {
        core_stdio::sscanf_s(input, format, args)
    }
}

/// Classic primitives under bounds-checked names, capacity ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct Emulated;

impl CompatBackend for Emulated {
    const PATH: CompatPath = CompatPath::Fallback;

    fn copy(dst: &mut [u8], dst_size: usize, src: &[u8]) -> Status {
        fallback::strcpy_s(dst, dst_size, src)
    }

    fn format(
        dst: &mut [u8],
        dst_size: usize,
        args: fmt::Arguments<'_>,
    ) -> Result<usize, CheckedError> {
        Ok(fallback::sprintf_s(dst, dst_size, args))
    }

    fn scan(input: &[u8], format: &[u8], args: &mut [ScanArg<'_>]) -> Result<i32, CheckedError> {
        Ok(fallback::sscanf_s(input, format, args))
    }
}

cfg_if::cfg_if! {
    if #[cfg(crtcompat_forward)] {
        pub type ActiveBackend = Native;
    } else {
        pub type ActiveBackend = Emulated;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crtcompat_core::errno::ERANGE;

    #[test]
    fn active_backend_matches_selection() {
        assert_eq!(ActiveBackend::PATH, crate::SELECTION.path);
    }

    #[test]
    fn native_copy_enforces_capacity() {
        let mut dst = [0xffu8; 16];
        assert_eq!(Native::copy(&mut dst, 4, b"hello world\0"), Status::Error);
        assert_eq!(dst[0], 0);
        assert_eq!(dst[4], 0xff);
    }

    #[test]
    fn emulated_copy_ignores_capacity() {
        let mut dst = [0xffu8; 16];
        assert_eq!(Emulated::copy(&mut dst, 4, b"hello world\0"), Status::Ok);
        assert_eq!(&dst[..12], b"hello world\0");
    }

    #[test]
    fn format_differs_only_on_overflow() {
        let mut native = [0u8; 16];
        let mut emulated = [0u8; 16];
        assert_eq!(Native::format(&mut native, 16, format_args!("n={}", 7)).unwrap(), 3);
        assert_eq!(Emulated::format(&mut emulated, 16, format_args!("n={}", 7)).unwrap(), 3);
        assert_eq!(native, emulated);

        let err = Native::format(&mut native, 4, format_args!("{}", "toolong")).unwrap_err();
        assert_eq!(err.errno(), ERANGE);
        assert_eq!(Emulated::format(&mut emulated, 4, format_args!("{}", "toolong")).unwrap(), 7);
    }

    #[test]
    fn scan_requires_sizes_only_natively() {
        let mut word = [0u8; 8];
        let mut args = [ScanArg::str(&mut word)];
        assert!(Native::scan(b"abc", b"%s", &mut args).is_err());

        let mut word = [0u8; 8];
        let mut args = [ScanArg::str(&mut word)];
        assert_eq!(Emulated::scan(b"abc", b"%s", &mut args).unwrap(), 1);
        assert_eq!(&word[..4], b"abc\0");

        let mut word = [0u8; 8];
        let mut args = [ScanArg::sized(&mut word, 8)];
        assert_eq!(Native::scan(b"abc", b"%s", &mut args).unwrap(), 1);
    }

    #[test]
    fn default_sleep_of_zero_returns_zero() {
        assert_eq!(Native::sleep(0), 0);
        assert_eq!(Emulated::sleep(0), 0);
    }
}
