//! Classic names over the bounds-checked primitives.
//!
//! The capacity handed to the checked primitive is the array extent `N` of the
//! destination, so every destination here is a `&mut [u8; N]`; a slice or a
//! pointer cannot be passed by mistake. Failures of the checked primitive are
//! returned instead of discarded, since a call site written for the classic
//! function would not expect to be cut short silently.

use std::fmt;
use std::fs::File;
use std::io::{self, BufRead};
use std::path::Path;

use crtcompat_core::CheckedError;
use crtcompat_core::errno::TRUNCATE;
use crtcompat_core::stdio::{self as core_stdio, ScanArg};
use crtcompat_core::string::checked;

/// `printf` as `printf_s`.
pub fn printf(args: fmt::Arguments<'_>) -> Result<usize, CheckedError> {
    core_stdio::printf_s(args)
}

/// `gets(dst)` as `gets_s(dst, N - 1)` on standard input.
pub fn gets<const N: usize>(dst: &mut [u8; N]) -> Result<Option<usize>, CheckedError> {
    gets_from(&mut io::stdin().lock(), dst)
}

/// [`gets`] reading from `stream`.
///
/// The capacity is one less than the array, so a line of `N - 1` bytes is
/// refused even though it would fit with its NUL.
pub fn gets_from<R: BufRead + ?Sized, const N: usize>(
    stream: &mut R,
    dst: &mut [u8; N],
) -> Result<Option<usize>, CheckedError> {
    core_stdio::gets_s(dst, N.saturating_sub(1), stream)
}

/// `FOPEN(fp, path, mode)`: `fopen_s` into `fp`, then the opened file.
pub fn fopen<'f, P: AsRef<Path>>(
    fp: &'f mut Option<File>,
    path: P,
    mode: &str,
) -> Option<&'f mut File> {
    if let Err(e) = core_stdio::fopen_s(fp, path, mode) {
        log::debug!("fopen: {e}");
    }
    fp.as_mut()
}

/// `SCAN_S_ARG(buf)`: the buffer followed by its array extent.
pub fn scan_s_arg<const N: usize>(buf: &mut [u8; N]) -> ScanArg<'_> {
    ScanArg::sized(buf, N)
}

/// `memcpy(dst, src, count)` as `memcpy_s(dst, N, src, count)`.
pub fn memcpy<'d, const N: usize>(
    dst: &'d mut [u8; N],
    src: &[u8],
    count: usize,
) -> Result<&'d mut [u8; N], CheckedError> {
    checked::memcpy_s(dst, N, src, count)?;
    Ok(dst)
}

/// `memmove(dst, src, count)` as `memmove_s(dst, N, src, count)`.
pub fn memmove<'d, const N: usize>(
    dst: &'d mut [u8; N],
    src: &[u8],
    count: usize,
) -> Result<&'d mut [u8; N], CheckedError> {
    checked::memmove_s(dst, N, src, count)?;
    Ok(dst)
}

/// `strcpy(dst, src)` as `strcpy_s(dst, N, src)`.
pub fn strcpy<'d, const N: usize>(
    dst: &'d mut [u8; N],
    src: &[u8],
) -> Result<&'d mut [u8; N], CheckedError> {
    checked::strcpy_s(dst, N, src)?;
    Ok(dst)
}

/// `strcat(dst, src)` as `strcat_s(dst, N, src)`.
pub fn strcat<'d, const N: usize>(
    dst: &'d mut [u8; N],
    src: &[u8],
) -> Result<&'d mut [u8; N], CheckedError> {
    checked::strcat_s(dst, N, src)?;
    Ok(dst)
}

/// A `count` that reaches the array extent means "as much as fits".
const fn truncating_count(count: usize, extent: usize) -> usize {
    if count >= extent { TRUNCATE } else { count }
}

fn accept_truncation(result: Result<(), CheckedError>) -> Result<(), CheckedError> {
    match result {
        Err(CheckedError::Truncated { .. }) => Ok(()),
        other => other,
    }
}

/// `strncpy(dst, src, count)` as `strncpy_s(dst, N, src, count)`, with
/// `TRUNCATE` once `count` reaches `N`.
///
/// Truncation is what `strncpy` callers expect, so it is not an error; unlike
/// `strncpy`, the result is always NUL-terminated and never padded.
pub fn strncpy<'d, const N: usize>(
    dst: &'d mut [u8; N],
    src: &[u8],
    count: usize,
) -> Result<&'d mut [u8; N], CheckedError> {
    accept_truncation(checked::strncpy_s(dst, N, src, truncating_count(count, N)))?;
    Ok(dst)
}

/// `strncat(dst, src, count)` as `strncat_s(dst, N, src, count)`, with
/// `TRUNCATE` once `count` reaches `N`.
pub fn strncat<'d, const N: usize>(
    dst: &'d mut [u8; N],
    src: &[u8],
    count: usize,
) -> Result<&'d mut [u8; N], CheckedError> {
    accept_truncation(checked::strncat_s(dst, N, src, truncating_count(count, N)))?;
    Ok(dst)
}

/// `strlwr(s)` as `_strlwr_s(s, N)`.
pub fn strlwr<const N: usize>(s: &mut [u8; N]) -> Result<&mut [u8; N], CheckedError> {
    checked::strlwr_s(s, N)?;
    Ok(s)
}

/// `strupr(s)` as `_strupr_s(s, N)`.
pub fn strupr<const N: usize>(s: &mut [u8; N]) -> Result<&mut [u8; N], CheckedError> {
    checked::strupr_s(s, N)?;
    Ok(s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crtcompat_core::errno::{EINVAL, ERANGE};
    use crtcompat_core::string::classic;
    use std::io::Cursor;

    #[test]
    fn strcpy_refuses_oversized_source() {
        let mut dst = [0xffu8; 8];
        let err = strcpy(&mut dst, b"far too long\0").unwrap_err();
        assert_eq!(err.errno(), ERANGE);
        assert_eq!(dst[0], 0);
    }

    #[test]
    fn strcpy_matches_classic_output_when_it_fits() {
        let mut forward = [0xaau8; 8];
        let mut reference = [0xaau8; 8];
        strcpy(&mut forward, b"hello\0").unwrap();
        classic::strcpy(&mut reference, b"hello\0");
        assert_eq!(forward, reference);
    }

    #[test]
    fn strcat_refuses_overflow() {
        let mut dst = [0u8; 6];
        strcpy(&mut dst, b"abc\0").unwrap();
        strcat(&mut dst, b"de\0").unwrap();
        assert_eq!(&dst, b"abcde\0");
        assert_eq!(strcat(&mut dst, b"f\0").unwrap_err().errno(), ERANGE);
    }

    #[test]
    fn memcpy_and_memmove_bound_by_extent() {
        let mut dst = [0u8; 4];
        assert_eq!(memcpy(&mut dst, b"wxyz", 4).unwrap(), b"wxyz");
        assert!(memcpy(&mut dst, b"abcdef", 6).is_err());
        assert_eq!(dst, [0; 4]);
        assert_eq!(memmove(&mut dst, b"ab", 2).unwrap()[..2], *b"ab");
    }

    #[test]
    fn strncpy_truncates_at_extent() {
        let mut dst = [0u8; 4];
        strncpy(&mut dst, b"abcdef\0", 10).unwrap();
        assert_eq!(&dst, b"abc\0");
        strncpy(&mut dst, b"xyz\0", 2).unwrap();
        assert_eq!(&dst[..3], b"xy\0");
    }

    #[test]
    fn strncpy_count_below_extent_is_exact() {
        let mut dst = [0u8; 2];
        strncpy(&mut dst, b"abc\0", 1).unwrap();
        assert_eq!(&dst, b"a\0");
    }

    #[test]
    fn strncat_truncates_at_extent() {
        let mut dst = [0u8; 6];
        strcpy(&mut dst, b"ab\0").unwrap();
        strncat(&mut dst, b"cdefgh\0", 6).unwrap();
        assert_eq!(&dst, b"abcde\0");
    }

    #[test]
    fn case_conversion_needs_terminator() {
        let mut s = *b"MiX\0";
        assert_eq!(strupr(&mut s).unwrap(), b"MIX\0");
        assert_eq!(strlwr(&mut s).unwrap(), b"mix\0");
        let mut bad = *b"ABCD";
        assert_eq!(strlwr(&mut bad).unwrap_err().errno(), EINVAL);
    }

    #[test]
    fn gets_uses_extent_minus_one() {
        let mut input = Cursor::new(&b"abc\nabcd\n"[..]);
        let mut dst = [0u8; 5];
        assert_eq!(gets_from(&mut input, &mut dst).unwrap(), Some(3));
        assert_eq!(&dst[..4], b"abc\0");
        // Four bytes fit [u8; 5] with the NUL, but the capacity is N - 1.
        assert!(gets_from(&mut input, &mut dst).is_err());
    }

    #[test]
    fn fopen_yields_file_or_none() {
        let mut fp = None;
        let missing = std::env::temp_dir().join("crtcompat-forward-missing/none");
        assert!(fopen(&mut fp, &missing, "r").is_none());

        let path = std::env::temp_dir().join(format!("crtcompat-forward-{}", std::process::id()));
        assert!(fopen(&mut fp, &path, "w").is_some());
        drop(fp.take());
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn scan_s_arg_carries_extent() {
        let mut buf = [0u8; 6];
        let arg = scan_s_arg(&mut buf);
        assert!(matches!(arg, ScanArg::Str { size: Some(6), .. }));
    }
}
