//! Bounds-checked names over the classic primitives.
//!
//! **None of these functions enforce the capacity they are given.** The
//! `dst_size` argument is accepted for signature compatibility and ignored;
//! the classic primitive underneath writes until it is done or until the
//! physical end of the slice. A caller relying on `strcpy_s` to stop at
//! `dst_size` gets no such protection here. Every call is recorded in the
//! [`crate::gap`] ledger and logged per [`crate::config::GapWarnings`].
//!
//! Statuses are the two dummy values: [`Status::Ok`] (0) unless the classic
//! primitive itself signals failure, then [`Status::Error`] (1).

use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, Write};
use std::path::Path;

use crtcompat_core::Status;
use crtcompat_core::stdio::{self as core_stdio, ScanArg};
use crtcompat_core::stdlib::{self as core_stdlib};
use crtcompat_core::string::{classic, strtok_r};

use crate::gap::{UncheckedOp, report};

/// `memcpy_s` as `memcpy(dst, src, count)`. `dst_size` is ignored.
pub fn memcpy_s(dst: &mut [u8], _dst_size: usize, src: &[u8], count: usize) -> Status {
    report(UncheckedOp::Memcpy);
    classic::memcpy(dst, src, count);
    Status::Ok
}

/// `memmove_s` as `memmove(dst, src, count)`. `dst_size` is ignored.
pub fn memmove_s(dst: &mut [u8], _dst_size: usize, src: &[u8], count: usize) -> Status {
    report(UncheckedOp::Memmove);
    classic::memmove(dst, src, count);
    Status::Ok
}

/// `strcpy_s` as `strcpy(dst, src)`. `dst_size` is ignored.
pub fn strcpy_s(dst: &mut [u8], _dst_size: usize, src: &[u8]) -> Status {
    report(UncheckedOp::Strcpy);
    classic::strcpy(dst, src);
    Status::Ok
}

/// `strcat_s` as `strcat(dst, src)`. `dst_size` is ignored.
pub fn strcat_s(dst: &mut [u8], _dst_size: usize, src: &[u8]) -> Status {
    report(UncheckedOp::Strcat);
    classic::strcat(dst, src);
    Status::Ok
}

/// `strncpy_s` as `strncpy(dst, src, count)`. `dst_size` is ignored, and so
/// is the `TRUNCATE` sentinel: a huge `count` just copies the whole source.
pub fn strncpy_s(dst: &mut [u8], _dst_size: usize, src: &[u8], count: usize) -> Status {
    report(UncheckedOp::Strncpy);
    classic::strncpy(dst, src, count);
    Status::Ok
}

/// `strncat_s` as `strncat(dst, src, count)`. `dst_size` is ignored.
pub fn strncat_s(dst: &mut [u8], _dst_size: usize, src: &[u8], count: usize) -> Status {
    report(UncheckedOp::Strncat);
    classic::strncat(dst, src, count);
    Status::Ok
}

/// `strtok_s` as reentrant `strtok`. The context is trusted as-is.
pub fn strtok_s(s: &mut [u8], delimiters: &[u8], context: &mut usize) -> Option<(usize, usize)> {
    report(UncheckedOp::Strtok);
    let (start, len, next) = strtok_r(s, delimiters, *context)?;
    *context = next;
    Some((start, len))
}

/// `_strlwr_s` as `strlwr(s)`. `size` is ignored.
pub fn strlwr_s(s: &mut [u8], _size: usize) -> Status {
    report(UncheckedOp::Strlwr);
    classic::strlwr(s);
    Status::Ok
}

/// `_strupr_s` as `strupr(s)`. `size` is ignored.
pub fn strupr_s(s: &mut [u8], _size: usize) -> Status {
    report(UncheckedOp::Strupr);
    classic::strupr(s);
    Status::Ok
}

/// `sprintf_s` as `sprintf(dst, ...)`. `dst_size` is ignored; returns the
/// formatted length like `sprintf`.
pub fn sprintf_s(dst: &mut [u8], _dst_size: usize, args: fmt::Arguments<'_>) -> usize {
    report(UncheckedOp::Sprintf);
    core_stdio::sprintf(dst, args)
}

/// `printf_s` as `printf`.
pub fn printf_s(args: fmt::Arguments<'_>) -> io::Result<usize> {
    core_stdio::printf(args)
}

/// `fprintf_s` as `fprintf`.
pub fn fprintf_s<W: Write + ?Sized>(stream: &mut W, args: fmt::Arguments<'_>) -> io::Result<usize> {
    core_stdio::fprintf(stream, args)
}

/// `fopen_s` as `*fp = fopen(path, mode)`: [`Status::Error`] when that yields
/// no file.
pub fn fopen_s<P: AsRef<Path>>(fp: &mut Option<File>, path: P, mode: &str) -> Status {
    *fp = core_stdio::fopen(path, mode);
    if fp.is_some() {
        Status::Ok
    } else {
        Status::Error
    }
}

/// `gets_s` as `fgets(dst, dst_size, stdin)`.
///
/// Unlike a real `gets_s`, the newline stays in `dst` and an over-long line
/// is split across calls instead of rejected. `None` on end of input or a
/// read error, as `fgets` returns NULL.
pub fn gets_s(dst: &mut [u8], dst_size: usize) -> Option<usize> {
    gets_s_from(&mut io::stdin().lock(), dst, dst_size)
}

/// [`gets_s`] reading from `stream` instead of standard input.
pub fn gets_s_from<R: BufRead + ?Sized>(
    stream: &mut R,
    dst: &mut [u8],
    dst_size: usize,
) -> Option<usize> {
    report(UncheckedOp::Gets);
    core_stdio::fgets(dst, dst_size, stream).ok().flatten()
}

/// `getenv_s` as `strcpy(dst, getenv(name))`. `dst_size` is ignored.
///
/// An unset variable is [`Status::Error`]; `required` receives the value
/// length plus one.
pub fn getenv_s(required: &mut usize, dst: &mut [u8], _dst_size: usize, name: &str) -> Status {
    report(UncheckedOp::Getenv);
    let Some(value) = core_stdlib::getenv(name) else {
        *required = 0;
        return Status::Error;
    };
    *required = value.len() + 1;
    classic::strcpy(dst, value.as_bytes());
    Status::Ok
}

/// `rand_s` as the classic shared generator.
///
/// Values are in `0..=RAND_MAX`, not the full `u32` range, and are exactly as
/// predictable as `rand()`.
pub fn rand_s(value: &mut u32) -> Status {
    report(UncheckedOp::Rand);
    *value = core_stdlib::rand().unsigned_abs();
    Status::Ok
}

/// `SCAN_S_ARG(buf)`: the buffer alone, no size.
pub fn scan_s_arg(buf: &mut [u8]) -> ScanArg<'_> {
    ScanArg::str(buf)
}

fn strip_sizes(args: &mut [ScanArg<'_>]) {
    args.iter_mut().for_each(ScanArg::clear_size);
}

/// `sscanf_s` as `sscanf`, dropping every expected-size argument.
///
/// Sound only if no `%s`/`%c`/`%[` target is smaller than its token.
pub fn sscanf_s(input: &[u8], format: &[u8], args: &mut [ScanArg<'_>]) -> i32 {
    report(UncheckedOp::Scan);
    strip_sizes(args);
    core_stdio::sscanf(input, format, args)
}

/// `fscanf_s` as `fscanf`, dropping every expected-size argument.
pub fn fscanf_s<R: BufRead + ?Sized>(
    stream: &mut R,
    format: &[u8],
    args: &mut [ScanArg<'_>],
) -> io::Result<i32> {
    report(UncheckedOp::Scan);
    strip_sizes(args);
    core_stdio::fscanf(stream, format, args)
}

/// `scanf_s` as `scanf`, dropping every expected-size argument.
pub fn scanf_s(format: &[u8], args: &mut [ScanArg<'_>]) -> io::Result<i32> {
    fscanf_s(&mut io::stdin().lock(), format, args)
}
