//! Formatted output: sprintf, fprintf, printf and their `_s` variants.
//!
//! Formatting itself is `core::fmt`; callers build the argument pack with
//! `format_args!`. What differs between the families is where the bytes go
//! and what happens when they do not fit.

use std::fmt;
use std::io::{self, Write};

use crate::errno::CheckedError;

/// `fmt::Write` sink over a byte slice that keeps counting past the limit.
struct SliceSink<'a> {
    buf: &'a mut [u8],
    limit: usize,
    needed: usize,
}

impl fmt::Write for SliceSink<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let bytes = s.as_bytes();
        let start = self.needed.min(self.limit);
        let fit = bytes.len().min(self.limit - start);
        self.buf[start..start + fit].copy_from_slice(&bytes[..fit]);
        self.needed += bytes.len();
        Ok(())
    }
}

/// Renders `args` into `buf[..limit]`, returning the formatted length and
/// whether every argument formatted. `SliceSink` never fails, so an error
/// comes from a formatting trait impl and the length stops at that argument.
fn render(buf: &mut [u8], limit: usize, args: fmt::Arguments<'_>) -> (usize, fmt::Result) {
    let mut sink = SliceSink {
        buf,
        limit,
        needed: 0,
    };
    let result = fmt::write(&mut sink, args);
    (sink.needed, result)
}

/// Formats into `dest` with no capacity check.
///
/// Output runs until the end of the slice; a NUL follows only if there is
/// room. Returns the number of bytes the full output needed (without NUL).
/// If an argument fails to format, output ends before it and the count
/// covers what was produced.
pub fn sprintf(dest: &mut [u8], args: fmt::Arguments<'_>) -> usize {
    let limit = dest.len();
    let (needed, result) = render(dest, limit, args);
    if result.is_err() {
        log::debug!("sprintf: formatting failed after {needed} bytes");
    }
    if needed < dest.len() {
        dest[needed] = 0;
    }
    needed
}

/// Formats into `dest`, refusing output that does not fit `dest_size` bytes
/// including the terminating NUL. An argument that fails to format empties
/// `dest` and yields `EINVAL`.
pub fn sprintf_s(
    dest: &mut [u8],
    dest_size: usize,
    args: fmt::Arguments<'_>,
) -> Result<usize, CheckedError> {
    if dest_size == 0 || dest_size > dest.len() {
        return Err(CheckedError::InvalidArgument("bad destination capacity"));
    }
    let (needed, result) = render(dest, dest_size - 1, args);
    if result.is_err() {
        dest[0] = 0;
        return Err(CheckedError::InvalidArgument("formatting failed"));
    }
    if needed >= dest_size {
        dest[0] = 0;
        log::debug!("sprintf_s needs {} bytes, has {dest_size}", needed + 1);
        return Err(CheckedError::BufferTooSmall {
            capacity: dest_size,
            required: needed + 1,
        });
    }
    dest[needed] = 0;
    Ok(needed)
}

/// `io::Write` adapter counting the bytes that reach the stream.
struct Counted<'w, W: Write + ?Sized> {
    inner: &'w mut W,
    written: usize,
}

impl<W: Write + ?Sized> Write for Counted<'_, W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.written += n;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// Writes formatted output to `stream`. Returns the number of bytes written.
pub fn fprintf<W: Write + ?Sized>(stream: &mut W, args: fmt::Arguments<'_>) -> io::Result<usize> {
    let mut counted = Counted {
        inner: stream,
        written: 0,
    };
    counted.write_fmt(args)?;
    Ok(counted.written)
}

/// Bounds-checked [`fprintf`]: stream failures come back as `CheckedError::Io`
/// and the stream is flushed before returning.
pub fn fprintf_s<W: Write + ?Sized>(
    stream: &mut W,
    args: fmt::Arguments<'_>,
) -> Result<usize, CheckedError> {
    let written = fprintf(stream, args)?;
    stream.flush()?;
    Ok(written)
}

/// [`fprintf`] to standard output.
pub fn printf(args: fmt::Arguments<'_>) -> io::Result<usize> {
    fprintf(&mut io::stdout().lock(), args)
}

/// [`fprintf_s`] to standard output.
pub fn printf_s(args: fmt::Arguments<'_>) -> Result<usize, CheckedError> {
    fprintf_s(&mut io::stdout().lock(), args)
}
