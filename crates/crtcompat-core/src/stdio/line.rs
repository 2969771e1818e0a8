//! Line input: fgets and gets_s.

use std::io::{self, BufRead};

use crate::errno::CheckedError;

/// Consumes bytes up to and including the next newline, handing each byte
/// before the newline to `keep`. Returns `(bytes_seen, saw_newline)`.
fn read_line_with<R: BufRead + ?Sized>(
    stream: &mut R,
    mut keep: impl FnMut(u8),
) -> io::Result<(usize, bool)> {
    let mut seen = 0;
    loop {
        let available = stream.fill_buf()?;
        if available.is_empty() {
            return Ok((seen, false));
        }
        let byte = available[0];
        if byte == b'\n' {
            stream.consume(1);
            return Ok((seen, true));
        }
        keep(byte);
        stream.consume(1);
        seen += 1;
    }
}

/// Reads at most `n - 1` bytes of a line into `dest`, keeping the newline.
///
/// The result is NUL-terminated. `n` is clamped to `dest.len()`. Returns
/// `Ok(None)` when the stream is at end of input before any byte is read.
pub fn fgets<R: BufRead + ?Sized>(
    dest: &mut [u8],
    n: usize,
    stream: &mut R,
) -> io::Result<Option<usize>> {
    let limit = n.min(dest.len());
    if limit == 0 {
        return Ok(None);
    }
    let room = limit - 1;
    let mut len = 0;
    while len < room {
        let available = stream.fill_buf()?;
        let Some(&byte) = available.first() else {
            break;
        };
        stream.consume(1);
        dest[len] = byte;
        len += 1;
        if byte == b'\n' {
            break;
        }
    }
    if len == 0 && room > 0 {
        return Ok(None);
    }
    dest[len] = 0;
    Ok(Some(len))
}

/// Reads one line into `dest` without its newline.
///
/// A line longer than `dest_size - 1` bytes is consumed entirely, `dest` is
/// emptied and `BufferTooSmall` is returned. `Ok(None)` means end of input
/// before any byte.
pub fn gets_s<R: BufRead + ?Sized>(
    dest: &mut [u8],
    dest_size: usize,
    stream: &mut R,
) -> Result<Option<usize>, CheckedError> {
    if dest_size == 0 || dest_size > dest.len() {
        return Err(CheckedError::InvalidArgument("bad destination capacity"));
    }
    let room = dest_size - 1;
    let mut len = 0;
    let (seen, saw_newline) = read_line_with(stream, |byte| {
        if len < room {
            dest[len] = byte;
        }
        len += 1;
    })?;
    if seen == 0 && !saw_newline {
        dest[0] = 0;
        return Ok(None);
    }
    if seen > room {
        dest[0] = 0;
        log::debug!("gets_s line of {seen} bytes does not fit {dest_size}");
        return Err(CheckedError::BufferTooSmall {
            capacity: dest_size,
            required: seen + 1,
        });
    }
    dest[seen] = 0;
    Ok(Some(seen))
}
