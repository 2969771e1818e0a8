//! Bounds-checked string operations: memcpy_s, memmove_s, strcpy_s, strcat_s,
//! strncpy_s, strncat_s, strlwr_s, strupr_s.
//!
//! Every function takes the destination's declared capacity `dest_size`
//! alongside the slice. A declared capacity larger than the slice is rejected,
//! since the slice is the real extent. On failure the destination is left
//! empty (`dest[0] = 0`, or zero-filled for the `mem*` copies) so no partial
//! result survives.

use super::classic::{strlen, strnlen};
use crate::errno::{CheckedError, TRUNCATE};

/// Resolves the usable capacity for a destination slice.
fn capacity(dest: &[u8], dest_size: usize) -> Result<usize, CheckedError> {
    if dest_size == 0 {
        return Err(CheckedError::InvalidArgument("destination capacity is zero"));
    }
    if dest_size > dest.len() {
        return Err(CheckedError::InvalidArgument(
            "declared capacity exceeds destination",
        ));
    }
    Ok(dest_size)
}

fn reject(dest: &mut [u8], err: CheckedError) -> Result<(), CheckedError> {
    log::debug!("bounds-checked string operation refused: {err}");
    if let Some(first) = dest.first_mut() {
        *first = 0;
    }
    Err(err)
}

/// Copies `count` bytes from `src` into `dest`.
///
/// Fails with `BufferTooSmall` when `count > dest_size`, and with
/// `InvalidArgument` when `src` is shorter than `count`. Either way the first
/// `dest_size` bytes of `dest` are zeroed.
pub fn memcpy_s(
    dest: &mut [u8],
    dest_size: usize,
    src: &[u8],
    count: usize,
) -> Result<(), CheckedError> {
    if count == 0 {
        return Ok(());
    }
    let cap = capacity(dest, dest_size)?;
    if src.len() < count {
        dest[..cap].fill(0);
        return Err(CheckedError::InvalidArgument("source shorter than count"));
    }
    if count > cap {
        dest[..cap].fill(0);
        log::debug!("memcpy_s refused {count} bytes into {cap}");
        return Err(CheckedError::BufferTooSmall {
            capacity: cap,
            required: count,
        });
    }
    dest[..count].copy_from_slice(&src[..count]);
    Ok(())
}

/// Moves `count` bytes from `src` into `dest`. Same contract as [`memcpy_s`].
pub fn memmove_s(
    dest: &mut [u8],
    dest_size: usize,
    src: &[u8],
    count: usize,
) -> Result<(), CheckedError> {
    memcpy_s(dest, dest_size, src, count)
}

/// Copies the NUL-terminated `src` into `dest`, NUL included.
///
/// Fails with `BufferTooSmall` if `strlen(src) + 1 > dest_size`.
pub fn strcpy_s(dest: &mut [u8], dest_size: usize, src: &[u8]) -> Result<(), CheckedError> {
    let cap = capacity(dest, dest_size)?;
    let src_len = strlen(src);
    if src_len >= cap {
        return reject(
            dest,
            CheckedError::BufferTooSmall {
                capacity: cap,
                required: src_len + 1,
            },
        );
    }
    dest[..src_len].copy_from_slice(&src[..src_len]);
    dest[src_len] = 0;
    Ok(())
}

/// Appends the NUL-terminated `src` to the string already in `dest`.
///
/// `dest` must be terminated within `dest_size`; otherwise `InvalidArgument`.
pub fn strcat_s(dest: &mut [u8], dest_size: usize, src: &[u8]) -> Result<(), CheckedError> {
    let cap = capacity(dest, dest_size)?;
    let dest_len = strnlen(dest, cap);
    if dest_len == cap {
        return reject(
            dest,
            CheckedError::InvalidArgument("destination is not terminated"),
        );
    }
    let src_len = strlen(src);
    let total = dest_len + src_len;
    if total >= cap {
        return reject(
            dest,
            CheckedError::BufferTooSmall {
                capacity: cap,
                required: total + 1,
            },
        );
    }
    dest[dest_len..total].copy_from_slice(&src[..src_len]);
    dest[total] = 0;
    Ok(())
}

/// Writes `src[..n]` at `offset` and terminates, honoring `TRUNCATE`.
///
/// `room` is the number of bytes available from `offset` up to the capacity.
fn bounded_append(
    dest: &mut [u8],
    offset: usize,
    room: usize,
    src: &[u8],
    count: usize,
    cap: usize,
) -> Result<(), CheckedError> {
    let wanted = strlen(src).min(count);
    if wanted < room {
        dest[offset..offset + wanted].copy_from_slice(&src[..wanted]);
        dest[offset + wanted] = 0;
        return Ok(());
    }
    if count == TRUNCATE {
        let kept = room - 1;
        dest[offset..offset + kept].copy_from_slice(&src[..kept]);
        dest[offset + kept] = 0;
        return Err(CheckedError::Truncated {
            written: offset + kept,
        });
    }
    reject(
        dest,
        CheckedError::BufferTooSmall {
            capacity: cap,
            required: offset + wanted + 1,
        },
    )
}

/// Copies at most `count` bytes of `src` into `dest` and always terminates.
///
/// With `count == TRUNCATE`, an oversized source is cut to `dest_size - 1`
/// bytes and `Truncated` is returned; the destination keeps the cut string.
pub fn strncpy_s(
    dest: &mut [u8],
    dest_size: usize,
    src: &[u8],
    count: usize,
) -> Result<(), CheckedError> {
    let cap = capacity(dest, dest_size)?;
    bounded_append(dest, 0, cap, src, count, cap)
}

/// Appends at most `count` bytes of `src` to the string in `dest`.
///
/// Same `TRUNCATE` handling as [`strncpy_s`].
pub fn strncat_s(
    dest: &mut [u8],
    dest_size: usize,
    src: &[u8],
    count: usize,
) -> Result<(), CheckedError> {
    let cap = capacity(dest, dest_size)?;
    let dest_len = strnlen(dest, cap);
    if dest_len == cap {
        return reject(
            dest,
            CheckedError::InvalidArgument("destination is not terminated"),
        );
    }
    bounded_append(dest, dest_len, cap - dest_len, src, count, cap)
}

fn terminated_len(s: &mut [u8], size: usize) -> Result<usize, CheckedError> {
    let cap = capacity(s, size)?;
    let len = strnlen(s, cap);
    if len == cap {
        reject(s, CheckedError::InvalidArgument("string is not terminated"))?;
    }
    Ok(len)
}

/// Lowercases a string that must be terminated within `size` bytes.
pub fn strlwr_s(s: &mut [u8], size: usize) -> Result<(), CheckedError> {
    let len = terminated_len(s, size)?;
    s[..len].make_ascii_lowercase();
    Ok(())
}

/// Uppercases a string that must be terminated within `size` bytes.
pub fn strupr_s(s: &mut [u8], size: usize) -> Result<(), CheckedError> {
    let len = terminated_len(s, size)?;
    s[..len].make_ascii_uppercase();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errno::{EINVAL, ERANGE, STRUNCATE};

    #[test]
    fn strcpy_s_fits() {
        let mut dest = [0xffu8; 8];
        strcpy_s(&mut dest, 8, b"hello\0").unwrap();
        assert_eq!(&dest[..6], b"hello\0");
    }

    #[test]
    fn strcpy_s_exact_fit_needs_room_for_nul() {
        let mut dest = [0xffu8; 5];
        let err = strcpy_s(&mut dest, 5, b"hello\0").unwrap_err();
        assert_eq!(err.errno(), ERANGE);
        assert_eq!(dest[0], 0);
    }

    #[test]
    fn strcpy_s_rejects_zero_and_lying_capacity() {
        let mut dest = [0u8; 4];
        assert_eq!(strcpy_s(&mut dest, 0, b"a\0").unwrap_err().errno(), EINVAL);
        assert_eq!(strcpy_s(&mut dest, 9, b"a\0").unwrap_err().errno(), EINVAL);
    }

    #[test]
    fn memcpy_s_zeroes_on_overflow() {
        let mut dest = [7u8; 4];
        let err = memcpy_s(&mut dest, 4, b"abcdef", 6).unwrap_err();
        assert!(matches!(
            err,
            CheckedError::BufferTooSmall {
                capacity: 4,
                required: 6
            }
        ));
        assert_eq!(dest, [0; 4]);
    }

    #[test]
    fn memcpy_s_zero_count_is_noop() {
        let mut dest = [7u8; 2];
        memcpy_s(&mut dest, 0, b"", 0).unwrap();
        assert_eq!(dest, [7, 7]);
    }

    #[test]
    fn memmove_s_short_source_is_invalid() {
        let mut dest = [7u8; 8];
        let err = memmove_s(&mut dest, 8, b"ab", 4).unwrap_err();
        assert_eq!(err.errno(), EINVAL);
        assert_eq!(dest, [0; 8]);
    }

    #[test]
    fn strcat_s_appends_and_bounds() {
        let mut dest = [0u8; 8];
        strcpy_s(&mut dest, 8, b"foo\0").unwrap();
        strcat_s(&mut dest, 8, b"bar\0").unwrap();
        assert_eq!(&dest[..7], b"foobar\0");
        let err = strcat_s(&mut dest, 8, b"xy\0").unwrap_err();
        assert_eq!(err.errno(), ERANGE);
        assert_eq!(dest[0], 0);
    }

    #[test]
    fn strcat_s_unterminated_destination() {
        let mut dest = *b"abcd";
        assert_eq!(strcat_s(&mut dest, 4, b"x\0").unwrap_err().errno(), EINVAL);
    }

    #[test]
    fn strncpy_s_count_limits_copy() {
        let mut dest = [0xffu8; 8];
        strncpy_s(&mut dest, 8, b"abcdef\0", 3).unwrap();
        assert_eq!(&dest[..4], b"abc\0");
    }

    #[test]
    fn strncpy_s_truncate_sentinel() {
        let mut dest = [0u8; 4];
        let err = strncpy_s(&mut dest, 4, b"abcdef\0", TRUNCATE).unwrap_err();
        assert_eq!(err.errno(), STRUNCATE);
        assert_eq!(&dest, b"abc\0");
    }

    #[test]
    fn strncpy_s_without_truncate_fails() {
        let mut dest = [0xffu8; 4];
        let err = strncpy_s(&mut dest, 4, b"abcdef\0", 5).unwrap_err();
        assert_eq!(err.errno(), ERANGE);
        assert_eq!(dest[0], 0);
    }

    #[test]
    fn strncat_s_truncate_sentinel() {
        let mut dest = [0u8; 6];
        strcpy_s(&mut dest, 6, b"ab\0").unwrap();
        let err = strncat_s(&mut dest, 6, b"cdefgh\0", TRUNCATE).unwrap_err();
        assert!(matches!(err, CheckedError::Truncated { written: 5 }));
        assert_eq!(&dest, b"abcde\0");
    }

    #[test]
    fn strncat_s_fits() {
        let mut dest = [0u8; 8];
        strcpy_s(&mut dest, 8, b"ab\0").unwrap();
        strncat_s(&mut dest, 8, b"cdefgh\0", 2).unwrap();
        assert_eq!(&dest[..5], b"abcd\0");
    }

    #[test]
    fn case_conversion_requires_terminator() {
        let mut s = *b"Hello\0";
        strupr_s(&mut s, 6).unwrap();
        assert_eq!(&s, b"HELLO\0");
        strlwr_s(&mut s, 6).unwrap();
        assert_eq!(&s, b"hello\0");

        let mut unterminated = *b"ABC";
        assert_eq!(strlwr_s(&mut unterminated, 3).unwrap_err().errno(), EINVAL);
        assert_eq!(unterminated[0], 0);
    }
}
