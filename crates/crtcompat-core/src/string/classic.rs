//! Classic string operations: memcpy, memmove, strcpy, strcat, strncpy,
//! strncat, strlwr, strupr.
//!
//! None of these look at a declared capacity. The only bound is the physical
//! length of the destination slice: where C would write past the end of the
//! buffer, these stop at the slice end and leave the string unterminated.

/// Returns the length of a NUL-terminated byte string (not counting the NUL).
///
/// If no NUL is found, returns the full slice length.
pub fn strlen(s: &[u8]) -> usize {
    s.iter().position(|&b| b == 0).unwrap_or(s.len())
}

/// Like [`strlen`], but never looks past the first `max` bytes.
pub fn strnlen(s: &[u8], max: usize) -> usize {
    strlen(&s[..max.min(s.len())])
}

/// Copies `n` bytes from `src` to `dest`.
///
/// Only copies `min(n, src.len(), dest.len())` bytes. Returns the number of
/// bytes actually copied.
pub fn memcpy(dest: &mut [u8], src: &[u8], n: usize) -> usize {
    let count = n.min(dest.len()).min(src.len());
    dest[..count].copy_from_slice(&src[..count]);
    count
}

/// Copies `n` bytes from `src` to `dest`.
///
/// Distinct slices never alias in safe Rust, so this is [`memcpy`].
pub fn memmove(dest: &mut [u8], src: &[u8], n: usize) -> usize {
    memcpy(dest, src, n)
}

/// Copies a NUL-terminated string from `src` into `dest`, including the NUL.
///
/// Returns the number of bytes written. Fewer than `strlen(src) + 1` means
/// the copy ran into the end of `dest` and the result is unterminated.
pub fn strcpy(dest: &mut [u8], src: &[u8]) -> usize {
    let src_len = strlen(src);
    let written = memcpy(dest, src, src_len);
    if written < dest.len() && written == src_len {
        dest[written] = 0;
        return written + 1;
    }
    written
}

/// Copies at most `n` bytes from `src` into `dest`.
///
/// If `src` is shorter than `n`, the remainder is filled with NUL bytes. If
/// `src` is `n` or longer, `dest` is NOT NUL-terminated.
///
/// Returns the number of bytes written to `dest` (`min(n, dest.len())`).
pub fn strncpy(dest: &mut [u8], src: &[u8], n: usize) -> usize {
    let count = n.min(dest.len());
    let src_len = strlen(src);
    let copy_len = src_len.min(count);

    dest[..copy_len].copy_from_slice(&src[..copy_len]);
    dest[copy_len..count].fill(0);

    count
}

/// Appends `src` to the end of the NUL-terminated string in `dest`.
///
/// Returns the length of the resulting string (not counting the NUL), or the
/// slice length if the append ran into the end of `dest`.
pub fn strcat(dest: &mut [u8], src: &[u8]) -> usize {
    let dest_len = strlen(dest);
    dest_len + strcpy(&mut dest[dest_len..], src).min(strlen(src))
}

/// Appends at most `n` bytes from `src` to the NUL-terminated string in `dest`,
/// then a NUL if there is room.
pub fn strncat(dest: &mut [u8], src: &[u8], n: usize) -> usize {
    let dest_len = strlen(dest);
    let src_len = strlen(src).min(n);
    let tail = &mut dest[dest_len..];
    let written = memcpy(tail, src, src_len);
    if written < tail.len() {
        tail[written] = 0;
    }
    dest_len + written
}

/// Lowercases the NUL-terminated string in place. Returns its length.
pub fn strlwr(s: &mut [u8]) -> usize {
    let len = strlen(s);
    s[..len].make_ascii_lowercase();
    len
}

/// Uppercases the NUL-terminated string in place. Returns its length.
pub fn strupr(s: &mut [u8]) -> usize {
    let len = strlen(s);
    s[..len].make_ascii_uppercase();
    len
}
