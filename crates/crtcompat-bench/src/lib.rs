//! Shared inputs for the crtcompat benchmarks.

/// NUL-terminated string of `len` bytes of `fill`.
#[must_use]
pub fn terminated(len: usize, fill: u8) -> Vec<u8> {
    let mut s = vec![fill; len];
    s.push(0);
    s
}
