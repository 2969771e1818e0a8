//! String tokenization: `strtok` (stateful), `strtok_r` and `strtok_s`.
//!
//! Tokenizing overwrites the delimiter that ends each token with a NUL byte and
//! hands back token boundaries as `(start, len)` pairs. The hidden static
//! cursor of C `strtok` lives in an explicit [`Strtok`] value instead.

/// Returns true if byte `b` is in the NUL-terminated `delimiters` set.
fn is_delim(b: u8, delimiters: &[u8]) -> bool {
    delimiters
        .iter()
        .take_while(|&&d| d != 0)
        .any(|&d| d == b)
}

/// Reentrant tokenizer.
///
/// `save_ptr` is the position to resume from (0 on the first call). Returns
/// `Some((token_start, token_len, new_save_ptr))`, or `None` when no tokens
/// remain.
pub fn strtok_r(s: &mut [u8], delimiters: &[u8], save_ptr: usize) -> Option<(usize, usize, usize)> {
    let len = s.len();
    let mut pos = save_ptr;

    // Skip leading delimiters
    while pos < len && s[pos] != 0 && is_delim(s[pos], delimiters) {
        pos += 1;
    }

    if pos >= len || s[pos] == 0 {
        return None;
    }

    let token_start = pos;
    while pos < len && s[pos] != 0 && !is_delim(s[pos], delimiters) {
        pos += 1;
    }
    let token_len = pos - token_start;

    // Terminate the token and step past the delimiter
    if pos < len && s[pos] != 0 {
        s[pos] = 0;
        pos += 1;
    }

    Some((token_start, token_len, pos))
}

/// Bounds-checked tokenizer: the cursor lives in `context`.
///
/// A context that points past the end of `s` yields no token rather than
/// reading out of bounds.
pub fn strtok_s(s: &mut [u8], delimiters: &[u8], context: &mut usize) -> Option<(usize, usize)> {
    if *context > s.len() {
        log::debug!("strtok_s context {} outside {} byte string", *context, s.len());
        return None;
    }
    let (start, len, next) = strtok_r(s, delimiters, *context)?;
    *context = next;
    Some((start, len))
}

/// Stateful tokenizer standing in for C `strtok`'s static cursor.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Strtok {
    cursor: usize,
}

impl Strtok {
    #[must_use]
    pub const fn new() -> Self {
        Self { cursor: 0 }
    }

    /// Returns the next token of `s`, resuming where the previous call stopped.
    pub fn next_token(&mut self, s: &mut [u8], delimiters: &[u8]) -> Option<(usize, usize)> {
        let (start, len, next) = strtok_r(s, delimiters, self.cursor)?;
        self.cursor = next;
        Some((start, len))
    }

    /// Starts over, as passing a fresh string to C `strtok` does.
    pub fn reset(&mut self) {
        self.cursor = 0;
    }
}
