//! Formatted input: sscanf, fscanf, scanf and their `_s` variants.
//!
//! Directives: whitespace, literal bytes, `%%`, and conversions with optional
//! assignment suppression (`*`), field width and length modifier (accepted,
//! ignored): `d i u o x X p`, `f F e E g G a A`, `s`, `c`, `[set]`, `n`.
//!
//! Floating conversions read decimal notation and `inf`, `infinity` or `nan`
//! in any case. Hexadecimal floats (`0x1.8p3`) are not recognized; such input
//! reads as `0`.
//!
//! Targets are [`ScanArg`] values. The bounds-checked variants require every
//! `%s`, `%c` and `%[` target to carry its buffer size and refuse to run
//! without one; the classic variants ignore the size and stop writing at the
//! physical end of the buffer.

use std::io::{self, BufRead};

use crate::errno::CheckedError;

/// Returned when input ends before the first conversion.
pub const EOF: i32 = -1;

/// Destination of one conversion.
#[derive(Debug)]
pub enum ScanArg<'a> {
    Int(&'a mut i64),
    Uint(&'a mut u64),
    Float(&'a mut f64),
    Char(&'a mut u8),
    /// Byte buffer for `%s`, `%c` and `%[`. `size` is the expected-size
    /// argument the bounds-checked variants read after the buffer.
    Str {
        buf: &'a mut [u8],
        size: Option<usize>,
    },
}

impl<'a> ScanArg<'a> {
    /// Buffer target without a size, as classic `scanf` takes it.
    pub fn str(buf: &'a mut [u8]) -> Self {
        Self::Str { buf, size: None }
    }

    /// Buffer target followed by its size, as `scanf_s` takes it.
    pub fn sized(buf: &'a mut [u8], size: usize) -> Self {
        Self::Str {
            buf,
            size: Some(size),
        }
    }

    /// Drops the expected-size argument, leaving other targets alone.
    pub fn clear_size(&mut self) {
        if let Self::Str { size, .. } = self {
            *size = None;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Classic,
    Checked,
}

trait Source {
    fn peek(&mut self) -> io::Result<Option<u8>>;
    fn bump(&mut self);
}

struct SliceSource<'a> {
    input: &'a [u8],
    pos: usize,
}

impl Source for SliceSource<'_> {
    fn peek(&mut self) -> io::Result<Option<u8>> {
        // A NUL ends a C string input.
        Ok(self.input.get(self.pos).copied().filter(|&b| b != 0))
    }

    fn bump(&mut self) {
        self.pos += 1;
    }
}

struct ReaderSource<'r, R: ?Sized>(&'r mut R);

impl<R: BufRead + ?Sized> Source for ReaderSource<'_, R> {
    fn peek(&mut self) -> io::Result<Option<u8>> {
        Ok(self.0.fill_buf()?.first().copied())
    }

    fn bump(&mut self) {
        self.0.consume(1);
    }
}

struct Scanner<S> {
    src: S,
    consumed: usize,
}

impl<S: Source> Scanner<S> {
    fn new(src: S) -> Self {
        Self { src, consumed: 0 }
    }

    fn peek(&mut self) -> io::Result<Option<u8>> {
        self.src.peek()
    }

    fn bump(&mut self) {
        self.src.bump();
        self.consumed += 1;
    }

    fn skip_ws(&mut self) -> io::Result<()> {
        while let Some(b) = self.peek()? {
            if !b.is_ascii_whitespace() {
                break;
            }
            self.bump();
        }
        Ok(())
    }

    /// Consumes bytes accepted by `accept`, at most `width` of them.
    fn take_while(
        &mut self,
        width: usize,
        mut accept: impl FnMut(u8) -> bool,
    ) -> io::Result<Vec<u8>> {
        let mut out = Vec::new();
        while out.len() < width {
            match self.peek()? {
                Some(b) if accept(b) => {
                    out.push(b);
                    self.bump();
                }
                _ => break,
            }
        }
        Ok(out)
    }
}

#[derive(Debug, Clone, Copy)]
enum Conv {
    /// Integer in `base`; 0 detects the base from the prefix.
    Int { base: u32 },
    Float,
    Str,
    Chars,
    Set([bool; 256]),
    Count,
}

#[derive(Debug, Clone, Copy)]
struct Directive {
    suppress: bool,
    width: Option<usize>,
    conv: Conv,
}

enum Outcome {
    Assigned,
    Suppressed,
    Stored,
    MatchFailure,
    InputFailure,
}

/// Parses a conversion starting right after the `%`.
/// Returns the directive and the number of format bytes used.
fn parse_directive(fmt: &[u8]) -> Option<(Directive, usize)> {
    let mut pos = 0;
    let suppress = fmt.first() == Some(&b'*');
    if suppress {
        pos += 1;
    }

    let digits_start = pos;
    let mut width = 0usize;
    while let Some(d) = fmt.get(pos).filter(|b| b.is_ascii_digit()) {
        width = width.saturating_mul(10).saturating_add(usize::from(d - b'0'));
        pos += 1;
    }
    let width = (pos > digits_start).then_some(width);

    while matches!(
        fmt.get(pos),
        Some(b'h' | b'l' | b'L' | b'q' | b'j' | b'z' | b't')
    ) {
        pos += 1;
    }

    let conv = match *fmt.get(pos)? {
        b'd' | b'u' => Conv::Int { base: 10 },
        b'i' => Conv::Int { base: 0 },
        b'o' => Conv::Int { base: 8 },
        b'x' | b'X' | b'p' => Conv::Int { base: 16 },
        b'f' | b'F' | b'e' | b'E' | b'g' | b'G' | b'a' | b'A' => Conv::Float,
        b's' => Conv::Str,
        b'c' => Conv::Chars,
        b'n' => Conv::Count,
        b'[' => {
            let (set, used) = parse_set(&fmt[pos + 1..])?;
            pos += used;
            Conv::Set(set)
        }
        _ => return None,
    };
    pos += 1;

    Some((
        Directive {
            suppress,
            width,
            conv,
        },
        pos,
    ))
}

/// Parses a scanset body after `[`. Returns the membership table and the
/// bytes used up to and including the closing `]`.
fn parse_set(fmt: &[u8]) -> Option<([bool; 256], usize)> {
    let mut pos = 0;
    let negate = fmt.first() == Some(&b'^');
    if negate {
        pos += 1;
    }
    let mut members = [false; 256];
    let body_start = pos;
    loop {
        let b = *fmt.get(pos)?;
        if b == b']' && pos > body_start {
            break;
        }
        let range_end = fmt.get(pos + 2).copied().filter(|&e| e != b']');
        match (fmt.get(pos + 1), range_end) {
            (Some(b'-'), Some(end)) if end >= b => {
                for m in b..=end {
                    members[usize::from(m)] = true;
                }
                pos += 3;
            }
            _ => {
                members[usize::from(b)] = true;
                pos += 1;
            }
        }
    }
    if negate {
        for m in &mut members {
            *m = !*m;
        }
    }
    Some((members, pos + 1))
}

fn type_mismatch(mode: Mode) -> Result<Outcome, CheckedError> {
    match mode {
        Mode::Checked => Err(CheckedError::InvalidArgument(
            "argument type does not match conversion",
        )),
        Mode::Classic => Ok(Outcome::MatchFailure),
    }
}

/// Usable capacity of a buffer target.
fn buffer_capacity(buf: &[u8], size: Option<usize>, mode: Mode) -> Result<usize, CheckedError> {
    match (mode, size) {
        (Mode::Classic, _) => Ok(buf.len()),
        (Mode::Checked, Some(size)) => Ok(size.min(buf.len())),
        (Mode::Checked, None) => Err(CheckedError::InvalidArgument(
            "buffer conversion requires a size argument",
        )),
    }
}

/// Stores a string token followed by a NUL.
fn store_string(
    token: &[u8],
    target: &mut ScanArg<'_>,
    mode: Mode,
) -> Result<Outcome, CheckedError> {
    let ScanArg::Str { buf, size } = target else {
        return type_mismatch(mode);
    };
    let cap = buffer_capacity(buf, *size, mode)?;
    if mode == Mode::Checked && token.len() >= cap {
        if let Some(first) = buf.first_mut() {
            *first = 0;
        }
        log::debug!("scan token of {} bytes does not fit {cap}", token.len());
        return Ok(Outcome::MatchFailure);
    }
    let n = token.len().min(cap);
    buf[..n].copy_from_slice(&token[..n]);
    if n < cap {
        buf[n] = 0;
    }
    Ok(Outcome::Assigned)
}

/// Stores exactly the bytes read by `%c`, without a terminator.
fn store_chars(
    token: &[u8],
    target: &mut ScanArg<'_>,
    mode: Mode,
) -> Result<Outcome, CheckedError> {
    match target {
        ScanArg::Char(c) if token.len() == 1 => {
            **c = token[0];
            Ok(Outcome::Assigned)
        }
        ScanArg::Str { buf, size } => {
            let cap = buffer_capacity(buf, *size, mode)?;
            if mode == Mode::Checked && token.len() > cap {
                if let Some(first) = buf.first_mut() {
                    *first = 0;
                }
                return Ok(Outcome::MatchFailure);
            }
            let n = token.len().min(cap);
            buf[..n].copy_from_slice(&token[..n]);
            Ok(Outcome::Assigned)
        }
        _ => type_mismatch(mode),
    }
}

fn lex_integer<S: Source>(
    sc: &mut Scanner<S>,
    base: u32,
    width: usize,
) -> io::Result<Option<(bool, u64)>> {
    let mut budget = width;
    let mut negative = false;
    if budget > 0 {
        if let Some(sign @ (b'+' | b'-')) = sc.peek()? {
            negative = sign == b'-';
            sc.bump();
            budget -= 1;
        }
    }

    let mut base = base;
    let mut digits = 0usize;
    if (base == 0 || base == 16) && budget > 0 && sc.peek()? == Some(b'0') {
        sc.bump();
        budget -= 1;
        digits += 1;
        if budget > 0 && matches!(sc.peek()?, Some(b'x' | b'X')) {
            sc.bump();
            budget -= 1;
            base = 16;
        } else if base == 0 {
            base = 8;
        }
    }
    if base == 0 {
        base = 10;
    }

    let mut value: u64 = 0;
    while budget > 0 {
        let Some(d) = sc.peek()?.and_then(|b| char::from(b).to_digit(base)) else {
            break;
        };
        value = value
            .wrapping_mul(u64::from(base))
            .wrapping_add(u64::from(d));
        sc.bump();
        budget -= 1;
        digits += 1;
    }

    Ok((digits > 0).then_some((negative, value)))
}

fn lex_float<S: Source>(sc: &mut Scanner<S>, width: usize) -> io::Result<Option<f64>> {
    let mut seen_dot = false;
    let mut seen_exp = false;
    let mut prev = 0u8;
    let mut word: Option<(&[u8], usize)> = None;
    let text = sc.take_while(width, |b| {
        if let Some((spelling, matched)) = word.as_mut() {
            let ok = spelling.get(*matched).is_some_and(|c| c.eq_ignore_ascii_case(&b));
            if ok {
                *matched += 1;
            }
            return ok;
        }
        let ok = match b {
            b'0'..=b'9' => true,
            b'i' | b'I' | b'n' | b'N' if matches!(prev, 0 | b'+' | b'-') => {
                let spelling: &[u8] = if b.eq_ignore_ascii_case(&b'i') {
                    b"infinity"
                } else {
                    b"nan"
                };
                word = Some((spelling, 1));
                true
            }
            b'+' | b'-' => prev == 0 || prev == b'e' || prev == b'E',
            b'.' if !seen_dot && !seen_exp => {
                seen_dot = true;
                true
            }
            b'e' | b'E' if !seen_exp && prev.is_ascii_digit() => {
                seen_exp = true;
                true
            }
            _ => false,
        };
        if ok {
            prev = b;
        }
        ok
    })?;

    // "1e" or "2e+" parse as their mantissa, as a C scanner would settle;
    // "infin" settles on "inf".
    let mut end = text.len();
    while end > 0 {
        if let Ok(v) = std::str::from_utf8(&text[..end]).unwrap_or("").parse::<f64>() {
            return Ok(Some(v));
        }
        end -= 1;
    }
    Ok(None)
}

fn convert<S: Source>(
    sc: &mut Scanner<S>,
    dir: &Directive,
    target: Option<&mut ScanArg<'_>>,
    mode: Mode,
) -> Result<Outcome, CheckedError> {
    if let Conv::Count = dir.conv {
        let consumed = sc.consumed;
        match target {
            Some(ScanArg::Int(v)) => **v = i64::try_from(consumed).unwrap_or(i64::MAX),
            Some(ScanArg::Uint(v)) => **v = consumed as u64,
            Some(_) => return type_mismatch(mode),
            None => {}
        }
        return Ok(Outcome::Stored);
    }

    if !matches!(dir.conv, Conv::Chars | Conv::Set(_)) {
        sc.skip_ws()?;
    }
    if sc.peek()?.is_none() {
        return Ok(Outcome::InputFailure);
    }

    let width = dir.width.filter(|&w| w > 0);
    let outcome = match dir.conv {
        Conv::Int { base } => {
            let Some((negative, magnitude)) =
                lex_integer(sc, base, width.unwrap_or(usize::MAX))?
            else {
                return Ok(Outcome::MatchFailure);
            };
            match target {
                None => Outcome::Suppressed,
                Some(ScanArg::Int(v)) => {
                    let signed = magnitude as i64;
                    **v = if negative { signed.wrapping_neg() } else { signed };
                    Outcome::Assigned
                }
                Some(ScanArg::Uint(v)) => {
                    **v = if negative {
                        magnitude.wrapping_neg()
                    } else {
                        magnitude
                    };
                    Outcome::Assigned
                }
                Some(_) => type_mismatch(mode)?,
            }
        }
        Conv::Float => {
            let Some(value) = lex_float(sc, width.unwrap_or(usize::MAX))? else {
                return Ok(Outcome::MatchFailure);
            };
            match target {
                None => Outcome::Suppressed,
                Some(ScanArg::Float(v)) => {
                    **v = value;
                    Outcome::Assigned
                }
                Some(_) => type_mismatch(mode)?,
            }
        }
        Conv::Str => {
            let token = sc.take_while(width.unwrap_or(usize::MAX), |b| !b.is_ascii_whitespace())?;
            match target {
                None => Outcome::Suppressed,
                Some(t) => store_string(&token, t, mode)?,
            }
        }
        Conv::Set(members) => {
            let token = sc.take_while(width.unwrap_or(usize::MAX), |b| {
                members[usize::from(b)]
            })?;
            if token.is_empty() {
                return Ok(Outcome::MatchFailure);
            }
            match target {
                None => Outcome::Suppressed,
                Some(t) => store_string(&token, t, mode)?,
            }
        }
        Conv::Chars => {
            let want = width.unwrap_or(1);
            let token = sc.take_while(want, |_| true)?;
            if token.len() < want {
                return Ok(Outcome::InputFailure);
            }
            match target {
                None => Outcome::Suppressed,
                Some(t) => store_chars(&token, t, mode)?,
            }
        }
        Conv::Count => Outcome::Stored,
    };
    Ok(outcome)
}

fn input_failure(assigned: i32, converted_any: bool) -> i32 {
    if assigned == 0 && !converted_any {
        EOF
    } else {
        assigned
    }
}

fn run<S: Source>(
    src: S,
    format: &[u8],
    args: &mut [ScanArg<'_>],
    mode: Mode,
) -> Result<i32, CheckedError> {
    let mut sc = Scanner::new(src);
    let mut assigned = 0i32;
    let mut converted_any = false;
    let mut next_arg = 0usize;
    let mut i = 0;

    while let Some(&f) = format.get(i).filter(|&&b| b != 0) {
        if f.is_ascii_whitespace() {
            sc.skip_ws()?;
            i += 1;
            continue;
        }

        if f != b'%' || format.get(i + 1) == Some(&b'%') {
            if f == b'%' {
                sc.skip_ws()?;
                i += 2;
            } else {
                i += 1;
            }
            match sc.peek()? {
                Some(b) if b == f => sc.bump(),
                Some(_) => return Ok(assigned),
                None => return Ok(input_failure(assigned, converted_any)),
            }
            continue;
        }

        let Some((dir, used)) = parse_directive(&format[i + 1..]) else {
            return match mode {
                Mode::Checked => Err(CheckedError::InvalidArgument("malformed conversion")),
                Mode::Classic => Ok(assigned),
            };
        };
        i += 1 + used;

        let consumes_arg = !dir.suppress;
        let target = if consumes_arg {
            let Some(arg) = args.get_mut(next_arg) else {
                return match mode {
                    Mode::Checked => Err(CheckedError::InvalidArgument("too few arguments")),
                    Mode::Classic => Ok(assigned),
                };
            };
            next_arg += 1;
            Some(arg)
        } else {
            None
        };

        match convert(&mut sc, &dir, target, mode)? {
            Outcome::Assigned => {
                assigned += 1;
                converted_any = true;
            }
            Outcome::Suppressed => converted_any = true,
            Outcome::Stored => {}
            Outcome::MatchFailure => return Ok(assigned),
            Outcome::InputFailure => return Ok(input_failure(assigned, converted_any)),
        }
    }
    Ok(assigned)
}

fn into_io(result: Result<i32, CheckedError>) -> io::Result<i32> {
    match result {
        Ok(n) => Ok(n),
        Err(CheckedError::Io(e)) => Err(e),
        Err(other) => Err(io::Error::other(other.to_string())),
    }
}

/// Scans a byte string. Buffer sizes are ignored.
///
/// Returns the number of assigned conversions, or [`EOF`] if the input ended
/// before the first one.
pub fn sscanf(input: &[u8], format: &[u8], args: &mut [ScanArg<'_>]) -> i32 {
    let src = SliceSource { input, pos: 0 };
    run(src, format, args, Mode::Classic).unwrap_or(EOF)
}

/// Bounds-checked [`sscanf`]: buffer targets must carry their size.
pub fn sscanf_s(
    input: &[u8],
    format: &[u8],
    args: &mut [ScanArg<'_>],
) -> Result<i32, CheckedError> {
    run(SliceSource { input, pos: 0 }, format, args, Mode::Checked)
}

/// Scans from a buffered stream. Buffer sizes are ignored.
pub fn fscanf<R: BufRead + ?Sized>(
    stream: &mut R,
    format: &[u8],
    args: &mut [ScanArg<'_>],
) -> io::Result<i32> {
    into_io(run(ReaderSource(stream), format, args, Mode::Classic))
}

/// Bounds-checked [`fscanf`].
pub fn fscanf_s<R: BufRead + ?Sized>(
    stream: &mut R,
    format: &[u8],
    args: &mut [ScanArg<'_>],
) -> Result<i32, CheckedError> {
    run(ReaderSource(stream), format, args, Mode::Checked)
}

/// [`fscanf`] on standard input.
pub fn scanf(format: &[u8], args: &mut [ScanArg<'_>]) -> io::Result<i32> {
    fscanf(&mut io::stdin().lock(), format, args)
}

/// [`fscanf_s`] on standard input.
pub fn scanf_s(format: &[u8], args: &mut [ScanArg<'_>]) -> Result<i32, CheckedError> {
    fscanf_s(&mut io::stdin().lock(), format, args)
}
