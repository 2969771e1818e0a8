//! File opening: fopen and fopen_s.
//!
//! Mode strings follow C `fopen` ("r", "w+", "rb", "a+b", "wx") plus the
//! CRT's explicit text modifier `t`. The stream handed back is a
//! `std::fs::File`.

use std::fs::{File, OpenOptions};
use std::path::Path;

use crate::errno::CheckedError;

/// File open mode flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OpenFlags {
    pub readable: bool,
    pub writable: bool,
    pub append: bool,
    pub truncate: bool,
    pub create: bool,
    pub binary: bool,
    pub exclusive: bool,
}

impl OpenFlags {
    /// Translates the flags into `OpenOptions`.
    #[must_use]
    pub fn to_open_options(&self) -> OpenOptions {
        let mut opts = OpenOptions::new();
        opts.read(self.readable)
            .write(self.writable && !self.append)
            .append(self.append)
            .truncate(self.truncate);
        if self.exclusive {
            opts.create_new(true);
        } else {
            opts.create(self.create);
        }
        opts
    }
}

/// Parses an fopen mode string. Returns `None` if the mode is invalid.
pub fn parse_mode(mode: &str) -> Option<OpenFlags> {
    let mut bytes = mode.bytes();
    let mut flags = OpenFlags::default();

    match bytes.next()? {
        b'r' => flags.readable = true,
        b'w' => {
            flags.writable = true;
            flags.create = true;
            flags.truncate = true;
        }
        b'a' => {
            flags.writable = true;
            flags.create = true;
            flags.append = true;
        }
        _ => return None,
    }

    // Modifiers: '+', 'b', 't', 'x' in any order.
    for b in bytes {
        match b {
            b'+' => {
                flags.readable = true;
                flags.writable = true;
            }
            b'b' => flags.binary = true,
            b't' => flags.binary = false,
            b'x' if flags.truncate => flags.exclusive = true,
            _ => return None,
        }
    }

    Some(flags)
}

/// Opens `path` with a C mode string. Returns `None` on any failure.
pub fn fopen<P: AsRef<Path>>(path: P, mode: &str) -> Option<File> {
    let flags = parse_mode(mode)?;
    flags.to_open_options().open(path).ok()
}

/// Opens `path` into `*fp`.
///
/// On failure `*fp` is set to `None` and the reason is returned: an invalid
/// mode is `InvalidArgument`, anything the OS refuses is `Io`.
pub fn fopen_s<P: AsRef<Path>>(
    fp: &mut Option<File>,
    path: P,
    mode: &str,
) -> Result<(), CheckedError> {
    *fp = None;
    let flags = parse_mode(mode).ok_or(CheckedError::InvalidArgument("invalid mode string"))?;
    *fp = Some(flags.to_open_options().open(path.as_ref())?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errno::{EINVAL, ENOENT};
    use std::io::{Read, Write};

    fn scratch(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("crtcompat-file-{}-{name}", std::process::id()))
    }

    #[test]
    fn parse_basic_modes() {
        let r = parse_mode("r").unwrap();
        assert!(r.readable && !r.writable);
        let w = parse_mode("w+b").unwrap();
        assert!(w.readable && w.writable && w.truncate && w.binary);
        let a = parse_mode("at").unwrap();
        assert!(a.append && !a.binary);
        assert!(parse_mode("wx").unwrap().exclusive);
    }

    #[test]
    fn parse_rejects_bad_modes() {
        assert!(parse_mode("").is_none());
        assert!(parse_mode("q").is_none());
        assert!(parse_mode("rz").is_none());
        assert!(parse_mode("rx").is_none());
    }

    #[test]
    fn fopen_s_roundtrip() {
        let path = scratch("roundtrip");
        let mut fp = None;
        fopen_s(&mut fp, &path, "w").unwrap();
        fp.as_mut().unwrap().write_all(b"payload").unwrap();
        drop(fp.take());

        let mut reader = fopen(&path, "rb").unwrap();
        let mut text = String::new();
        reader.read_to_string(&mut text).unwrap();
        assert_eq!(text, "payload");
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn fopen_s_reports_missing_file() {
        let mut fp = None;
        let err = fopen_s(&mut fp, scratch("missing"), "r").unwrap_err();
        assert_eq!(err.errno(), ENOENT);
        assert!(fp.is_none());
    }

    #[test]
    fn fopen_s_reports_bad_mode() {
        let mut fp = None;
        let err = fopen_s(&mut fp, scratch("bad-mode"), "k").unwrap_err();
        assert_eq!(err.errno(), EINVAL);
        assert!(fopen(scratch("bad-mode"), "k").is_none());
    }
}
