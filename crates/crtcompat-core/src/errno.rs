//! Status codes shared by both primitive families.
//!
//! The bounds-checked family returns an `errno_t`; here that is [`Errno`] for
//! the raw number and [`CheckedError`] for the typed failure. The fallback
//! layer only distinguishes success from failure, which is [`Status`].

use thiserror::Error;

/// Raw `errno_t` value. Zero means success.
pub type Errno = i32;

pub const EOK: Errno = 0;
pub const ENOENT: Errno = 2;
pub const EIO: Errno = 5;
pub const EINVAL: Errno = 22;
pub const ERANGE: Errno = 34;
/// Returned by the bounds-checked copies when `TRUNCATE` cut the output short.
pub const STRUNCATE: Errno = 80;

/// Count sentinel asking `strncpy_s`/`strncat_s` to truncate instead of fail.
pub const TRUNCATE: usize = usize::MAX;

/// Two-valued status, the only thing the fallback layer can report.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    #[default]
    Ok,
    Error,
}

impl Status {
    /// Numeric form: `0` for success, `1` for failure.
    #[must_use]
    pub const fn code(self) -> Errno {
        match self {
            Self::Ok => 0,
            Self::Error => 1,
        }
    }

    #[must_use]
    pub const fn is_ok(self) -> bool {
        matches!(self, Self::Ok)
    }
}

impl From<Status> for Errno {
    fn from(status: Status) -> Self {
        status.code()
    }
}

impl<T> From<&Result<T, CheckedError>> for Status {
    fn from(result: &Result<T, CheckedError>) -> Self {
        match result {
            Ok(_) => Self::Ok,
            Err(_) => Self::Error,
        }
    }
}

impl<T> From<Result<T, CheckedError>> for Status {
    fn from(result: Result<T, CheckedError>) -> Self {
        Self::from(&result)
    }
}

/// Failure reported by a bounds-checked primitive.
#[derive(Debug, Error)]
pub enum CheckedError {
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
    #[error("destination holds {capacity} bytes, {required} required")]
    BufferTooSmall { capacity: usize, required: usize },
    #[error("output truncated to {written} bytes")]
    Truncated { written: usize },
    #[error("{0} not found")]
    NotFound(String),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

impl CheckedError {
    /// The `errno_t` a C caller would have seen.
    #[must_use]
    pub fn errno(&self) -> Errno {
        match self {
            Self::InvalidArgument(_) => EINVAL,
            Self::BufferTooSmall { .. } => ERANGE,
            Self::Truncated { .. } => STRUNCATE,
            Self::NotFound(_) => ENOENT,
            Self::Io(e) => e.raw_os_error().unwrap_or(EIO),
        }
    }
}

/// Collapses a checked result into its `errno_t`.
pub fn errno_of<T>(result: &Result<T, CheckedError>) -> Errno {
    match result {
        Ok(_) => EOK,
        Err(e) => e.errno(),
    }
}
