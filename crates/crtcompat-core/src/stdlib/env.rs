//! Environment variable lookup: getenv and getenv_s.

use crate::errno::CheckedError;

/// Validates that `name` is a legal environment variable name.
///
/// POSIX requires: non-empty, no `'='` character, no embedded NUL.
pub fn valid_env_name(name: &str) -> bool {
    !name.is_empty() && !name.contains('=') && !name.contains('\0')
}

/// Returns the value of `name`, or `None` if it is unset, invalid, or not
/// valid UTF-8.
pub fn getenv(name: &str) -> Option<String> {
    if !valid_env_name(name) {
        return None;
    }
    std::env::var(name).ok()
}

/// Copies the value of `name` into `dest` with its NUL.
///
/// `required` always receives the size the value needs (length + 1), or 0 if
/// the variable is unset. An unset variable is not an error: `dest` is
/// emptied and `Ok` is returned. A value that does not fit `dest_size` is
/// `BufferTooSmall`; passing `dest_size == 0` only queries `required`.
pub fn getenv_s(
    required: &mut usize,
    dest: &mut [u8],
    dest_size: usize,
    name: &str,
) -> Result<(), CheckedError> {
    *required = 0;
    if !valid_env_name(name) {
        return Err(CheckedError::InvalidArgument("invalid variable name"));
    }
    if dest_size > dest.len() {
        return Err(CheckedError::InvalidArgument(
            "declared capacity exceeds destination",
        ));
    }

    let Some(value) = std::env::var_os(name) else {
        if let Some(first) = dest.first_mut() {
            *first = 0;
        }
        return Ok(());
    };
    let bytes = value.as_encoded_bytes();
    *required = bytes.len() + 1;

    if dest_size == 0 {
        return Ok(());
    }
    if bytes.len() >= dest_size {
        dest[0] = 0;
        return Err(CheckedError::BufferTooSmall {
            capacity: dest_size,
            required: *required,
        });
    }
    dest[..bytes.len()].copy_from_slice(bytes);
    dest[bytes.len()] = 0;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errno::{EINVAL, ERANGE};

    const MISSING: &str = "CRTCOMPAT_SURELY_UNSET_VARIABLE_7f3a";

    #[test]
    fn valid_names() {
        assert!(valid_env_name("HOME"));
        assert!(valid_env_name("_"));
        assert!(!valid_env_name(""));
        assert!(!valid_env_name("A=B"));
        assert!(!valid_env_name("A\0B"));
    }

    #[test]
    fn getenv_missing() {
        assert_eq!(getenv(MISSING), None);
        assert_eq!(getenv("BAD=NAME"), None);
    }

    #[test]
    fn getenv_s_missing_is_empty_success() {
        let mut required = 99;
        let mut buf = [0xffu8; 4];
        getenv_s(&mut required, &mut buf, 4, MISSING).unwrap();
        assert_eq!(required, 0);
        assert_eq!(buf[0], 0);
    }

    #[test]
    fn getenv_s_reports_required_size() {
        let Some(path) = std::env::var_os("PATH") else {
            return;
        };
        let len = path.as_encoded_bytes().len();

        let mut required = 0;
        let mut empty: [u8; 0] = [];
        getenv_s(&mut required, &mut empty, 0, "PATH").unwrap();
        assert_eq!(required, len + 1);

        if len > 0 {
            let mut tiny = [0xffu8; 1];
            let err = getenv_s(&mut required, &mut tiny, 1, "PATH").unwrap_err();
            assert_eq!(err.errno(), ERANGE);
            assert_eq!(tiny[0], 0);
        }

        let mut big = vec![0u8; len + 1];
        getenv_s(&mut required, &mut big, len + 1, "PATH").unwrap();
        assert_eq!(&big[..len], path.as_encoded_bytes());
        assert_eq!(big[len], 0);
    }

    #[test]
    fn getenv_s_rejects_bad_name() {
        let mut required = 0;
        let mut buf = [0u8; 4];
        let err = getenv_s(&mut required, &mut buf, 4, "").unwrap_err();
        assert_eq!(err.errno(), EINVAL);
    }
}
