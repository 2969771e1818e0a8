use crtcompat::{ActiveBackend, CompatBackend, CompatPath, SELECTION, Status};

#[derive(Clone, Copy)]
struct Row {
    native: bool,
    opt_out: bool,
    auto_secure: bool,
    auto_unsecure: bool,
    expected: CompatPath,
}

const fn row(
    native: bool,
    opt_out: bool,
    auto_secure: bool,
    auto_unsecure: bool,
    expected: CompatPath,
) -> Row {
    Row {
        native,
        opt_out,
        auto_secure,
        auto_unsecure,
        expected,
    }
}

// native, opt-out, auto-secure, auto-unsecure -> path
const ROWS: &[Row] = &[
    row(true, false, false, false, CompatPath::Forward),
    row(true, false, true, false, CompatPath::Forward),
    row(true, true, true, false, CompatPath::Fallback),
    row(false, false, false, false, CompatPath::Fallback),
    row(false, false, false, true, CompatPath::Fallback),
    row(false, true, true, true, CompatPath::Fallback),
];

fn probe_env(row: Row) -> impl Fn(&str) -> Option<String> {
    move |key| {
        let set = match key {
            "CARGO_CFG_TARGET_ENV" => {
                return Some(if row.native { "msvc" } else { "gnu" }.to_string());
            }
            "CARGO_FEATURE_NO_SECURE_OVERLOAD" => row.opt_out,
            "CARGO_FEATURE_AUTO_SECURE" => row.auto_secure,
            "CARGO_FEATURE_AUTO_UNSECURE" => row.auto_unsecure,
            _ => false,
        };
        set.then(|| "1".to_string())
    }
}

#[test]
fn configuration_table_selects_one_path_per_row() {
    for (i, row) in ROWS.iter().enumerate() {
        let probe = crtcompat::feature::BuildProbe::from_env(probe_env(*row));
        let selection = crtcompat::feature::select(&probe);
        assert_eq!(selection.path, row.expected, "row {i}");
        assert_eq!(
            selection.remap_copies,
            row.expected == CompatPath::Forward && row.auto_secure,
            "row {i}"
        );
        assert_eq!(
            selection.remap_scans,
            row.expected == CompatPath::Fallback && row.auto_unsecure,
            "row {i}"
        );
    }
}

#[test]
fn compiled_crate_has_exactly_one_path() {
    assert_ne!(cfg!(crtcompat_forward), cfg!(crtcompat_fallback));
    let expected = if cfg!(crtcompat_forward) {
        CompatPath::Forward
    } else {
        CompatPath::Fallback
    };
    assert_eq!(SELECTION.path, expected);
    assert_eq!(<ActiveBackend as CompatBackend>::PATH, expected);
}

#[test]
fn active_backend_copy_follows_its_path() {
    let mut dst = [0xffu8; 16];
    let status = ActiveBackend::copy(&mut dst, 4, b"overflowing\0");
    match SELECTION.path {
        CompatPath::Forward => {
            assert_eq!(status, Status::Error);
            assert_eq!(dst[0], 0);
        }
        CompatPath::Fallback => {
            assert_eq!(status, Status::Ok);
            assert_eq!(&dst[..12], b"overflowing\0");
        }
    }
}

const LONG: &[u8] = b"twelve bytes\0";

#[cfg(crtcompat_fallback)]
#[test]
fn root_checked_names_ignore_capacity_on_fallback() {
    let mut dst = [0u8; 16];
    assert_eq!(crtcompat::strcpy_s(&mut dst, 4, LONG), Status::Ok);
    assert_eq!(&dst[..LONG.len()], LONG);

    let mut dst = [0u8; 16];
    assert_eq!(crtcompat::memcpy_s(&mut dst, 2, b"abcdef", 6), Status::Ok);
    assert_eq!(&dst[..6], b"abcdef");
}

#[cfg(crtcompat_forward)]
#[test]
fn root_checked_names_enforce_capacity_on_forward() {
    let mut dst = [0xffu8; 16];
    let err = crtcompat::strcpy_s(&mut dst, 4, LONG).unwrap_err();
    assert_eq!(err.errno(), crtcompat::ERANGE);
    assert_eq!(dst[0], 0);

    let mut dst = [0xffu8; 16];
    assert!(crtcompat::memcpy_s(&mut dst, 2, b"abcdef", 6).is_err());
}

#[cfg(all(crtcompat_forward, crtcompat_remap_copies))]
#[test]
fn root_strcpy_is_remapped_to_the_checked_copy() {
    let mut small = [0u8; 4];
    let err = crtcompat::strcpy(&mut small, LONG).unwrap_err();
    assert_eq!(err.errno(), crtcompat::ERANGE);

    let mut fits = [0u8; 16];
    assert!(crtcompat::strcpy(&mut fits, LONG).is_ok());
    assert_eq!(&fits[..LONG.len()], LONG);
}

#[cfg(not(all(crtcompat_forward, crtcompat_remap_copies)))]
#[test]
fn root_strcpy_stays_classic_without_copy_remap() {
    let mut small = [0u8; 4];
    let written: usize = crtcompat::strcpy(&mut small, LONG);
    assert_eq!(written, 4);
    assert_eq!(&small, b"twel");
}

#[cfg(all(crtcompat_fallback, crtcompat_remap_scans))]
#[test]
fn root_sscanf_s_drops_sizes_with_scan_remap() {
    let mut word = [0u8; 8];
    let n: i32 = crtcompat::sscanf_s(
        b"abcdef",
        b"%s",
        &mut [crtcompat::ScanArg::sized(&mut word, 2)],
    );
    assert_eq!(n, 1);
    assert_eq!(&word[..7], b"abcdef\0");
}

#[cfg(crtcompat_forward)]
#[test]
fn root_sscanf_s_requires_sizes_on_forward() {
    let mut word = [0u8; 8];
    let unsized_arg = crtcompat::sscanf_s(b"abc", b"%s", &mut [crtcompat::ScanArg::str(&mut word)]);
    assert!(unsized_arg.is_err());

    let mut word = [0u8; 8];
    let n = crtcompat::sscanf_s(b"abc", b"%s", &mut [crtcompat::ScanArg::sized(&mut word, 8)]);
    assert_eq!(n.ok(), Some(1));
    assert_eq!(&word[..4], b"abc\0");
}
