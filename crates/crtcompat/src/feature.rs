//! Build-time feature selection.
//!
//! The build script compiles this file on its own (`#[path]` module), probes
//! the target and the Cargo features into a [`BuildProbe`], and turns the
//! resulting [`Selection`] into `--cfg` flags. The library reads those flags
//! back into [`crate::SELECTION`]. Nothing here may depend on other modules.

/// C language dialect of a consumer, for the inline-keyword rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CDialect {
    C89,
    C99,
    C11,
    Cpp,
}

impl CDialect {
    /// Parses `c89`, `c90`, `c99`, `c11`, `c17`, `c++` and friends.
    /// Unknown values read as C11.
    #[must_use]
    pub fn from_str_loose(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "c89" | "c90" | "ansi" | "gnu89" | "gnu90" => Self::C89,
            "c99" | "gnu99" => Self::C99,
            "c++" | "cpp" | "cxx" => Self::Cpp,
            _ => Self::C11,
        }
    }

    /// Whether the dialect has the `inline` keyword.
    #[must_use]
    pub const fn has_inline(self) -> bool {
        !matches!(self, Self::C89)
    }
}

/// Everything the selection looks at, all known at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildProbe {
    /// The bounds-checked family is native to the toolchain.
    pub native_checked: bool,
    /// Opt-out from the automatic override (`no-secure-overload`).
    pub opt_out: bool,
    /// `auto-secure` opt-in.
    pub auto_secure: bool,
    /// `auto-unsecure` opt-in.
    pub auto_unsecure: bool,
    /// Target belongs to the Windows family.
    pub windows_family: bool,
    pub dialect: CDialect,
    /// Compiler accepts `inline` regardless of dialect (GNU C does).
    pub gnu_compatible: bool,
}

impl BuildProbe {
    /// Probes the build-script environment through `var`.
    ///
    /// Reads `CARGO_CFG_TARGET_ENV`, `CARGO_CFG_TARGET_FAMILY`, the
    /// `CARGO_FEATURE_*` flags of this crate and `CRTCOMPAT_C_DIALECT`.
    pub fn from_env(var: impl Fn(&str) -> Option<String>) -> Self {
        let target_env = var("CARGO_CFG_TARGET_ENV").unwrap_or_default();
        let family = var("CARGO_CFG_TARGET_FAMILY").unwrap_or_default();
        let feature = |name: &str| var(&format!("CARGO_FEATURE_{name}")).is_some();
        Self {
            native_checked: target_env == "msvc" || feature("NATIVE_CHECKED"),
            opt_out: feature("NO_SECURE_OVERLOAD"),
            auto_secure: feature("AUTO_SECURE"),
            auto_unsecure: feature("AUTO_UNSECURE"),
            windows_family: family.split(',').any(|f| f == "windows"),
            dialect: var("CRTCOMPAT_C_DIALECT")
                .map(|d| CDialect::from_str_loose(&d))
                .unwrap_or(CDialect::C11),
            gnu_compatible: target_env == "gnu",
        }
    }
}

/// Which family is emulated over the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompatPath {
    /// Classic names over the native bounds-checked primitives.
    Forward,
    /// Bounds-checked names over the classic primitives, capacity ignored.
    Fallback,
}

impl CompatPath {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Forward => "forward",
            Self::Fallback => "fallback",
        }
    }

    /// The `--cfg` name the build script emits for this path.
    #[must_use]
    pub const fn cfg_name(self) -> &'static str {
        match self {
            Self::Forward => "crtcompat_forward",
            Self::Fallback => "crtcompat_fallback",
        }
    }
}

/// Outcome of feature selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub path: CompatPath,
    /// Memory/string copy and case names are routed to the checked family.
    pub remap_copies: bool,
    /// Scan names are exposed with the expected-size argument dropped.
    pub remap_scans: bool,
    /// `sleep(seconds)` forwards to the millisecond primitive.
    pub seconds_sleep_shim: bool,
    /// A C consumer keeps its `inline` keyword.
    pub inline_keyword: bool,
}

/// Selects exactly one path. Inconclusive probes land on the fallback path.
#[must_use]
pub const fn select(probe: &BuildProbe) -> Selection {
    let path = if probe.native_checked && !probe.opt_out {
        CompatPath::Forward
    } else {
        CompatPath::Fallback
    };
    let forward = matches!(path, CompatPath::Forward);
    Selection {
        path,
        remap_copies: forward && probe.auto_secure,
        remap_scans: !forward && probe.auto_unsecure,
        seconds_sleep_shim: probe.windows_family,
        inline_keyword: probe.dialect.has_inline()
            || matches!(probe.dialect, CDialect::Cpp)
            || probe.gnu_compatible,
    }
}
