//! Ledger of fallback calls that skipped a bounds check.
//!
//! Every fallback operation reports itself here before forwarding. The ledger
//! counts calls per operation and logs according to [`crate::config`].

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use crate::config::{GapWarnings, gap_warnings};

/// Fallback operations whose bounds-checked contract is not enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UncheckedOp {
    Memcpy,
    Memmove,
    Strcpy,
    Strcat,
    Strncpy,
    Strncat,
    Strtok,
    Strlwr,
    Strupr,
    Sprintf,
    Gets,
    Getenv,
    Rand,
    Scan,
}

impl UncheckedOp {
    pub const ALL: [Self; 14] = [
        Self::Memcpy,
        Self::Memmove,
        Self::Strcpy,
        Self::Strcat,
        Self::Strncpy,
        Self::Strncat,
        Self::Strtok,
        Self::Strlwr,
        Self::Strupr,
        Self::Sprintf,
        Self::Gets,
        Self::Getenv,
        Self::Rand,
        Self::Scan,
    ];

    /// The bounds-checked name the caller used.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Memcpy => "memcpy_s",
            Self::Memmove => "memmove_s",
            Self::Strcpy => "strcpy_s",
            Self::Strcat => "strcat_s",
            Self::Strncpy => "strncpy_s",
            Self::Strncat => "strncat_s",
            Self::Strtok => "strtok_s",
            Self::Strlwr => "_strlwr_s",
            Self::Strupr => "_strupr_s",
            Self::Sprintf => "sprintf_s",
            Self::Gets => "gets_s",
            Self::Getenv => "getenv_s",
            Self::Rand => "rand_s",
            Self::Scan => "scanf_s",
        }
    }

    /// What the caller does not get.
    #[must_use]
    pub const fn skipped(self) -> &'static str {
        match self {
            Self::Strtok => "context validation",
            Self::Gets => "line length check (newline is kept)",
            Self::Rand => "OS entropy; values come from the shared classic generator",
            Self::Scan => "buffer size check for %s/%c/%[",
            _ => "destination capacity check",
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

const OPS: usize = UncheckedOp::ALL.len();

struct Ledger {
    calls: [AtomicU64; OPS],
    warned: [AtomicBool; OPS],
}

static LEDGER: Ledger = Ledger {
    calls: [const { AtomicU64::new(0) }; OPS],
    warned: [const { AtomicBool::new(false) }; OPS],
};

/// Whether a call logs under `policy`, given whether its operation already
/// logged once.
const fn should_warn(policy: GapWarnings, already_warned: bool) -> bool {
    match policy {
        GapWarnings::Off => false,
        GapWarnings::Always => true,
        GapWarnings::Once => !already_warned,
    }
}

/// Records one unchecked call of `op` and logs per policy.
pub(crate) fn report(op: UncheckedOp) {
    let i = op.index();
    LEDGER.calls[i].fetch_add(1, Ordering::Relaxed);
    let policy = gap_warnings();
    let already_warned = match policy {
        GapWarnings::Once => LEDGER.warned[i].swap(true, Ordering::Relaxed),
        GapWarnings::Always | GapWarnings::Off => false,
    };
    if should_warn(policy, already_warned) {
        log::warn!(
            "{} is emulated over its classic counterpart: no {}",
            op.symbol(),
            op.skipped()
        );
    }
}

/// Number of unchecked calls of `op` so far in this process.
#[must_use]
pub fn unchecked_calls(op: UncheckedOp) -> u64 {
    LEDGER.calls[op.index()].load(Ordering::Relaxed)
}

/// Total unchecked calls across all operations.
#[must_use]
pub fn total_unchecked_calls() -> u64 {
    UncheckedOp::ALL.iter().map(|&op| unchecked_calls(op)).sum()
}
