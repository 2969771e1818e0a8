//! Runtime reporting policy for the fallback path.
//!
//! The policy is set via the `CRTCOMPAT_GAP_WARNINGS` environment variable:
//! - `once` (default): the first call of each unchecked operation logs a
//!   warning naming the bounds check it skipped.
//! - `always`: every call logs.
//! - `off`: nothing is logged. Calls are still counted.

use std::sync::atomic::{AtomicU8, Ordering};

/// How loudly the fallback path reports skipped bounds checks.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GapWarnings {
    /// One warning per operation per process.
    #[default]
    Once,
    /// A warning on every call.
    Always,
    Off,
}

impl GapWarnings {
    /// Parse from string (case-insensitive). Unknown values read as `Once`.
    #[must_use]
    pub fn from_str_loose(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "always" | "every" | "all" => Self::Always,
            "off" | "none" | "never" | "0" => Self::Off,
            _ => Self::Once,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Once => "once",
            Self::Always => "always",
            Self::Off => "off",
        }
    }
}

// Atomic cache: 0=unresolved, 1=Once, 2=Always, 3=Off, 255=resolving.
static CACHED_POLICY: AtomicU8 = AtomicU8::new(0);

const POLICY_UNRESOLVED: u8 = 0;
const POLICY_ONCE: u8 = 1;
const POLICY_ALWAYS: u8 = 2;
const POLICY_OFF: u8 = 3;
const POLICY_RESOLVING: u8 = 255;

fn policy_to_u8(policy: GapWarnings) -> u8 {
    match policy {
        GapWarnings::Once => POLICY_ONCE,
        GapWarnings::Always => POLICY_ALWAYS,
        GapWarnings::Off => POLICY_OFF,
    }
}

fn u8_to_policy(v: u8) -> GapWarnings {
    match v {
        POLICY_ALWAYS => GapWarnings::Always,
        POLICY_OFF => GapWarnings::Off,
        _ => GapWarnings::Once,
    }
}

/// Get the configured policy (reads the environment on first call, caches
/// thereafter).
///
/// A call that races the first resolution sees `Once` until the winner stores
/// the parsed value.
#[must_use]
pub fn gap_warnings() -> GapWarnings {
    let cached = CACHED_POLICY.load(Ordering::Relaxed);
    if cached != POLICY_UNRESOLVED && cached != POLICY_RESOLVING {
        return u8_to_policy(cached);
    }
    if cached == POLICY_RESOLVING {
        return GapWarnings::Once;
    }

    if CACHED_POLICY
        .compare_exchange(
            POLICY_UNRESOLVED,
            POLICY_RESOLVING,
            Ordering::SeqCst,
            Ordering::Relaxed,
        )
        .is_err()
    {
        let v = CACHED_POLICY.load(Ordering::Relaxed);
        return if v != POLICY_UNRESOLVED && v != POLICY_RESOLVING {
            u8_to_policy(v)
        } else {
            GapWarnings::Once
        };
    }

    let policy = std::env::var("CRTCOMPAT_GAP_WARNINGS")
        .map(|v| GapWarnings::from_str_loose(&v))
        .unwrap_or_default();
    CACHED_POLICY.store(policy_to_u8(policy), Ordering::Release);
    policy
}

/// Overrides the cached policy for the rest of the process.
pub fn set_gap_warnings(policy: GapWarnings) {
    CACHED_POLICY.store(policy_to_u8(policy), Ordering::Release);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_policies() {
        assert_eq!(GapWarnings::from_str_loose("once"), GapWarnings::Once);
        assert_eq!(GapWarnings::from_str_loose("ALWAYS"), GapWarnings::Always);
        assert_eq!(GapWarnings::from_str_loose("every"), GapWarnings::Always);
        assert_eq!(GapWarnings::from_str_loose(" off "), GapWarnings::Off);
        assert_eq!(GapWarnings::from_str_loose("never"), GapWarnings::Off);
        assert_eq!(GapWarnings::from_str_loose("bogus"), GapWarnings::Once);
    }

    #[test]
    fn default_is_once() {
        assert_eq!(GapWarnings::default(), GapWarnings::Once);
        assert_eq!(GapWarnings::default().as_str(), "once");
    }

    #[test]
    fn cached_policy_is_process_sticky_until_overridden() {
        let previous = CACHED_POLICY.swap(POLICY_ALWAYS, Ordering::SeqCst);
        assert_eq!(gap_warnings(), GapWarnings::Always);
        assert_eq!(gap_warnings(), GapWarnings::Always);

        set_gap_warnings(GapWarnings::Off);
        assert_eq!(gap_warnings(), GapWarnings::Off);

        CACHED_POLICY.store(previous, Ordering::SeqCst);
    }

    #[test]
    fn resolving_state_reads_as_once() {
        assert_eq!(u8_to_policy(POLICY_RESOLVING), GapWarnings::Once);
        assert_eq!(u8_to_policy(policy_to_u8(GapWarnings::Off)), GapWarnings::Off);
    }
}
