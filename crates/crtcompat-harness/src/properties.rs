//! Runtime checks of the layer's observable properties.
//!
//! Each [`Property`] runs against the compiled crate and yields a
//! [`PropertyResult`]. [`plan`] picks the properties that apply to the active
//! path; [`run_plan`] executes them and logs one JSONL record each.

use std::time::{Duration, Instant};

use serde::Serialize;
use serde_json::json;

use crtcompat::{CompatPath, ERANGE, Rand, SELECTION, Status, fallback, forward};
use crtcompat_core::errno::{EOK, errno_of};
use crtcompat_core::string::classic;

use crate::structured_log::{LogEmitter, LogEntry, LogLevel, Outcome};

/// A checkable property of the compatibility layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Property {
    /// Fallback `strcpy_s` ignores a too-small declared capacity.
    UncheckedOverflow,
    /// Forward `strcpy` refuses an oversized source and matches classic output otherwise.
    ExtentEnforced,
    /// `sleep(2)` lasts as long as `sleep_ms(2000)`.
    SleepParity,
    /// A seeded generator serves 1000 `rand_s` calls.
    RandSupply,
    /// `strupr`/`strlwr` round-trip printable ASCII.
    CaseRoundTrip,
}

impl Property {
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::UncheckedOverflow => "strcpy_s",
            Self::ExtentEnforced => "strcpy",
            Self::SleepParity => "sleep",
            Self::RandSupply => "rand_s",
            Self::CaseRoundTrip => "strupr",
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::UncheckedOverflow => "unchecked_overflow",
            Self::ExtentEnforced => "extent_enforced",
            Self::SleepParity => "sleep_parity",
            Self::RandSupply => "rand_supply",
            Self::CaseRoundTrip => "case_round_trip",
        }
    }

    /// Runs the check.
    #[must_use]
    pub fn check(self) -> PropertyResult {
        let start = Instant::now();
        let (passed, details) = match self {
            Self::UncheckedOverflow => unchecked_overflow(),
            Self::ExtentEnforced => extent_enforced(),
            Self::SleepParity => sleep_parity(),
            Self::RandSupply => rand_supply(),
            Self::CaseRoundTrip => case_round_trip(),
        };
        PropertyResult {
            property: self,
            outcome: if passed { Outcome::Pass } else { Outcome::Fail },
            duration_ms: u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
            details,
        }
    }
}

/// Result of one property check.
#[derive(Debug, Clone, Serialize)]
pub struct PropertyResult {
    pub property: Property,
    pub outcome: Outcome,
    pub duration_ms: u64,
    pub details: serde_json::Value,
}

impl PropertyResult {
    #[must_use]
    pub fn passed(&self) -> bool {
        self.outcome == Outcome::Pass
    }

    /// The JSONL record for this result.
    #[must_use]
    pub fn to_log_entry(&self) -> LogEntry {
        let level = if self.passed() {
            LogLevel::Info
        } else {
            LogLevel::Error
        };
        LogEntry::new("", level, self.property.name())
            .with_mode(SELECTION.path.as_str())
            .with_symbol(self.property.symbol())
            .with_outcome(self.outcome)
            .with_duration_ms(self.duration_ms)
            .with_details(self.details.clone())
    }
}

/// Properties that apply to `path`. Sleep parity takes four seconds and
/// only runs on request.
#[must_use]
pub fn plan(path: CompatPath, with_sleep: bool) -> Vec<Property> {
    let mut props = vec![match path {
        CompatPath::Fallback => Property::UncheckedOverflow,
        CompatPath::Forward => Property::ExtentEnforced,
    }];
    if with_sleep {
        props.push(Property::SleepParity);
    }
    props.push(Property::RandSupply);
    props.push(Property::CaseRoundTrip);
    props
}

/// Runs every property in `props`, logging each result.
pub fn run_plan(props: &[Property], emitter: &mut LogEmitter) -> std::io::Result<Vec<PropertyResult>> {
    let mut results = Vec::with_capacity(props.len());
    for &prop in props {
        let result = prop.check();
        emitter.emit_entry(result.to_log_entry())?;
        results.push(result);
    }
    emitter.flush()?;
    Ok(results)
}

const SOURCE: &[u8] = b"twelve bytes\0";
const DECLARED: usize = 4;

fn unchecked_overflow() -> (bool, serde_json::Value) {
    let mut backing = [0xaau8; 32];
    let status = fallback::strcpy_s(&mut backing, DECLARED, SOURCE);
    let past_capacity = backing[DECLARED..SOURCE.len()]
        .iter()
        .zip(&SOURCE[DECLARED..])
        .all(|(a, b)| a == b);
    (
        status == Status::Ok && past_capacity,
        json!({
            "declared_capacity": DECLARED,
            "source_len": SOURCE.len(),
            "status": status.code(),
            "wrote_past_capacity": past_capacity,
        }),
    )
}

fn extent_enforced() -> (bool, serde_json::Value) {
    let mut small = [0u8; DECLARED];
    let refused = errno_of(&forward::strcpy(&mut small, SOURCE));

    let mut fits = [0x55u8; 16];
    let mut reference = [0x55u8; 16];
    let copied = errno_of(&forward::strcpy(&mut fits, SOURCE));
    classic::strcpy(&mut reference, SOURCE);

    (
        refused == ERANGE && small[0] == 0 && copied == EOK && fits == reference,
        json!({
            "extent": DECLARED,
            "refused_errno": refused,
            "fitting_copy_errno": copied,
            "fitting_copy_matches_classic": fits == reference,
        }),
    )
}

fn sleep_parity() -> (bool, serde_json::Value) {
    let start = Instant::now();
    let left = crtcompat::sleep(2);
    let by_seconds = start.elapsed();
    let start = Instant::now();
    crtcompat::sleep_ms(2000);
    let by_millis = start.elapsed();

    let drift = by_seconds.abs_diff(by_millis);
    (
        left == 0 && by_seconds >= Duration::from_secs(2) && drift < Duration::from_millis(500),
        json!({
            "seconds_ms": by_seconds.as_millis(),
            "millis_ms": by_millis.as_millis(),
            "drift_ms": drift.as_millis(),
            "shim": SELECTION.seconds_sleep_shim,
        }),
    )
}

const RAND_CALLS: usize = 1000;

fn rand_supply() -> (bool, serde_json::Value) {
    crtcompat::srand(1);
    let mut failures = 0usize;
    for _ in 0..RAND_CALLS {
        let mut value = 0u32;
        let ok = match SELECTION.path {
            CompatPath::Fallback => fallback::rand_s(&mut value).is_ok(),
            CompatPath::Forward => crtcompat_core::stdlib::rand_s(&mut value).is_ok(),
        };
        if !ok {
            failures += 1;
        }
    }
    let mut a = Rand::new(1);
    let mut b = Rand::new(1);
    let reproducible = (0..16).all(|_| a.next_value() == b.next_value());
    (
        failures == 0 && reproducible,
        json!({
            "calls": RAND_CALLS,
            "failures": failures,
            "reproducible": reproducible,
        }),
    )
}

const CASE_LEN: usize = 96;

fn case_round_trip() -> (bool, serde_json::Value) {
    let printable: Vec<u8> = (b' '..=b'~').collect();
    let lowercase: Vec<u8> = printable.iter().map(u8::to_ascii_lowercase).collect();
    let mut mismatches = Vec::new();

    for (label, sample) in [("printable", &printable), ("lowercase", &lowercase)] {
        let mut buf = [0u8; CASE_LEN];
        buf[..sample.len()].copy_from_slice(sample);
        let mut expected = buf;
        classic::strlwr(&mut expected);

        let ok = forward::strlwr(&mut buf).is_ok()
            && forward::strupr(&mut buf).is_ok()
            && forward::strlwr(&mut buf).is_ok();
        if !ok || buf != expected {
            mismatches.push(label);
        }
        if label == "lowercase" && buf[..sample.len()] != sample[..] {
            mismatches.push("lowercase_identity");
        }
    }
    (
        mismatches.is_empty(),
        json!({ "samples": 2, "mismatches": mismatches }),
    )
}
