//! Serializable view of the build-time selection.

use serde::Serialize;

use crtcompat::{SELECTION, Selection, UncheckedOp, gap_warnings, unchecked_calls};

/// What the build selected, plus the runtime gap policy.
#[derive(Debug, Clone, Serialize)]
pub struct SelectionReport {
    pub path: &'static str,
    pub remap_copies: bool,
    pub remap_scans: bool,
    pub seconds_sleep_shim: bool,
    pub inline_keyword: bool,
    pub gap_warnings: &'static str,
    /// Bounds-checked names served without a capacity check on this path.
    pub unchecked_symbols: Vec<&'static str>,
}

impl SelectionReport {
    #[must_use]
    pub fn from_selection(selection: &Selection) -> Self {
        let unchecked_symbols = if selection.path == crtcompat::CompatPath::Fallback {
            UncheckedOp::ALL
                .iter()
                .filter(|op| selection.remap_scans || **op != UncheckedOp::Scan)
                .map(|op| op.symbol())
                .collect()
        } else {
            Vec::new()
        };
        Self {
            path: selection.path.as_str(),
            remap_copies: selection.remap_copies,
            remap_scans: selection.remap_scans,
            seconds_sleep_shim: selection.seconds_sleep_shim,
            inline_keyword: selection.inline_keyword,
            gap_warnings: gap_warnings().as_str(),
            unchecked_symbols,
        }
    }

    /// Report for this build.
    #[must_use]
    pub fn current() -> Self {
        Self::from_selection(&SELECTION)
    }
}

/// Per-symbol counts of unchecked calls made so far in this process.
#[must_use]
pub fn gap_counts() -> serde_json::Value {
    UncheckedOp::ALL
        .iter()
        .filter_map(|&op| {
            let n = unchecked_calls(op);
            (n > 0).then(|| (op.symbol().to_string(), serde_json::Value::from(n)))
        })
        .collect::<serde_json::Map<_, _>>()
        .into()
}
