//! Structured JSONL log records for harness runs.
//!
//! Provides:
//! - [`LogEntry`]: one JSONL record with required and optional fields.
//! - [`LogEmitter`]: writes JSONL lines to a file, stdout, or any writer.
//! - [`validate_log_line`]: validates a single JSONL line against the schema.
//! - [`validate_log_file`]: validates an entire JSONL file.

use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;

// ---------------------------------------------------------------------------
// Log entry
// ---------------------------------------------------------------------------

/// Severity level for log entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

/// Verification outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Pass,
    Fail,
    Skip,
    Error,
}

const LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
const OUTCOMES: [&str; 4] = ["pass", "fail", "skip", "error"];
const MODES: [&str; 2] = ["forward", "fallback"];

/// Canonical structured log entry.
///
/// Required fields: `timestamp`, `trace_id`, `level`, `event`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    // Required
    pub timestamp: String,
    pub trace_id: String,
    pub level: LogLevel,
    pub event: String,

    // Optional
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_id: Option<String>,
    /// Compatibility path the run was built with (`forward` or `fallback`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<Outcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errno: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl LogEntry {
    /// Create a new log entry with required fields only.
    #[must_use]
    pub fn new(trace_id: impl Into<String>, level: LogLevel, event: impl Into<String>) -> Self {
        Self {
            timestamp: now_utc(),
            trace_id: trace_id.into(),
            level,
            event: event.into(),
            run_id: None,
            mode: None,
            symbol: None,
            outcome: None,
            errno: None,
            duration_ms: None,
            details: None,
        }
    }

    #[must_use]
    pub fn with_mode(mut self, mode: impl Into<String>) -> Self {
        self.mode = Some(mode.into());
        self
    }

    #[must_use]
    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    #[must_use]
    pub fn with_outcome(mut self, outcome: Outcome) -> Self {
        self.outcome = Some(outcome);
        self
    }

    #[must_use]
    pub fn with_errno(mut self, errno: i32) -> Self {
        self.errno = Some(errno);
        self
    }

    #[must_use]
    pub fn with_duration_ms(mut self, ms: u64) -> Self {
        self.duration_ms = Some(ms);
        self
    }

    /// Set free-form details.
    #[must_use]
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Serialize to a single JSONL line (no trailing newline).
    pub fn to_jsonl(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

// ---------------------------------------------------------------------------
// Log emitter
// ---------------------------------------------------------------------------

/// Writes structured JSONL log entries.
pub struct LogEmitter {
    writer: Box<dyn Write>,
    seq: u64,
    run_id: String,
}

impl LogEmitter {
    /// Create an emitter that writes to a file.
    pub fn to_file(path: &Path, run_id: &str) -> std::io::Result<Self> {
        let file = std::fs::File::create(path)?;
        Ok(Self::to_writer(std::io::BufWriter::new(file), run_id))
    }

    /// Create an emitter that writes to stdout.
    #[must_use]
    pub fn to_stdout(run_id: &str) -> Self {
        Self::to_writer(std::io::stdout(), run_id)
    }

    /// Create an emitter over any writer.
    #[must_use]
    pub fn to_writer(writer: impl Write + 'static, run_id: &str) -> Self {
        Self {
            writer: Box::new(writer),
            seq: 0,
            run_id: run_id.to_string(),
        }
    }

    #[must_use]
    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    /// Generate the next trace ID.
    fn next_trace_id(&mut self) -> String {
        self.seq += 1;
        format!("crtcompat::{}::{:03}", self.run_id, self.seq)
    }

    /// Emit a log entry with auto-generated trace_id and run_id.
    pub fn emit(&mut self, level: LogLevel, event: &str) -> std::io::Result<LogEntry> {
        let trace_id = self.next_trace_id();
        let mut entry = LogEntry::new(trace_id, level, event);
        entry.run_id = Some(self.run_id.clone());
        let line = serde_json::to_string(&entry).map_err(std::io::Error::other)?;
        writeln!(self.writer, "{line}")?;
        Ok(entry)
    }

    /// Emit a fully-populated log entry.
    pub fn emit_entry(&mut self, mut entry: LogEntry) -> std::io::Result<()> {
        if entry.trace_id.is_empty() {
            entry.trace_id = self.next_trace_id();
        }
        if entry.run_id.is_none() {
            entry.run_id = Some(self.run_id.clone());
        }
        let line = serde_json::to_string(&entry).map_err(std::io::Error::other)?;
        writeln!(self.writer, "{line}")
    }

    /// Flush the underlying writer.
    pub fn flush(&mut self) -> std::io::Result<()> {
        self.writer.flush()
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validation error for a log line.
#[derive(Debug)]
pub struct LogValidationError {
    pub line_number: usize,
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for LogValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "line {}: field '{}': {}",
            self.line_number, self.field, self.message
        )
    }
}

fn check_enum(
    obj: &serde_json::Map<String, serde_json::Value>,
    field: &str,
    allowed: &[&str],
    line_number: usize,
    errors: &mut Vec<LogValidationError>,
) {
    if let Some(value) = obj.get(field).and_then(|v| v.as_str())
        && !allowed.contains(&value)
    {
        errors.push(LogValidationError {
            line_number,
            field: field.to_string(),
            message: format!("invalid {field}: '{value}'"),
        });
    }
}

/// Validate a single JSONL line against the schema.
///
/// Returns the parsed entry if valid, or a list of validation errors.
pub fn validate_log_line(
    line: &str,
    line_number: usize,
) -> Result<LogEntry, Vec<LogValidationError>> {
    let mut errors = Vec::new();

    let value: serde_json::Value = match serde_json::from_str(line) {
        Ok(v) => v,
        Err(e) => {
            errors.push(LogValidationError {
                line_number,
                field: "<json>".to_string(),
                message: format!("invalid JSON: {e}"),
            });
            return Err(errors);
        }
    };

    let Some(obj) = value.as_object() else {
        errors.push(LogValidationError {
            line_number,
            field: "<root>".to_string(),
            message: "expected JSON object".to_string(),
        });
        return Err(errors);
    };

    for field in ["timestamp", "trace_id", "level", "event"] {
        if !obj.contains_key(field) {
            errors.push(LogValidationError {
                line_number,
                field: field.to_string(),
                message: "required field missing".to_string(),
            });
        }
    }

    check_enum(obj, "level", &LEVELS, line_number, &mut errors);
    check_enum(obj, "mode", &MODES, line_number, &mut errors);
    check_enum(obj, "outcome", &OUTCOMES, line_number, &mut errors);

    // A failed verification must say which symbol it was about.
    if obj.get("outcome").and_then(|v| v.as_str()) == Some("fail") && !obj.contains_key("symbol")
    {
        errors.push(LogValidationError {
            line_number,
            field: "symbol".to_string(),
            message: "failed outcomes must name a symbol".to_string(),
        });
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    serde_json::from_value(value).map_err(|e| {
        vec![LogValidationError {
            line_number,
            field: "<schema>".to_string(),
            message: e.to_string(),
        }]
    })
}

/// Validate an entire JSONL file. Blank lines are skipped.
///
/// Returns the number of valid entries and every error found.
pub fn validate_log_file(path: &Path) -> std::io::Result<(usize, Vec<LogValidationError>)> {
    let content = std::fs::read_to_string(path)?;
    let mut valid = 0;
    let mut errors = Vec::new();
    for (i, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match validate_log_line(line, i + 1) {
            Ok(_) => valid += 1,
            Err(mut errs) => errors.append(&mut errs),
        }
    }
    Ok((valid, errors))
}

fn now_utc() -> String {
    // UTC, millisecond resolution.
    let duration = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default();
    let secs = duration.as_secs();
    let millis = duration.subsec_millis();
    let (year, month, day) = civil_from_days(secs / 86_400);
    format!(
        "{year:04}-{month:02}-{day:02}T{:02}:{:02}:{:02}.{millis:03}Z",
        (secs % 86_400) / 3600,
        (secs % 3600) / 60,
        secs % 60,
    )
}

/// Days since 1970-01-01 to a proleptic Gregorian date.
fn civil_from_days(days: u64) -> (u64, u64, u64) {
    let z = days + 719_468;
    let era = z / 146_097;
    let doe = z % 146_097;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = yoe + era * 400 + u64::from(month <= 2);
    (year, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_entry_serializes_required_fields() {
        let entry = LogEntry::new("crtcompat::run-1::001", LogLevel::Info, "verify_start");
        let json = entry.to_jsonl().unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(parsed["timestamp"].is_string());
        assert_eq!(parsed["trace_id"], "crtcompat::run-1::001");
        assert_eq!(parsed["level"], "info");
        assert_eq!(parsed["event"], "verify_start");
        assert!(parsed.get("symbol").is_none());
    }

    #[test]
    fn optional_fields_round_trip_through_validation() {
        let entry = LogEntry::new("t::1", LogLevel::Warn, "property")
            .with_mode("fallback")
            .with_symbol("strcpy_s")
            .with_outcome(Outcome::Pass)
            .with_errno(0)
            .with_duration_ms(3)
            .with_details(serde_json::json!({"declared_capacity": 4}));
        let line = entry.to_jsonl().unwrap();
        let parsed = validate_log_line(&line, 1).unwrap();
        assert_eq!(parsed.symbol.as_deref(), Some("strcpy_s"));
        assert_eq!(parsed.outcome, Some(Outcome::Pass));
    }

    #[test]
    fn missing_required_fields_are_reported() {
        let errs = validate_log_line(r#"{"level":"info"}"#, 7).unwrap_err();
        let fields: Vec<&str> = errs.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, ["timestamp", "trace_id", "event"]);
        assert!(errs[0].to_string().starts_with("line 7:"));
    }

    #[test]
    fn bad_enums_are_reported() {
        let line = r#"{"timestamp":"x","trace_id":"t","level":"loud","event":"e","mode":"strict","outcome":"maybe"}"#;
        let errs = validate_log_line(line, 1).unwrap_err();
        let fields: Vec<&str> = errs.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, ["level", "mode", "outcome"]);
    }

    #[test]
    fn failed_outcome_needs_symbol() {
        let line = r#"{"timestamp":"x","trace_id":"t","level":"error","event":"e","outcome":"fail"}"#;
        let errs = validate_log_line(line, 1).unwrap_err();
        assert_eq!(errs[0].field, "symbol");
    }

    #[test]
    fn non_object_and_bad_json_rejected() {
        assert_eq!(validate_log_line("[1,2]", 1).unwrap_err()[0].field, "<root>");
        assert_eq!(validate_log_line("{", 1).unwrap_err()[0].field, "<json>");
    }

    #[test]
    fn emitter_numbers_trace_ids() {
        let path = std::env::temp_dir().join(format!("crtcompat-log-{}.jsonl", std::process::id()));
        {
            let mut emitter = LogEmitter::to_file(&path, "unit").unwrap();
            let first = emitter.emit(LogLevel::Info, "a").unwrap();
            assert_eq!(first.trace_id, "crtcompat::unit::001");
            emitter
                .emit_entry(LogEntry::new("", LogLevel::Info, "b").with_outcome(Outcome::Skip))
                .unwrap();
            emitter.flush().unwrap();
        }
        let (valid, errors) = validate_log_file(&path).unwrap();
        assert_eq!(valid, 2);
        assert!(errors.is_empty());
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("crtcompat::unit::002"));
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn civil_dates() {
        assert_eq!(civil_from_days(0), (1970, 1, 1));
        assert_eq!(civil_from_days(59), (1970, 3, 1));
        assert_eq!(civil_from_days(11_016), (2000, 2, 29));
        assert_eq!(civil_from_days(19_723), (2024, 1, 1));
    }
}
