use thiserror::Error;

/// Failures of a harness run.
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{failed} of {total} properties failed: {names}")]
    PropertiesFailed {
        failed: usize,
        total: usize,
        names: String,
    },
}
