use thiserror::Error;

/// Unified error type for the entire finance-tracker-core library.
/// Every fallible public function returns `Result<T, CoreError>`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Storage / File ──────────────────────────────────────────────
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("File I/O error: {0}")]
    FileIO(String),

    // ── Input ───────────────────────────────────────────────────────
    #[error("Invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    #[error("Invalid amount '{0}'")]
    InvalidAmount(String),

    // ── Business Logic ──────────────────────────────────────────────
    #[error("Record validation failed: {0}")]
    ValidationError(String),

    #[error("Record not found: {0}")]
    RecordNotFound(String),
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::FileIO(e.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}

impl From<rust_decimal::Error> for CoreError {
    fn from(e: rust_decimal::Error) -> Self {
        CoreError::InvalidAmount(e.to_string())
    }
}
