use thiserror::Error;

/// Application-level error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Ledger read errors
    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Address parsing errors
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// Filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic error with message
    #[error("{0}")]
    Message(String),
}

/// Result type alias for application errors
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Check if error means the ledger could not be reached at all
    pub fn is_unavailable(&self) -> bool {
        matches!(self, AppError::Ledger(LedgerError::Unavailable(_)) | AppError::Ledger(LedgerError::Io(_)))
    }

    /// Check if error is a not found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::Ledger(LedgerError::NotFound(_)))
    }

    /// Process exit code for the binary
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::Config(_) | AppError::InvalidAddress(_) => 2,
            AppError::Ledger(_) | AppError::Io(_) => 4,
            _ => 1,
        }
    }
}

/// Errors raised by a ledger reader for a single query
#[derive(Error, Debug)]
pub enum LedgerError {
    /// The ledger (or its snapshot) could not be reached
    #[error("Ledger unavailable: {0}")]
    Unavailable(String),

    /// The query has no result yet
    #[error("No result for query: {0}")]
    NotFound(String),

    /// The query returned something that is not a raw value
    #[error("Malformed result for {query}: {reason}")]
    Malformed { query: String, reason: String },

    /// Filesystem error while reading a snapshot
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parse error while reading a snapshot
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl LedgerError {
    /// Missing results are expected while a tanda is forming; everything else is a failure
    pub fn is_missing(&self) -> bool {
        matches!(self, LedgerError::NotFound(_))
    }
}
