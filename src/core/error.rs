use thiserror::Error;

/// The domain error taxonomy for every clinic operation.
///
/// The three variants map directly to how the CLI boundary reacts to a
/// failure:
/// - `Validation` and `Conflict` are recoverable: the handler prints the
///   message and the process exits successfully.
/// - `Persistence` is fatal: the underlying store failed and the error is
///   surfaced verbatim, without retry.
#[derive(Debug, Error)]
pub enum ClinicError {
    /// A field was missing or malformed. Raised before any row is written.
    #[error("{0}")]
    Validation(String),

    /// The requested appointment slot (doctor, date, time) is already taken.
    #[error("{0}")]
    Conflict(String),

    /// The underlying SQLite store failed.
    #[error("storage error: {0}")]
    Persistence(#[from] rusqlite::Error),
}

impl ClinicError {
    /// Shorthand for building a `Validation` error from any message.
    pub fn validation(msg: impl Into<String>) -> Self {
        ClinicError::Validation(msg.into())
    }

    /// True for the errors a CLI handler should recover into a message
    /// rather than propagate.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ClinicError::Validation(_) | ClinicError::Conflict(_))
    }
}
