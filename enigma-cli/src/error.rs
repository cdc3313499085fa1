//! CLI error types

use enigma_core::{ConfigurationError, EngineError, KeyFileError};
use thiserror::Error;

/// Everything that can stop a CLI command.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// The machine key is invalid.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// An engine failed and no fallback applied.
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// A key or metadata file could not be used.
    #[error(transparent)]
    KeyFile(#[from] KeyFileError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The ciphertext does not match its metadata.
    #[error("Ciphertext hash does not match metadata hash. The file may be corrupt or tampered with.")]
    HashMismatch,

    /// The ciphertext length differs from the one recorded in its metadata.
    #[error("Ciphertext has {actual} characters but its metadata records {expected}.")]
    LengthMismatch {
        /// Length recorded at encryption.
        expected: usize,
        /// Length of the file being decrypted.
        actual: usize,
    },
}

/// Result type for CLI operations
pub(crate) type CliResult<T> = Result<T, CliError>;
