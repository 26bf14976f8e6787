//! Error types for the pastebin service
//!
//! Provides a unified error type for all operations. Lookups of unknown or
//! expired ids are not errors: they surface as `Option`/`bool`.

use thiserror::Error;

/// Result type alias using PasteError
pub type Result<T> = std::result::Result<T, PasteError>;

/// Unified error type for pastebin operations
#[derive(Debug, Error)]
pub enum PasteError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Store Errors
    // -------------------------------------------------------------------------
    #[error("No free id found after {attempts} attempts")]
    ExhaustedIdSpace { attempts: usize },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // -------------------------------------------------------------------------
    // Negotiation Errors
    // -------------------------------------------------------------------------
    #[error("Not acceptable: no supported representation matches")]
    NotAcceptable,

    // -------------------------------------------------------------------------
    // Network Errors
    // -------------------------------------------------------------------------
    #[error("Network error: {0}")]
    Network(String),

    #[error("Protocol error: {0}")]
    Protocol(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}
