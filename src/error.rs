//! Error types for rowgate
//!
//! Provides a unified error type for all operations.

use std::time::Duration;

use thiserror::Error;

/// Result type alias using StoreError
pub type Result<T> = std::result::Result<T, StoreError>;

/// Unified error type for rowgate operations
///
/// Every failure is scoped to the invoking call; there is no fatal or
/// process-level category. A missing row is not an error: single-row
/// gets resolve to `Ok(None)` instead.
#[derive(Debug, Error)]
pub enum StoreError {
    // -------------------------------------------------------------------------
    // Transport Errors
    // -------------------------------------------------------------------------
    /// Any failure reported by the underlying RPC call. Surfaced to the
    /// caller unmodified, never retried internally.
    #[error("Transport error: {0}")]
    Transport(String),

    // -------------------------------------------------------------------------
    // Pool Errors
    // -------------------------------------------------------------------------
    #[error("Connection pool exhausted after {timeout:?}")]
    PoolExhausted { timeout: Duration },

    #[error("Connection pool is shut down")]
    PoolClosed,

    // -------------------------------------------------------------------------
    // Serialization Errors
    // -------------------------------------------------------------------------
    #[error("Serialization error: {0}")]
    Serialization(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl StoreError {
    /// Wrap a transport-level failure, preserving its message verbatim
    pub fn transport(err: impl std::fmt::Display) -> Self {
        StoreError::Transport(err.to_string())
    }
}
