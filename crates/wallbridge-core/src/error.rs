// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Wallbridge.
//
// The `Display` output of each variant is exactly the message handed back to
// the application layer in an error reply.

use thiserror::Error;

/// Top-level error type for all Wallbridge operations.
#[derive(Debug, Error)]
pub enum BridgeError {
    // -- Argument decoding --
    /// A required field was missing, null, or of the wrong type.
    #[error("{0}")]
    InvalidArgument(String),

    /// No handler is registered for the command name.
    #[error("method not implemented: {0}")]
    NotImplemented(String),

    // -- Storage --
    #[error("External storage is unavailable")]
    StorageUnavailable,

    // -- Image --
    #[error("image decoding failed: {0}")]
    Decode(String),

    #[error("image encoding failed: {0}")]
    Encode(String),

    // -- Platform bridge --
    /// Failure reported by a native collaborator; the message is passed through.
    #[error("{0}")]
    Platform(String),

    #[error("feature not available on this platform")]
    PlatformUnavailable,

    // -- Configuration / persistence --
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl BridgeError {
    /// Shorthand for building an [`BridgeError::InvalidArgument`].
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, BridgeError>;
