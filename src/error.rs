//! Error types for roslink
//!
//! Provides a unified error type for all operations.
//!
//! A router-side command failure (`!trap`) is *not* an error at the
//! executor level: it comes back as a [`CommandResult`] with an error
//! outcome. Only [`CommandResult::into_result`] and the endpoint helpers in
//! [`crate::api`] turn it into [`RosError::Trap`].
//!
//! [`CommandResult`]: crate::protocol::CommandResult
//! [`CommandResult::into_result`]: crate::protocol::CommandResult::into_result

use std::io;

use thiserror::Error;

/// Result type alias using RosError
pub type Result<T> = std::result::Result<T, RosError>;

/// Unified error type for roslink operations
#[derive(Debug, Error)]
pub enum RosError {
    // -------------------------------------------------------------------------
    // Connection Errors
    // -------------------------------------------------------------------------
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Not connected")]
    NotConnected,

    #[error("TLS error: {0}")]
    Tls(String),

    // -------------------------------------------------------------------------
    // Protocol Errors
    // -------------------------------------------------------------------------
    #[error("Protocol error: unexpected end of stream")]
    UnexpectedEof,

    #[error("Protocol error: {0}")]
    Protocol(String),

    // -------------------------------------------------------------------------
    // Authentication Errors
    // -------------------------------------------------------------------------
    #[error("Authentication failed: {0}")]
    Auth(String),

    // -------------------------------------------------------------------------
    // Timeout
    // -------------------------------------------------------------------------
    #[error("Timed out waiting for the router")]
    Timeout,

    // -------------------------------------------------------------------------
    // Command Errors (raised by endpoint helpers, never by execute)
    // -------------------------------------------------------------------------
    #[error("Command failed: {0}")]
    Trap(String),

    #[error("Not found: {0}")]
    NotFound(String),

    // -------------------------------------------------------------------------
    // Serialization Errors
    // -------------------------------------------------------------------------
    #[error("Serialization error: {0}")]
    Serialization(String),

    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(io::Error),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<io::Error> for RosError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::UnexpectedEof => RosError::UnexpectedEof,
            // Unix reports an expired SO_RCVTIMEO as WouldBlock, Windows as TimedOut
            io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut => RosError::Timeout,
            _ => RosError::Io(err),
        }
    }
}
