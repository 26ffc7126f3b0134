//! Error types for the proxy server
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Proxy Error Enum ==
/// Unified error type for the proxy server.
#[derive(Error, Debug)]
pub enum ProxyError {
    /// Request line missing its method, target, or version
    #[error("Malformed request line: {0:?}")]
    MalformedRequestLine(String),

    /// Header line with no parseable name or value
    #[error("Malformed header: {0:?}")]
    MalformedHeader(String),

    /// Request target with no path component or an unusable port
    #[error("Malformed target: {0:?}")]
    MalformedTarget(String),

    /// Connection to the origin server could not be established
    #[error("Origin unreachable: {host}:{port}")]
    OriginUnreachable {
        host: String,
        port: u16,
        #[source]
        source: std::io::Error,
    },

    /// Read or write failure on a client or origin socket
    #[error("Socket I/O error")]
    Io(#[from] std::io::Error),
}

impl ProxyError {
    // == Offending Token ==
    /// Returns the offending token to embed in a client-visible error
    /// page, or None when the failure produces no response at all.
    pub fn cause_token(&self) -> Option<&str> {
        match self {
            ProxyError::MalformedRequestLine(token)
            | ProxyError::MalformedHeader(token)
            | ProxyError::MalformedTarget(token) => Some(token),
            ProxyError::OriginUnreachable { .. } | ProxyError::Io(_) => None,
        }
    }
}

// == Result Type Alias ==
/// Convenience Result type for the proxy server.
pub type Result<T> = std::result::Result<T, ProxyError>;
