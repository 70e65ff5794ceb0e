//! Errors raised at the device RPC boundary.

/// Classified failure of one device call.
///
/// The engine's behavior hinges on the first two classes: a connection
/// failure means the device or hop is offline, a protocol failure means the
/// device answered but could not serve the call. Everything else is
/// unclassified and propagates to the caller.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Endpoint unreachable or timed out.
    #[error("connection: {0}")]
    Connection(String),

    /// Device reached but returned an error status or error envelope.
    #[error("protocol (code {code}): {message}")]
    Protocol { code: i64, message: String },

    /// Response body was not valid JSON.
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The address could not be turned into a request URL.
    #[error("invalid URL: {0}")]
    Url(String),
}

impl ClientError {
    pub fn is_connection(&self) -> bool {
        matches!(self, ClientError::Connection(_))
    }

    pub fn is_protocol(&self) -> bool {
        matches!(self, ClientError::Protocol { .. })
    }
}

pub type ClientResult<T> = std::result::Result<T, ClientError>;
