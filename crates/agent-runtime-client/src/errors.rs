/// Errors raised by an agent runtime invocation.
///
/// Per-fragment problems are never errors; malformed fragments degrade to
/// passthrough text in the interpreter. This taxonomy covers the invocation
/// itself, with kinds kept as structured variants so callers can report them
/// without string matching.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvokeError {
    /// Missing or unusable configuration.
    #[error("config error: {0}")]
    Config(String),
    /// The runtime rejected the caller's credentials.
    #[error("authentication rejected (status {status}): {message}")]
    Auth { status: u16, message: String },
    /// The invocation timeout elapsed.
    #[error("invocation timed out after {seconds}s")]
    Timeout { seconds: u64 },
    /// Connection or stream I/O failed.
    #[error("transport error: {message}")]
    Transport { message: String },
    /// The runtime reported a failure for the invocation.
    #[error("runtime failure (status {status}): {message}")]
    Remote { status: u16, message: String },
}

impl InvokeError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an authentication error.
    pub fn auth(status: u16, message: impl Into<String>) -> Self {
        Self::Auth {
            status,
            message: message.into(),
        }
    }

    /// Creates a timeout error.
    pub fn timeout(seconds: u64) -> Self {
        Self::Timeout { seconds }
    }

    /// Creates a transport error.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Creates a remote-reported error.
    pub fn remote(status: u16, message: impl Into<String>) -> Self {
        Self::Remote {
            status,
            message: message.into(),
        }
    }

    /// Short kind label used by the failure banner.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Config(_) => "config",
            Self::Auth { .. } => "auth",
            Self::Timeout { .. } => "timeout",
            Self::Transport { .. } => "transport",
            Self::Remote { .. } => "remote",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_labels_match_variants() {
        assert_eq!(InvokeError::config("x").kind(), "config");
        assert_eq!(InvokeError::auth(401, "x").kind(), "auth");
        assert_eq!(InvokeError::timeout(300).kind(), "timeout");
        assert_eq!(InvokeError::transport("x").kind(), "transport");
        assert_eq!(InvokeError::remote(500, "x").kind(), "remote");
    }

    #[test]
    fn display_carries_status_and_message() {
        let err = InvokeError::auth(403, "key revoked");
        assert_eq!(
            err.to_string(),
            "authentication rejected (status 403): key revoked"
        );
    }
}
