//! Error types shared across the rewriter crates

/// Result type alias using [`Error`]
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Main error type for the response rewriter
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration error at construction time
    #[error("configuration error: {0}")]
    Config(String),

    /// Content decoding failed; the response must not be sent
    #[error("unable to decode response body: {0}")]
    Decode(String),

    /// Hijack requested on a sink without the capability
    #[error("{0} does not support hijacking")]
    HijackUnsupported(&'static str),

    /// I/O error from the underlying sink or codec
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP assembly error
    #[error("HTTP error: {0}")]
    Http(#[from] http::Error),

    /// Internal error (should not happen in production)
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl std::fmt::Display) -> Self {
        Error::Config(msg.to_string())
    }

    /// Create a decode error
    pub fn decode(msg: impl std::fmt::Display) -> Self {
        Error::Decode(msg.to_string())
    }

    /// Create an internal error
    pub fn internal(msg: impl std::fmt::Display) -> Self {
        Error::Internal(msg.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::config("no valid filters");
        assert_eq!(err.to_string(), "configuration error: no valid filters");

        let err = Error::HijackUnsupported("RecordingSink");
        assert!(err.to_string().contains("does not support hijacking"));
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
