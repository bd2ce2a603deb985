//! Error types for the core library

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Validation(String),

    #[error("Unsupported file type: {0}")]
    UnsupportedFormat(String),

    #[error("{0}")]
    Generation(String),

    #[error("File not found: {0}")]
    ArtifactNotFound(String),

    #[error("Agent API credentials are not configured")]
    UpstreamConfig,

    #[error("{0}")]
    UpstreamTransport(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a Generation error from any encoder failure
    pub fn generation(source: impl std::fmt::Display) -> Self {
        Self::Generation(source.to_string())
    }

    /// Create an UpstreamTransport error from any network failure. The
    /// message carries every cause in the source chain, outermost first.
    pub fn transport(source: impl std::error::Error) -> Self {
        let mut message = source.to_string();
        let mut cause = source.source();
        while let Some(inner) = cause {
            message.push_str(": ");
            message.push_str(&inner.to_string());
            cause = inner.source();
        }
        Self::UpstreamTransport(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Error, Debug)]
    #[error("error decoding response body")]
    struct DecodeError(#[source] std::io::Error);

    #[test]
    fn test_transport_message_includes_causes() {
        let inner = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "connection closed before message completed");

        let err = Error::transport(DecodeError(inner));

        assert_eq!(
            err.to_string(),
            "error decoding response body: connection closed before message completed"
        );
    }

    #[test]
    fn test_transport_without_source() {
        let err = Error::transport(std::io::Error::new(std::io::ErrorKind::Other, "refused"));
        assert_eq!(err.to_string(), "refused");
    }
}
