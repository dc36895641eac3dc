//! Error types for the trip API client.
//!
//! # Design
//! Six kinds, one per step of response classification. `Server` keeps the
//! numeric status next to the human-readable message so callers (and the C
//! ABI) can branch on it without parsing text. `TransportError` is what a
//! `Transport` implementation reports; it folds into `TripError` through
//! `From`.

use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors returned by every trip operation.
#[derive(Debug, Error)]
pub enum TripError {
    /// The request URL could not be built, or the body could not be encoded.
    /// No network I/O was attempted.
    #[error("Invalid URL")]
    InvalidUrl,

    #[error("Network error: {0}")]
    Network(#[source] BoxError),

    /// Something came back, but it was not a well-formed HTTP response.
    #[error("Invalid response from server")]
    InvalidResponse,

    /// Non-2xx status. `message` is shown to users verbatim.
    #[error("{message}")]
    Server { status: u16, message: String },

    #[error("No data received from server")]
    NoData,

    #[error("Failed to decode response: {0}")]
    Decoding(#[from] serde_json::Error),
}

/// Fieldless tag for a `TripError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidUrl,
    Network,
    InvalidResponse,
    Server,
    NoData,
    Decoding,
}

impl TripError {
    pub fn server(status: u16) -> Self {
        TripError::Server {
            status,
            message: format!("Server returned status code {status}"),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            TripError::InvalidUrl => ErrorKind::InvalidUrl,
            TripError::Network(_) => ErrorKind::Network,
            TripError::InvalidResponse => ErrorKind::InvalidResponse,
            TripError::Server { .. } => ErrorKind::Server,
            TripError::NoData => ErrorKind::NoData,
            TripError::Decoding(_) => ErrorKind::Decoding,
        }
    }

    /// HTTP status for `Server` errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            TripError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Failure reported by a `Transport` before a usable response existed.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("invalid request url: {0}")]
    InvalidUrl(String),

    #[error("connection failed: {0}")]
    Connection(#[source] BoxError),

    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl From<TransportError> for TripError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::InvalidUrl(_) => TripError::InvalidUrl,
            TransportError::Connection(cause) => TripError::Network(cause),
            TransportError::MalformedResponse(_) => TripError::InvalidResponse,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_message_carries_status_code() {
        let err = TripError::server(404);
        assert_eq!(err.to_string(), "Server returned status code 404");
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.kind(), ErrorKind::Server);
    }

    #[test]
    fn fixed_descriptions() {
        assert_eq!(TripError::InvalidUrl.to_string(), "Invalid URL");
        assert_eq!(TripError::NoData.to_string(), "No data received from server");
        assert_eq!(
            TripError::InvalidResponse.to_string(),
            "Invalid response from server"
        );
    }

    #[test]
    fn transport_errors_fold_into_taxonomy() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset");
        let err: TripError = TransportError::Connection(Box::new(io)).into();
        assert_eq!(err.kind(), ErrorKind::Network);
        assert!(err.to_string().starts_with("Network error: "));

        let err: TripError = TransportError::MalformedResponse("garbage".into()).into();
        assert_eq!(err.kind(), ErrorKind::InvalidResponse);

        let err: TripError = TransportError::InvalidUrl("nope".into()).into();
        assert_eq!(err.kind(), ErrorKind::InvalidUrl);
    }
}
