//! Error types for the iControl SOAP layer

use bytes::Bytes;

use crate::soap::SoapFault;

/// Result type alias for SOAP operations
pub type Result<T> = std::result::Result<T, SoapError>;

/// Boxed cause carried by transport failures
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors returned by [`SoapClient::call`](crate::SoapClient::call) and the decode step.
///
/// Every variant is returned to the immediate caller; nothing is retried.
#[derive(Debug, thiserror::Error)]
pub enum SoapError {
    /// The request could not be serialized, nothing was sent
    #[error("failed to encode SOAP request: {0}")]
    Encoding(#[from] EncodeError),

    /// Connection, TLS, timeout or cancellation failure
    #[error("transport failure: {0}")]
    Transport(#[from] TransportError),

    /// The server answered with a status >= 400
    #[error("HTTP Status {status}: {}", String::from_utf8_lossy(.body))]
    HttpStatus { status: u16, body: Bytes },

    /// A 2xx body did not match the expected envelope shape
    #[error("failed to decode SOAP response: {source}")]
    Decoding {
        #[source]
        source: DecodeError,
        raw: Bytes,
    },

    /// Invalid client configuration (construction time only)
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

impl SoapError {
    /// HTTP status code of an [`SoapError::HttpStatus`] error
    pub fn status(&self) -> Option<u16> {
        match self {
            SoapError::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Raw response bytes attached to the error, if any
    pub fn raw_body(&self) -> Option<&Bytes> {
        match self {
            SoapError::HttpStatus { body, .. } => Some(body),
            SoapError::Decoding { raw, .. } => Some(raw),
            _ => None,
        }
    }

    /// Parses the SOAP Fault carried by an HTTP error body.
    ///
    /// Only evaluated on demand; `call` never decodes error bodies.
    pub fn fault(&self) -> Option<SoapFault> {
        match self {
            SoapError::HttpStatus { body, .. } => SoapFault::parse(body),
            _ => None,
        }
    }

    /// True when the call was aborted through its [`CallContext`](crate::CallContext)
    pub fn is_cancelled(&self) -> bool {
        matches!(self, SoapError::Transport(TransportError::Cancelled))
    }

    /// True for client-side timeouts and expired call deadlines
    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            SoapError::Transport(TransportError::DeadlineExceeded | TransportError::Timeout(_))
        )
    }

    pub(crate) fn decoding(source: DecodeError, raw: &[u8]) -> Self {
        SoapError::Decoding {
            source,
            raw: Bytes::copy_from_slice(raw),
        }
    }
}

/// Network-level failures
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The call context was cancelled before or during the request
    #[error("call cancelled")]
    Cancelled,

    /// The call context deadline expired before the response was read
    #[error("call deadline exceeded")]
    DeadlineExceeded,

    /// The HTTP client gave up waiting (dial or total timeout)
    #[error("request timed out: {0}")]
    Timeout(#[source] BoxError),

    /// DNS, TCP or TLS handshake failure
    #[error("connection failed: {0}")]
    Connect(#[source] BoxError),

    /// Any other failure while sending the request or reading the body
    #[error("HTTP request failed: {0}")]
    Request(#[source] BoxError),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout(Box::new(err))
        } else if err.is_connect() {
            TransportError::Connect(Box::new(err))
        } else {
            TransportError::Request(Box::new(err))
        }
    }
}

/// Serialization failures
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("invalid XML element name: {0:?}")]
    InvalidName(String),

    #[error("character {character:?} is not allowed in XML content of <{element}>")]
    InvalidCharacter { element: String, character: char },

    #[error("XML emitter error: {0}")]
    Emitter(#[from] xmltree::Error),
}

/// Response parsing failures
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("malformed XML: {0}")]
    Xml(#[from] xmltree::ParseError),

    #[error("Missing SOAP Envelope")]
    MissingEnvelope,

    #[error("Missing SOAP Body")]
    MissingBody,

    #[error("Missing {0} element in SOAP body")]
    MissingElement(String),

    #[error("Invalid {element} value: {value:?}")]
    InvalidValue { element: String, value: String },

    #[error("SOAP Fault in response: {0}")]
    Fault(SoapFault),
}

impl DecodeError {
    pub fn missing(element: &str) -> Self {
        DecodeError::MissingElement(element.to_string())
    }

    pub fn invalid(element: &str, value: &str) -> Self {
        DecodeError::InvalidValue {
            element: element.to_string(),
            value: value.to_string(),
        }
    }
}

/// Construction-time configuration failures
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid endpoint {endpoint:?}: {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    #[error("invalid header {0:?}")]
    InvalidHeader(String),

    #[error("invalid TLS settings: {0}")]
    Tls(String),

    #[error("cannot build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid YAML configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: String, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_status_display_includes_body() {
        let err = SoapError::HttpStatus {
            status: 401,
            body: Bytes::from_static(b"Authorization Required"),
        };
        assert_eq!(err.to_string(), "HTTP Status 401: Authorization Required");
        assert_eq!(err.status(), Some(401));
    }

    #[test]
    fn classification_helpers() {
        assert!(SoapError::from(TransportError::Cancelled).is_cancelled());
        assert!(SoapError::from(TransportError::DeadlineExceeded).is_timeout());
        assert!(!SoapError::from(TransportError::Cancelled).is_timeout());
    }
}
