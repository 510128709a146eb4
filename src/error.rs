use std::fmt;

use tokio_tungstenite::tungstenite;

use crate::gateway::signal::OpCode;

/// Failure to decode a signal frame. Never fatal to the event loop: the
/// offending frame is dropped.
#[derive(Debug)]
pub enum DecodeError {
    Malformed(serde_json::Error),
    MissingOp,
    UnknownOp(u64),
    MissingBody(OpCode),
    Body {
        op: OpCode,
        source: serde_json::Error,
    },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::Malformed(e) => write!(f, "malformed signal: {e}"),
            DecodeError::MissingOp => write!(f, "signal has no op"),
            DecodeError::UnknownOp(op) => write!(f, "unknown signal op {op}"),
            DecodeError::MissingBody(op) => write!(f, "{op:?} signal has no body"),
            DecodeError::Body { op, source } => write!(f, "invalid {op:?} body: {source}"),
        }
    }
}

impl std::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DecodeError::Malformed(e) => Some(e),
            DecodeError::Body { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Failure of a single connect/identify/ready attempt. The event loop
/// retries after a delay.
#[derive(Debug)]
pub enum HandshakeError {
    Dial(std::io::Error),
    Encode(serde_json::Error),
    Transport(tungstenite::Error),
    Closed,
    UnexpectedFrame,
    Decode(DecodeError),
    NotReady(OpCode),
    NoLogins,
}

impl fmt::Display for HandshakeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandshakeError::Dial(e) => write!(f, "dial failed: {e}"),
            HandshakeError::Encode(e) => write!(f, "failed to encode identify: {e}"),
            HandshakeError::Transport(e) => write!(f, "websocket error: {e}"),
            HandshakeError::Closed => write!(f, "connection closed before ready"),
            HandshakeError::UnexpectedFrame => write!(f, "expected a text frame"),
            HandshakeError::Decode(e) => write!(f, "bad ready signal: {e}"),
            HandshakeError::NotReady(op) => write!(f, "expected ready signal, got {op:?}"),
            HandshakeError::NoLogins => write!(f, "ready signal carries no logins"),
        }
    }
}

impl std::error::Error for HandshakeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HandshakeError::Dial(e) => Some(e),
            HandshakeError::Encode(e) => Some(e),
            HandshakeError::Transport(e) => Some(e),
            HandshakeError::Decode(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for HandshakeError {
    fn from(e: std::io::Error) -> Self {
        HandshakeError::Dial(e)
    }
}

impl From<tungstenite::Error> for HandshakeError {
    fn from(e: tungstenite::Error) -> Self {
        HandshakeError::Transport(e)
    }
}

impl From<DecodeError> for HandshakeError {
    fn from(e: DecodeError) -> Self {
        HandshakeError::Decode(e)
    }
}

/// Failure of a REST command.
#[derive(Debug)]
pub enum ApiError {
    Http(reqwest::Error),
    Status { status: u16, body: String },
    UnsupportedTransport(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Http(e) => write!(f, "HTTP error: {e}"),
            ApiError::Status { status, body } => write!(f, "server returned {status}: {body}"),
            ApiError::UnsupportedTransport(t) => {
                write!(f, "REST commands are not supported over {t}")
            }
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::Http(e)
    }
}
