use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::DecodeError;
use crate::models::{Event, Login};

/// Opcodes for event stream signals.
pub mod opcode {
    pub const EVENT: u64 = 0;
    pub const PING: u64 = 1;
    pub const PONG: u64 = 2;
    pub const IDENTIFY: u64 = 3;
    pub const READY: u64 = 4;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpCode {
    Event,
    Ping,
    Pong,
    Identify,
    Ready,
}

impl OpCode {
    pub fn from_code(code: u64) -> Option<Self> {
        match code {
            opcode::EVENT => Some(OpCode::Event),
            opcode::PING => Some(OpCode::Ping),
            opcode::PONG => Some(OpCode::Pong),
            opcode::IDENTIFY => Some(OpCode::Identify),
            opcode::READY => Some(OpCode::Ready),
            _ => None,
        }
    }

    pub fn code(self) -> u64 {
        match self {
            OpCode::Event => opcode::EVENT,
            OpCode::Ping => opcode::PING,
            OpCode::Pong => opcode::PONG,
            OpCode::Identify => opcode::IDENTIFY,
            OpCode::Ready => opcode::READY,
        }
    }
}

/// IDENTIFY payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identify {
    pub token: String,
}

/// READY payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ready {
    #[serde(default)]
    pub logins: Vec<Login>,
}

/// A decoded signal. The body variant is fixed by the op.
#[derive(Debug, Clone, PartialEq)]
pub enum Signal {
    Event(Event),
    Ping,
    Pong,
    Identify(Identify),
    Ready(Ready),
}

impl Signal {
    pub fn op(&self) -> OpCode {
        match self {
            Signal::Event(_) => OpCode::Event,
            Signal::Ping => OpCode::Ping,
            Signal::Pong => OpCode::Pong,
            Signal::Identify(_) => OpCode::Identify,
            Signal::Ready(_) => OpCode::Ready,
        }
    }

    /// Encode as a `{"op": n, "body": ...}` text frame payload. PING and
    /// PONG carry no body.
    pub fn encode(&self) -> Result<String, serde_json::Error> {
        let op = self.op().code();
        match self {
            Signal::Event(event) => encode_frame(op, Some(event)),
            Signal::Identify(identify) => encode_frame(op, Some(identify)),
            Signal::Ready(ready) => encode_frame(op, Some(ready)),
            Signal::Ping | Signal::Pong => encode_frame::<()>(op, None),
        }
    }

    /// Parse and fully decode a text frame.
    pub fn decode(text: &str) -> Result<Self, DecodeError> {
        SignalFrame::parse(text)?.decode()
    }
}

#[derive(Serialize)]
struct OutFrame<'a, T> {
    op: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    body: Option<&'a T>,
}

fn encode_frame<T: Serialize>(op: u64, body: Option<&T>) -> Result<String, serde_json::Error> {
    serde_json::to_string(&OutFrame { op, body })
}

#[derive(Deserialize)]
struct Envelope {
    #[serde(default)]
    op: Option<u64>,
    #[serde(default)]
    body: Option<serde_json::Value>,
}

/// First decoding stage: the op has been read, the body is still raw JSON.
#[derive(Debug, Clone)]
pub struct SignalFrame {
    pub code: u64,
    pub body: Option<serde_json::Value>,
}

impl SignalFrame {
    pub fn parse(text: &str) -> Result<Self, DecodeError> {
        let envelope: Envelope = serde_json::from_str(text).map_err(DecodeError::Malformed)?;
        let code = envelope.op.ok_or(DecodeError::MissingOp)?;
        Ok(Self {
            code,
            body: envelope.body,
        })
    }

    pub fn op(&self) -> Result<OpCode, DecodeError> {
        OpCode::from_code(self.code).ok_or(DecodeError::UnknownOp(self.code))
    }

    /// Second decoding stage: pick the body schema by op.
    pub fn decode(self) -> Result<Signal, DecodeError> {
        let op = self.op()?;
        decode_body(op, self.body)
    }
}

pub fn decode_body(op: OpCode, body: Option<serde_json::Value>) -> Result<Signal, DecodeError> {
    match op {
        OpCode::Event => body_as(op, body).map(Signal::Event),
        OpCode::Ping => Ok(Signal::Ping),
        OpCode::Pong => Ok(Signal::Pong),
        OpCode::Identify => body_as(op, body).map(Signal::Identify),
        OpCode::Ready => body_as(op, body).map(Signal::Ready),
    }
}

fn body_as<T: DeserializeOwned>(
    op: OpCode,
    body: Option<serde_json::Value>,
) -> Result<T, DecodeError> {
    let body = body.ok_or(DecodeError::MissingBody(op))?;
    serde_json::from_value(body).map_err(|source| DecodeError::Body { op, source })
}
