use super::*;
use serde::Deserialize;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Envelope exchanged between clients, connection actors, and the room bus.
/// Wire shape: `{"command": ..., "status": ..., "data": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame<D = Payload> {
    pub command: Command,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub data: D,
}

/// A frame as read off the client transport, payload not yet decoded.
pub type RawFrame = Frame<Value>;

impl<D> Frame<D> {
    pub fn new(command: Command, data: D) -> Self {
        Self {
            command,
            status: Status::Ok,
            data,
        }
    }
    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }
    /// Replaces the payload, keeping command and status.
    pub fn with<E>(self, data: E) -> Frame<E> {
        Frame {
            command: self.command,
            status: self.status,
            data,
        }
    }
}

impl<D: Serialize> Frame<D> {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl Frame<Value> {
    /// Decodes the raw payload into a concrete shape.
    pub fn parse<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        T::deserialize(&self.data)
    }
    /// Decodes the client request this frame carries. No payload is an empty request.
    pub fn request(&self) -> Result<Move, serde_json::Error> {
        match self.data {
            Value::Null => Ok(Move::default()),
            _ => self.parse(),
        }
    }
    /// Decodes the payload into the shape expected for this frame's command.
    pub fn typed(self) -> Frame<Payload> {
        let payload = Payload::decode(self.command, self.data.clone());
        self.with(payload)
    }
}

impl Frame<Payload> {
    /// Notice that this player has logged in on another connection.
    pub fn login_repeat() -> Self {
        Self::new(Command::LoginRepeat, Payload::Empty).with_status(Status::DuplicateLogin)
    }
    /// Error acknowledgement for a request the session could not process.
    pub fn error_ack(code: ErrorCode, error: impl std::fmt::Display) -> Self {
        Self::new(Command::ErrorAck, Payload::Ack(Ack::new(code, error))).with_status(Status::Error)
    }
    pub fn member(member: Member) -> Self {
        Self::new(Command::MemberInfo, Payload::Member(member))
    }
}

impl std::fmt::Display for Frame<Payload> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} ({:?})", self.command, self.status)
    }
}
