use serde::Deserialize;
use serde::Serialize;

/// Error codes reported to clients in an [`Ack`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    ServerError,
    Unauthorized,
}

/// Acknowledgement of a client request that could not be processed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ack {
    pub code: ErrorCode,
    pub message: String,
}

impl Ack {
    pub fn new(code: ErrorCode, message: impl std::fmt::Display) -> Self {
        Self {
            code,
            message: message.to_string(),
        }
    }
}
