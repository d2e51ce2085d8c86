use crate::protocol::Frame;
use crate::protocol::RawFrame;

/// Failures of the client transport.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransportError {
    /// The peer is gone or the connection was already closed.
    #[error("connection closed")]
    Closed,
    /// A message arrived that is not a frame envelope.
    #[error("malformed frame: {0}")]
    Malformed(String),
    #[error("transport failure: {0}")]
    Io(String),
}

/// Read half of a client connection.
#[async_trait::async_trait]
pub trait Reader: Send {
    /// Blocks until the next frame arrives. Returns [`TransportError::Closed`]
    /// once the connection has ended.
    async fn read(&mut self) -> Result<RawFrame, TransportError>;
}

/// Write half of a client connection.
#[async_trait::async_trait]
pub trait Writer: Send {
    async fn write(&mut self, frame: &Frame) -> Result<(), TransportError>;
}
