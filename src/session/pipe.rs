use super::*;
use crate::protocol::Frame;
use crate::protocol::RawFrame;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::mpsc::unbounded_channel;

/// In-process client transport built on channels.
/// Lets a [`Connection`] run without a socket, e.g. for bots and tests.
pub struct Pipe;

/// Server-side read half of a [`Pipe`].
pub struct PipeReader(UnboundedReceiver<Result<RawFrame, TransportError>>);

/// Server-side write half of a [`Pipe`]. Frames are delivered as JSON.
pub struct PipeWriter(UnboundedSender<String>);

/// Client end of a [`Pipe`].
///
/// Dropping `upstream` ends the connection's read loop; dropping
/// `downstream` makes further writes fail as closed.
pub struct Remote {
    pub upstream: UnboundedSender<Result<RawFrame, TransportError>>,
    pub downstream: UnboundedReceiver<String>,
}

impl Pipe {
    pub fn open() -> (PipeReader, PipeWriter, Remote) {
        let (up_tx, up_rx) = unbounded_channel();
        let (down_tx, down_rx) = unbounded_channel();
        let remote = Remote {
            upstream: up_tx,
            downstream: down_rx,
        };
        (PipeReader(up_rx), PipeWriter(down_tx), remote)
    }
}

impl Remote {
    pub fn send(&self, frame: RawFrame) {
        let _ = self.upstream.send(Ok(frame));
    }
    /// Makes the connection's next read fail with `error`.
    pub fn fail(&self, error: TransportError) {
        let _ = self.upstream.send(Err(error));
    }
    /// Next frame written to this client, as JSON.
    pub async fn recv(&mut self) -> Option<serde_json::Value> {
        self.downstream
            .recv()
            .await
            .and_then(|json| serde_json::from_str(&json).ok())
    }
}

#[async_trait::async_trait]
impl Reader for PipeReader {
    async fn read(&mut self) -> Result<RawFrame, TransportError> {
        self.0.recv().await.unwrap_or(Err(TransportError::Closed))
    }
}

#[async_trait::async_trait]
impl Writer for PipeWriter {
    async fn write(&mut self, frame: &Frame) -> Result<(), TransportError> {
        let json = frame
            .to_json()
            .map_err(|e| TransportError::Io(e.to_string()))?;
        self.0.send(json).map_err(|_| TransportError::Closed)
    }
}
