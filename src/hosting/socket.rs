use crate::protocol::Frame;
use crate::protocol::RawFrame;
use crate::session::Reader;
use crate::session::TransportError;
use crate::session::Writer;
use actix_ws::Message;
use actix_ws::MessageStream;
use futures::StreamExt;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::mpsc::unbounded_channel;

/// Client transport over an actix WebSocket.
///
/// The message stream is bound to the worker that accepted it, so a local
/// task drains it and hands decoded frames to the [`SocketReader`].
pub struct Socket;

pub struct SocketReader(UnboundedReceiver<Result<RawFrame, TransportError>>);

pub struct SocketWriter(actix_ws::Session);

impl Socket {
    pub fn split(session: actix_ws::Session, stream: MessageStream) -> (SocketReader, SocketWriter) {
        let (tx, rx) = unbounded_channel();
        actix_web::rt::spawn(Self::drain(session.clone(), stream, tx));
        (SocketReader(rx), SocketWriter(session))
    }

    async fn drain(
        mut session: actix_ws::Session,
        mut stream: MessageStream,
        tx: UnboundedSender<Result<RawFrame, TransportError>>,
    ) {
        while let Some(msg) = stream.next().await {
            let frame = match msg {
                Ok(Message::Text(text)) => Self::decode(text.as_bytes()),
                Ok(Message::Binary(bytes)) => Self::decode(&bytes),
                Ok(Message::Ping(bytes)) => match session.pong(&bytes).await {
                    Ok(()) => continue,
                    Err(_) => break,
                },
                Ok(Message::Close(reason)) => {
                    log::debug!("[socket] client closed: {:?}", reason);
                    break;
                }
                Ok(_) => continue,
                Err(e) => Err(TransportError::Io(e.to_string())),
            };
            if tx.send(frame).is_err() {
                break;
            }
        }
    }

    fn decode(bytes: &[u8]) -> Result<RawFrame, TransportError> {
        serde_json::from_slice(bytes).map_err(|e| TransportError::Malformed(e.to_string()))
    }
}

#[async_trait::async_trait]
impl Reader for SocketReader {
    async fn read(&mut self) -> Result<RawFrame, TransportError> {
        self.0.recv().await.unwrap_or(Err(TransportError::Closed))
    }
}

#[async_trait::async_trait]
impl Writer for SocketWriter {
    async fn write(&mut self, frame: &Frame) -> Result<(), TransportError> {
        let json = frame
            .to_json()
            .map_err(|e| TransportError::Io(e.to_string()))?;
        self.0.text(json).await.map_err(|_| TransportError::Closed)
    }
}
