use super::*;
use crate::GameId;
use crate::HANDOFF_CAPACITY;
use crate::QUEUE_CAPACITY;
use crate::protocol::Command;
use crate::protocol::ErrorCode;
use crate::protocol::Frame;
use crate::protocol::Payload;
use crate::protocol::RawFrame;
use crate::protocol::Status;
use crate::settlement::Ledger;
use crate::settlement::Reconciler;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::sync::mpsc::Receiver;
use tokio::sync::mpsc::Sender;
use tokio::sync::mpsc::channel;
use tokio_util::sync::CancellationToken;

/// Collaborators a connection is built with.
#[derive(Clone)]
pub struct Services {
    pub ledger: Arc<dyn Ledger>,
    pub precheck: Arc<dyn Precheck>,
    pub validator: Option<Arc<dyn Validator>>,
    pub game_id: GameId,
}

/// Actor owning one player's session.
///
/// Runs two tasks over the client transport:
///
/// - the delivery pump takes frames from the room bus, rewrites them through
///   the [`Dispatcher`], and writes them to the client
/// - the accept pump reads client frames, validates and pre-checks them, and
///   hands them to the room bus one at a time
///
/// Cancellation stops delivery at once. Accepting stops when the transport
/// closes, which also closes the channel the room bus receives from.
pub struct Connection {
    id: String,
    session: Arc<Mutex<Session>>,
    services: Services,
    cancel: CancellationToken,
}

impl Connection {
    pub fn spawn<R, W>(reader: R, writer: W, services: Services) -> Handle
    where
        R: Reader + 'static,
        W: Writer + 'static,
    {
        let id = uuid::Uuid::now_v7().to_string();
        let (inbox_tx, inbox_rx) = channel::<Frame>(QUEUE_CAPACITY);
        let (outbox_tx, outbox_rx) = channel::<Frame>(HANDOFF_CAPACITY);
        let cancel = CancellationToken::new();
        let dispatcher = Dispatcher::new(Reconciler::new(
            services.ledger.clone(),
            services.game_id,
        ));
        let connection = Arc::new(Self {
            id: id.clone(),
            session: Arc::new(Mutex::new(Session::new(id.clone()))),
            services,
            cancel: cancel.clone(),
        });
        log::info!("[actor {}] connected", id);
        tokio::spawn(connection.clone().deliver(writer, inbox_rx, dispatcher));
        tokio::spawn(connection.accept(reader, outbox_tx, inbox_tx.clone()));
        Handle {
            id,
            sender: inbox_tx,
            receiver: outbox_rx,
            cancel,
        }
    }
}

impl Connection {
    async fn deliver<W: Writer>(
        self: Arc<Self>,
        mut writer: W,
        mut inbox: Receiver<Frame>,
        dispatcher: Dispatcher,
    ) {
        loop {
            tokio::select! {
                biased;
                _ = self.cancel.cancelled() => break,
                frame = inbox.recv() => match frame {
                    None => break,
                    Some(frame) if frame.status == Status::DuplicateLogin => {
                        self.emit(&mut writer, &Frame::login_repeat()).await;
                    }
                    Some(mut frame) => {
                        let follow = {
                            let mut session = self.session.lock().await;
                            dispatcher.dispatch(&mut session, &mut frame).await
                        };
                        self.emit(&mut writer, &frame).await;
                        if let Some(follow) = follow {
                            self.emit(&mut writer, &follow).await;
                        }
                    }
                },
            }
        }
        log::debug!("[actor {}] delivery stopped", self.id);
    }

    async fn emit<W: Writer>(&self, writer: &mut W, frame: &Frame) {
        if self.cancel.is_cancelled() {
            return;
        }
        match writer.write(frame).await {
            Ok(()) => {}
            Err(TransportError::Closed) => {
                log::info!("[actor {}] transport closed on write", self.id);
                self.cancel.cancel();
            }
            Err(e) => log::warn!("[actor {}] dropped {}: {}", self.id, frame, e),
        }
    }

    async fn accept<R: Reader>(
        self: Arc<Self>,
        mut reader: R,
        outbox: Sender<Frame>,
        inbox: Sender<Frame>,
    ) {
        loop {
            let raw = match reader.read().await {
                Ok(raw) => raw,
                Err(TransportError::Closed) => break,
                Err(e) => {
                    log::warn!("[actor {}] read failed: {}", self.id, e);
                    self.reply(&inbox, Frame::error_ack(ErrorCode::ServerError, e))
                        .await;
                    continue;
                }
            };
            if !self.validate(&raw).await {
                self.reply(&inbox, Frame::login_repeat()).await;
                continue;
            }
            let verdict = {
                let mut session = self.session.lock().await;
                self.services.precheck.check(&mut session, &raw).await
            };
            match verdict {
                Ok(Verdict::Forward) => {}
                Ok(Verdict::Handled(Some(answer))) => {
                    self.reply(&inbox, answer).await;
                    continue;
                }
                Ok(Verdict::Handled(None)) => continue,
                Err(e) => {
                    log::warn!("[actor {}] {} refused: {}", self.id, raw.command, e);
                    if let Some(code) = e.code() {
                        self.reply(&inbox, Frame::error_ack(code, e)).await;
                    }
                    continue;
                }
            }
            let request = match raw.request() {
                Ok(request) => request,
                Err(e) => {
                    log::debug!("[actor {}] ignored {}: {}", self.id, raw.command, e);
                    continue;
                }
            };
            let frame = Frame::new(raw.command, Payload::Move(request)).with_status(raw.status);
            if outbox.send(frame).await.is_err() {
                log::debug!("[actor {}] room bus went away", self.id);
                break;
            }
        }
        self.services
            .precheck
            .leave(&*self.session.lock().await)
            .await;
        log::info!("[actor {}] disconnected", self.id);
    }

    /// Duplicate-login check. Login frames and unavailable validators pass.
    async fn validate(&self, raw: &RawFrame) -> bool {
        let Some(validator) = &self.services.validator else {
            return true;
        };
        if raw.command == Command::Login {
            return true;
        }
        let ticket = self.session.lock().await.ticket(self.services.game_id);
        match validator.validate(&ticket).await {
            Ok(valid) => valid,
            Err(e) => {
                log::warn!("[actor {}] {}", self.id, e);
                true
            }
        }
    }

    /// Queues a frame for this client behind anything the room already sent.
    async fn reply(&self, inbox: &Sender<Frame>, frame: Frame) {
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => {}
            _ = inbox.send(frame) => {}
        }
    }
}

/// The room bus's grip on a [`Connection`].
pub struct Handle {
    id: String,
    sender: Sender<Frame>,
    receiver: Receiver<Frame>,
    cancel: CancellationToken,
}

impl Handle {
    pub fn id(&self) -> &str {
        &self.id
    }
    /// Channel for frames destined to this client.
    pub fn send(&self) -> Sender<Frame> {
        self.sender.clone()
    }
    /// Frames this client sent, destined to the room bus.
    /// Yields `None` once the client transport has closed.
    pub fn receive(&mut self) -> &mut Receiver<Frame> {
        &mut self.receiver
    }
    /// Stops delivery to the client. Idempotent. The transport itself is
    /// left for its owner to close.
    pub fn close(&self) {
        self.cancel.cancel();
    }
    pub fn is_closed(&self) -> bool {
        self.cancel.is_cancelled()
    }
}
