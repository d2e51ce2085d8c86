use crate::QUEUE_CAPACITY;
use crate::TableId;
use crate::protocol::Command;
use crate::protocol::Frame;
use crate::protocol::Payload;
use crate::session::Handle;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::sync::mpsc::Sender;
use tokio::sync::mpsc::error::TrySendError;

/// A live connection and the table it is watching, if any.
struct Occupant {
    sender: Sender<Frame>,
    table: Option<TableId>,
}

/// Registry of live connections on this gateway.
///
/// Admitted connections are drained until their client goes away.
/// `watch_table` and `sit` place a connection at a table, `exit` takes it
/// back to the lobby; the connection itself stays open either way. Frames
/// pushed in from the room service are delivered to one connection, one
/// table, or every connection.
#[derive(Default)]
pub struct Lobby {
    occupants: RwLock<HashMap<String, Occupant>>,
}

impl Lobby {
    /// Registers a connection and drains its requests in the background.
    pub async fn admit(self: Arc<Self>, mut handle: Handle) {
        let id = handle.id().to_string();
        let occupant = Occupant {
            sender: handle.send(),
            table: None,
        };
        self.occupants.write().await.insert(id.clone(), occupant);
        log::info!("[lobby] admitted {}", id);
        tokio::spawn(async move {
            while let Some(frame) = handle.receive().recv().await {
                self.route(&id, &frame).await;
            }
            handle.close();
            self.occupants.write().await.remove(&id);
            log::info!("[lobby] released {}", id);
        });
    }

    async fn route(&self, id: &str, frame: &Frame) {
        let table = match (frame.command, &frame.data) {
            (Command::WatchTable | Command::Sit, Payload::Move(m)) => Some(m.id),
            (Command::Exit, _) => None,
            _ => {
                log::debug!("[lobby] {} sent {}", id, frame);
                return;
            }
        };
        if let Some(occupant) = self.occupants.write().await.get_mut(id) {
            match table {
                Some(table) => log::info!("[lobby] {} at table {}", id, table),
                None => log::info!("[lobby] {} left table {:?}", id, occupant.table),
            }
            occupant.table = table;
        }
    }

    /// Table a connection is currently at.
    pub async fn table(&self, id: &str) -> Option<TableId> {
        self.occupants.read().await.get(id).and_then(|o| o.table)
    }

    /// Delivers a frame to one connection.
    pub async fn deliver(&self, id: &str, frame: Frame) -> anyhow::Result<()> {
        let sender = self
            .occupants
            .read()
            .await
            .get(id)
            .map(|o| o.sender.clone())
            .ok_or_else(|| anyhow::anyhow!("connection {} not found", id))?;
        sender
            .send(frame)
            .await
            .map_err(|_| anyhow::anyhow!("connection {} is gone", id))
    }

    /// Delivers a frame to every connection. Returns how many accepted it.
    pub async fn broadcast(&self, frame: Frame) -> usize {
        self.fan_out(frame, |_| true).await
    }

    /// Delivers a frame to every connection at `table`.
    pub async fn broadcast_table(&self, table: TableId, frame: Frame) -> usize {
        self.fan_out(frame, |o| o.table == Some(table)).await
    }

    /// Never waits on a slow client: a connection whose queue is full
    /// misses the frame.
    async fn fan_out<F>(&self, frame: Frame, filter: F) -> usize
    where
        F: Fn(&Occupant) -> bool,
    {
        let occupants = self.occupants.read().await;
        let mut delivered = 0;
        for (id, occupant) in occupants.iter().filter(|(_, o)| filter(*o)) {
            match occupant.sender.try_send(frame.clone()) {
                Ok(()) => delivered += 1,
                Err(TrySendError::Full(_)) => log::warn!(
                    "[lobby] {} dropped {}: {} frames already queued",
                    id,
                    frame,
                    QUEUE_CAPACITY
                ),
                Err(TrySendError::Closed(_)) => log::debug!("[lobby] {} is gone", id),
            }
        }
        delivered
    }

    pub async fn len(&self) -> usize {
        self.occupants.read().await.len()
    }
}
