use crate::GameId;

/// Identity presented to the duplicate-login check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub token: String,
    pub game_token: String,
    pub game_id: GameId,
    pub conn_id: String,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("login validation unavailable: {0}")]
pub struct ValidationError(pub String);

/// Decides whether a connection is still the player's canonical session.
#[async_trait::async_trait]
pub trait Validator: Send + Sync {
    async fn validate(&self, ticket: &Ticket) -> Result<bool, ValidationError>;
}
