use crate::GameId;
use serde::Deserialize;
use serde::Serialize;

/// Caller identity attached to every ledger request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Credentials {
    pub token: String,
    #[serde(rename = "gameToken")]
    pub game_token: String,
    #[serde(rename = "gameId")]
    pub game_id: GameId,
}
