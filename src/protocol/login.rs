use serde::Deserialize;
use serde::Serialize;

/// Credentials presented by a client on its first frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Login {
    pub token: String,
    #[serde(rename = "gameToken")]
    pub game_token: String,
    pub account: String,
    #[serde(default)]
    pub name: String,
}
