use serde::Deserialize;
use serde::Serialize;

/// Command tag of a frame. Determines the payload shape it carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    // client → server
    Login,
    WatchTable,
    Sit,
    Bet,
    Play,
    Exit,
    // server → client
    LobbyResult,
    MemberInfo,
    LoginRepeat,
    ErrorAck,
    NewRound,
    TableResult,
    UpdateSeat,
    Ask,
    GameResult,
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}
