use super::*;
use serde::Serialize;
use serde_json::Value;

/// Command-specific frame payload.
///
/// The room bus hands the session typed payloads; [`Payload::decode`] builds
/// them from JSON at the boundary. A payload that does not match its command
/// is carried as [`Payload::Raw`] and forwarded unchanged.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Payload {
    Move(Move),
    Table(Table),
    Seats(Vec<Seat>),
    Outcomes(Vec<Outcome>),
    Summary(Summary),
    Member(Member),
    Login(Login),
    Ack(Ack),
    Raw(Value),
    Empty,
}

impl Payload {
    /// Decodes the payload shape expected for `command`, falling back to raw JSON.
    pub fn decode(command: Command, value: Value) -> Self {
        let typed = match command {
            Command::Ask | Command::Bet | Command::Play | Command::WatchTable | Command::Sit => {
                serde_json::from_value(value.clone()).map(Self::Move)
            }
            Command::NewRound | Command::TableResult => {
                serde_json::from_value(value.clone()).map(Self::Table)
            }
            Command::UpdateSeat => serde_json::from_value(value.clone()).map(Self::Seats),
            Command::GameResult => serde_json::from_value(value.clone()).map(Self::Outcomes),
            Command::MemberInfo => serde_json::from_value(value.clone()).map(Self::Member),
            Command::Login => serde_json::from_value(value.clone()).map(Self::Login),
            Command::ErrorAck => serde_json::from_value(value.clone()).map(Self::Ack),
            _ => return Self::wrap(value),
        };
        typed.unwrap_or_else(|_| Self::wrap(value))
    }
    fn wrap(value: Value) -> Self {
        match value {
            Value::Null => Self::Empty,
            value => Self::Raw(value),
        }
    }
}

impl Default for Payload {
    fn default() -> Self {
        Self::Empty
    }
}
