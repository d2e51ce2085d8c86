use crate::Amount;
use crate::Seat as SeatNo;
use serde::Deserialize;
use serde::Serialize;

/// Occupancy of one seat at a table, as broadcast by the room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seat {
    pub no: SeatNo,
    pub account: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub balance: Amount,
}
