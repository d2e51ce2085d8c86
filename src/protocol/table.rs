use crate::TableId;
use serde::Deserialize;
use serde::Serialize;

/// Table state at the start or close of a round.
/// `round` is the room's raw round string, `YYYY-MM-DD-seq1-seq2`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub id: TableId,
    pub round: String,
}
