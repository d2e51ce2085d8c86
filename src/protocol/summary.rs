use crate::Amount;
use crate::TableId;
use serde::Deserialize;
use serde::Serialize;

/// Condensed round result sent to the client once settlement has run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub id: TableId,
    pub round: String,
    /// Net win (positive) or loss (negative) across every seat and line.
    pub win: Amount,
}
