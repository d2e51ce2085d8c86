use super::ActionKind;
use crate::Amount;
use crate::Seat;
use crate::TableId;
use serde::Deserialize;
use serde::Serialize;
use std::collections::BTreeMap;

/// Seat-scoped payload shared by client requests and the room's `Ask` offers.
///
/// Clients send it to watch a table, place a bet, or act on their hand.
/// The room sends it back with `options` listing which actions it offers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Move {
    #[serde(default)]
    pub id: TableId,
    #[serde(default)]
    pub no: Seat,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<ActionKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Amount>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub options: BTreeMap<ActionKind, bool>,
}

impl Move {
    pub fn offer(id: TableId, no: Seat, options: &[(ActionKind, bool)]) -> Self {
        Self {
            id,
            no,
            action: None,
            amount: None,
            options: options.iter().copied().collect(),
        }
    }
    pub fn wager(id: TableId, no: Seat, action: ActionKind, amount: Amount) -> Self {
        Self {
            id,
            no,
            action: Some(action),
            amount: Some(amount),
            options: BTreeMap::new(),
        }
    }
    /// Whether an action is currently offered. Absent options are not offered.
    pub fn allows(&self, action: ActionKind) -> bool {
        self.options.get(&action).copied().unwrap_or(false)
    }
    pub fn disable(&mut self, action: ActionKind) {
        self.options.insert(action, false);
    }
}
