use super::*;
use crate::Amount;
use crate::protocol::ActionKind;
use crate::session::BetKey;
use crate::session::RoundId;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;
use std::collections::BTreeMap;

/// Instruction to settle one bet line of one round.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Payout {
    pub credentials: Credentials,
    pub round: RoundId,
    /// The line as the room resolved it (e.g. `1-Pay`).
    pub line: BetKey,
    /// The committed line the outcome settles against (e.g. `1-Bet`).
    pub settles: BetKey,
    pub action: ActionKind,
    /// Dealer's final hand, comma-joined.
    pub banker: String,
    /// Cards this line was decided on, comma-joined.
    pub result: String,
    pub stake: Amount,
    pub bet: Amount,
    pub pay: Amount,
    pub rate: Amount,
    /// Every bet line committed this round, keyed by line.
    pub lines: BTreeMap<String, Amount>,
    pub paid_at: DateTime<Utc>,
}

impl Payout {
    /// Idempotency key: one payout per (player, round, resolved line).
    pub fn key(&self) -> String {
        format!("{}/{}/{}", self.credentials.token, self.round, self.line)
    }
    pub fn win(&self) -> Amount {
        self.pay - self.bet
    }
}

/// Ledger acknowledgement of a payout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Receipt {
    pub key: String,
    pub credited: Amount,
    /// True when the ledger had already settled this key.
    pub replayed: bool,
}
