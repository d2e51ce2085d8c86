use super::*;
use crate::Amount;
use crate::session::BetKey;

/// Failures reported by the ledger collaborator.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LedgerError {
    #[error("unknown account for token {0}")]
    UnknownAccount(String),
    #[error("ledger rejected payout {key}: {reason}")]
    Rejected { key: String, reason: String },
    #[error("ledger unavailable: {0}")]
    Unavailable(String),
}

/// Authoritative store of balances and bet orders, owned outside the session.
///
/// Implementations must be safe to call concurrently from many sessions and
/// must treat a repeated [`Payout`] with the same [`Payout::key`] as a no-op.
#[async_trait::async_trait]
pub trait Ledger: Send + Sync {
    /// Debits a stake on one bet line and returns the accepted order.
    async fn place(
        &self,
        credentials: &Credentials,
        line: BetKey,
        amount: Amount,
    ) -> Result<Stake, LedgerError>;
    /// Settles one bet line.
    async fn payout(&self, payout: &Payout) -> Result<Receipt, LedgerError>;
    /// Current balance of the account behind these credentials.
    async fn balance(&self, credentials: &Credentials) -> Result<Amount, LedgerError>;
}
