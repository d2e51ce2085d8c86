use crate::Amount;

/// Read-only view of a placed order: the amount committed to one bet line.
/// Implemented by whatever the ledger hands back when a bet is accepted.
pub trait Order: Send + Sync + std::fmt::Debug {
    fn bet(&self) -> Amount;
}

impl Order for Amount {
    fn bet(&self) -> Amount {
        *self
    }
}

/// Order accepted by the ledger under its own reference.
#[derive(Debug, Clone, PartialEq)]
pub struct Stake {
    pub reference: String,
    pub amount: Amount,
    /// Account balance left once the stake was debited.
    pub balance: Amount,
}

impl Order for Stake {
    fn bet(&self) -> Amount {
        self.amount
    }
}
