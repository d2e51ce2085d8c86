use super::*;
use crate::Amount;
use crate::session::BetKey;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// In-process ledger keyed by player token.
///
/// Credits `pay` on the first payout of each key and acknowledges repeats
/// without crediting again. Backs the standalone gateway and tests.
#[derive(Debug, Default)]
pub struct MemoryLedger {
    accounts: RwLock<HashMap<String, Amount>>,
    receipts: RwLock<HashMap<String, Receipt>>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }
    pub async fn deposit(&self, token: &str, amount: Amount) -> Amount {
        let mut accounts = self.accounts.write().await;
        let balance = accounts.entry(token.to_string()).or_insert(0.0);
        *balance += amount;
        *balance
    }
    /// Debits a stake, refusing to overdraw.
    pub async fn withdraw(&self, token: &str, amount: Amount) -> Result<Amount, LedgerError> {
        let mut accounts = self.accounts.write().await;
        let balance = accounts
            .get_mut(token)
            .ok_or_else(|| LedgerError::UnknownAccount(token.to_string()))?;
        if *balance < amount {
            return Err(LedgerError::Rejected {
                key: token.to_string(),
                reason: format!("insufficient balance {} for stake {}", balance, amount),
            });
        }
        *balance -= amount;
        Ok(*balance)
    }
    pub async fn receipts(&self) -> Vec<Receipt> {
        self.receipts.read().await.values().cloned().collect()
    }
}

#[async_trait::async_trait]
impl Ledger for MemoryLedger {
    async fn place(
        &self,
        credentials: &Credentials,
        line: BetKey,
        amount: Amount,
    ) -> Result<Stake, LedgerError> {
        let balance = self.withdraw(&credentials.token, amount).await?;
        let reference = uuid::Uuid::now_v7().to_string();
        log::debug!("[ledger] order {} on {} for {}", reference, line, amount);
        Ok(Stake {
            reference,
            amount,
            balance,
        })
    }
    async fn payout(&self, payout: &Payout) -> Result<Receipt, LedgerError> {
        let key = payout.key();
        let mut receipts = self.receipts.write().await;
        if let Some(receipt) = receipts.get(&key) {
            log::debug!("[ledger] payout {} already settled", key);
            return Ok(Receipt {
                replayed: true,
                ..receipt.clone()
            });
        }
        let token = &payout.credentials.token;
        let mut accounts = self.accounts.write().await;
        let balance = accounts
            .get_mut(token)
            .ok_or_else(|| LedgerError::UnknownAccount(token.clone()))?;
        *balance += payout.pay;
        let receipt = Receipt {
            key: key.clone(),
            credited: payout.pay,
            replayed: false,
        };
        receipts.insert(key, receipt.clone());
        Ok(receipt)
    }
    async fn balance(&self, credentials: &Credentials) -> Result<Amount, LedgerError> {
        self.accounts
            .read()
            .await
            .get(&credentials.token)
            .copied()
            .ok_or_else(|| LedgerError::UnknownAccount(credentials.token.clone()))
    }
}
