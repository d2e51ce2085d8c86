use super::BetKey;
use crate::Amount;
use crate::settlement::Order;
use std::collections::BTreeMap;
use std::collections::HashMap;
use std::sync::Arc;

/// Outstanding bet lines of one session, keyed by [`BetKey`].
/// Read by option gating and by settlement.
#[derive(Debug, Clone, Default)]
pub struct BetLedger {
    lines: HashMap<BetKey, Arc<dyn Order>>,
}

impl BetLedger {
    /// Records the order backing a line, replacing any previous one.
    pub fn commit<O>(&mut self, key: BetKey, order: O)
    where
        O: Order + 'static,
    {
        self.lines.insert(key, Arc::new(order));
    }
    /// Adds to the amount committed on a line and returns the new total.
    pub fn raise(&mut self, key: BetKey, amount: Amount) -> Amount {
        let total = self.committed(&key) + amount;
        self.commit(key, total);
        total
    }
    pub fn stake(&self, key: &BetKey) -> Option<Amount> {
        self.lines.get(key).map(|order| order.bet())
    }
    /// Amount committed on a line, zero when nothing was placed.
    pub fn committed(&self, key: &BetKey) -> Amount {
        self.stake(key).unwrap_or(0.0)
    }
    /// Snapshot of every line as `{seat}-{action}` → amount.
    pub fn lines(&self) -> BTreeMap<String, Amount> {
        self.lines
            .iter()
            .map(|(key, order)| (key.to_string(), order.bet()))
            .collect()
    }
    pub fn clear(&mut self) {
        self.lines.clear();
    }
    pub fn len(&self) -> usize {
        self.lines.len()
    }
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
