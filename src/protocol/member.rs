use crate::Amount;
use serde::Deserialize;
use serde::Serialize;

/// Player identity and balance as reported to the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub account: String,
    pub name: String,
    pub balance: Amount,
}
