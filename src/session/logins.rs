use super::*;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Registry of the latest connection each player token logged in on.
///
/// A login claims the token for its connection; any older connection
/// holding the same token stops validating.
#[derive(Debug, Default)]
pub struct Logins {
    latest: RwLock<HashMap<String, String>>,
}

impl Logins {
    pub fn new() -> Self {
        Self::default()
    }
    /// Claims `token` for `conn_id`, returning the connection it displaced.
    pub async fn claim(&self, token: &str, conn_id: &str) -> Option<String> {
        self.latest
            .write()
            .await
            .insert(token.to_string(), conn_id.to_string())
            .filter(|previous| previous != conn_id)
    }
    /// Releases `token` if `conn_id` still holds it.
    pub async fn release(&self, token: &str, conn_id: &str) {
        let mut latest = self.latest.write().await;
        if latest.get(token).is_some_and(|holder| holder == conn_id) {
            latest.remove(token);
        }
    }
}

#[async_trait::async_trait]
impl Validator for Logins {
    async fn validate(&self, ticket: &Ticket) -> Result<bool, ValidationError> {
        Ok(self
            .latest
            .read()
            .await
            .get(&ticket.token)
            .is_none_or(|holder| *holder == ticket.conn_id))
    }
}
