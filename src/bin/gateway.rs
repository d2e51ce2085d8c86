//! Gateway Server Binary
//!
//! Accepts player WebSockets and runs one session actor per connection,
//! settling rounds against an in-memory ledger.

use blackjack_gateway::config::Config;
use blackjack_gateway::session::Gatekeeper;
use blackjack_gateway::session::Logins;
use blackjack_gateway::session::Services;
use blackjack_gateway::session::Validator;
use blackjack_gateway::settlement::MemoryLedger;
use blackjack_gateway::*;
use clap::Parser;
use std::sync::Arc;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    log(&config.log_dir)?;
    kys();
    let ledger = Arc::new(MemoryLedger::new());
    for (token, amount) in config.accounts.iter() {
        ledger.deposit(token, *amount).await;
    }
    let logins = Arc::new(Logins::new());
    let validator = match config.login_repeat {
        true => Some(logins.clone() as Arc<dyn Validator>),
        false => None,
    };
    let services = Services {
        ledger: ledger.clone(),
        precheck: Arc::new(Gatekeeper::new(ledger, config.game_id).with_logins(logins)),
        validator,
        game_id: config.game_id,
    };
    hosting::Server::run(&config, services).await?;
    Ok(())
}
