use crate::Amount;
use crate::GameId;

/// Gateway settings, read from flags or the environment.
#[derive(Debug, Clone, clap::Parser)]
#[command(name = "gateway", about = "WebSocket gateway for live blackjack tables")]
pub struct Config {
    /// Address the HTTP server binds to.
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:8888")]
    pub bind: String,
    /// Game identifier presented to the ledger and the login check.
    #[arg(long, env = "GAME_ID", default_value_t = 1)]
    pub game_id: GameId,
    /// Check every request against the player's latest login.
    #[arg(long, env = "LOGIN_REPEAT_ENABLE", default_value_t = false)]
    pub login_repeat: bool,
    #[arg(long, env = "WORKERS", default_value_t = 4)]
    pub workers: usize,
    #[arg(long, env = "LOG_DIR", default_value = "logs")]
    pub log_dir: String,
    /// Accounts opened in the in-memory ledger, as `token:amount`.
    #[arg(long = "account", env = "ACCOUNTS", value_delimiter = ',', value_parser = account)]
    pub accounts: Vec<(String, Amount)>,
}

fn account(s: &str) -> Result<(String, Amount), String> {
    let (token, amount) = s
        .split_once(':')
        .ok_or_else(|| format!("expected token:amount, got {:?}", s))?;
    let amount = amount
        .parse::<Amount>()
        .map_err(|e| format!("bad amount in {:?}: {}", s, e))?;
    match token.is_empty() || !amount.is_finite() || amount < 0.0 {
        true => Err(format!("bad account {:?}", s)),
        false => Ok((token.to_string(), amount)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    #[test]
    fn defaults() {
        let config = Config::try_parse_from(["gateway"]).unwrap();
        assert_eq!(config.bind, "0.0.0.0:8888");
        assert_eq!(config.workers, 4);
        assert!(!config.login_repeat);
    }
    #[test]
    fn parses_accounts() {
        let config = Config::try_parse_from([
            "gateway",
            "--game-id",
            "21",
            "--login-repeat",
            "--account",
            "t-1:500,t-2:12.5",
        ])
        .unwrap();
        assert_eq!(config.game_id, 21);
        assert!(config.login_repeat);
        assert_eq!(
            config.accounts,
            vec![("t-1".to_string(), 500.0), ("t-2".to_string(), 12.5)]
        );
    }
    #[test]
    fn rejects_bad_accounts() {
        assert!(Config::try_parse_from(["gateway", "--account", "t-1"]).is_err());
        assert!(Config::try_parse_from(["gateway", "--account", ":5"]).is_err());
        assert!(Config::try_parse_from(["gateway", "--account", "t-1:-5"]).is_err());
    }
}
