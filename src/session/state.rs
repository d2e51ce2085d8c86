use super::*;
use crate::Amount;
use crate::GameId;
use crate::protocol::Login;
use crate::protocol::Member;
use crate::settlement::Credentials;

/// State of one player's connection, owned by its [`Connection`] actor.
#[derive(Debug)]
pub struct Session {
    id: String,
    account: String,
    name: String,
    token: String,
    game_token: String,
    balance: Amount,
    bets: BetLedger,
    room: Option<String>,
    round: Option<RoundId>,
}

impl Session {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            account: String::new(),
            name: String::new(),
            token: String::new(),
            game_token: String::new(),
            balance: 0.0,
            bets: BetLedger::default(),
            room: None,
            round: None,
        }
    }
    /// Adopts the identity presented at login.
    pub fn login(&mut self, login: &Login) {
        self.account = login.account.clone();
        self.name = login.name.clone();
        self.token = login.token.clone();
        self.game_token = login.game_token.clone();
    }
    pub fn is_authenticated(&self) -> bool {
        !self.token.is_empty()
    }
    /// Moves the session into a round. Returns true when the round changed.
    pub fn enter(&mut self, round: RoundId) -> bool {
        self.room = Some(round.table().to_string());
        let changed = self.round.as_ref() != Some(&round);
        self.round = Some(round);
        changed
    }
    pub fn credentials(&self, game_id: GameId) -> Credentials {
        Credentials {
            token: self.token.clone(),
            game_token: self.game_token.clone(),
            game_id,
        }
    }
    pub fn ticket(&self, game_id: GameId) -> Ticket {
        Ticket {
            token: self.token.clone(),
            game_token: self.game_token.clone(),
            game_id,
            conn_id: self.id.clone(),
        }
    }
    pub fn member(&self) -> Member {
        Member {
            account: self.account.clone(),
            name: self.name.clone(),
            balance: self.balance,
        }
    }
}

impl Session {
    pub fn id(&self) -> &str {
        &self.id
    }
    pub fn account(&self) -> &str {
        &self.account
    }
    pub fn token(&self) -> &str {
        &self.token
    }
    pub fn balance(&self) -> Amount {
        self.balance
    }
    pub fn set_balance(&mut self, balance: Amount) {
        self.balance = balance;
    }
    pub fn bets(&self) -> &BetLedger {
        &self.bets
    }
    pub fn bets_mut(&mut self) -> &mut BetLedger {
        &mut self.bets
    }
    pub fn room(&self) -> Option<&str> {
        self.room.as_deref()
    }
    pub fn round(&self) -> Option<&RoundId> {
        self.round.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    fn login() -> Login {
        Login {
            token: "t-1".into(),
            game_token: "g-1".into(),
            account: "alice".into(),
            name: "Alice".into(),
        }
    }
    #[test]
    fn starts_anonymous() {
        let session = Session::new("c-1");
        assert!(!session.is_authenticated());
        assert!(session.round().is_none());
        assert!(session.bets().is_empty());
    }
    #[test]
    fn login_fills_identity() {
        let mut session = Session::new("c-1");
        session.login(&login());
        assert!(session.is_authenticated());
        assert_eq!(session.account(), "alice");
        let ticket = session.ticket(21);
        assert_eq!(ticket.conn_id, "c-1");
        assert_eq!(ticket.game_token, "g-1");
        assert_eq!(session.credentials(21).game_id, 21);
    }
    #[test]
    fn entering_tracks_room_and_round() {
        let mut session = Session::new("c-1");
        let round = RoundId::compose("2024-05-01-12-03", 7).unwrap();
        assert!(session.enter(round.clone()));
        assert!(!session.enter(round));
        assert_eq!(session.room(), Some("7"));
        assert_eq!(
            session.round().map(|r| r.to_string()),
            Some("2024-05-01-007-12-03".to_string())
        );
    }
}
