use super::*;
use crate::GameId;
use crate::protocol::Command;
use crate::protocol::ErrorCode;
use crate::protocol::Frame;
use crate::protocol::Login;
use crate::protocol::Move;
use crate::protocol::RawFrame;
use crate::settlement::Ledger;
use crate::settlement::LedgerError;
use crate::settlement::Stake;
use std::sync::Arc;

/// What the inbound pump should do with a frame after the pre-check.
#[derive(Debug, PartialEq)]
pub enum Verdict {
    /// Decode and forward to the room bus.
    Forward,
    /// Fully handled here; optionally reply to the client.
    Handled(Option<Frame>),
}

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum PrecheckError {
    #[error("malformed {0} request: {1}")]
    Malformed(Command, String),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

impl PrecheckError {
    /// Code acknowledged to the client. Malformed requests are dropped silently.
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            Self::Malformed(..) => None,
            Self::Ledger(LedgerError::UnknownAccount(_)) => Some(ErrorCode::Unauthorized),
            Self::Ledger(_) => Some(ErrorCode::ServerError),
        }
    }
}

/// Hook run on every inbound frame before it is forwarded to the room bus.
#[async_trait::async_trait]
pub trait Precheck: Send + Sync {
    async fn check(&self, session: &mut Session, frame: &RawFrame)
    -> Result<Verdict, PrecheckError>;
    /// Called once the client transport has closed.
    async fn leave(&self, _: &Session) {}
}

/// Forwards everything untouched.
#[derive(Debug, Default)]
pub struct Passthrough;

#[async_trait::async_trait]
impl Precheck for Passthrough {
    async fn check(&self, _: &mut Session, _: &RawFrame) -> Result<Verdict, PrecheckError> {
        Ok(Verdict::Forward)
    }
}

/// Default pre-check for blackjack sessions.
///
/// - `login` adopts the presented identity, claims the token, loads the
///   balance from the ledger, and answers with member info.
/// - `bet` and `play` requests carrying a stake are placed with the ledger
///   and recorded on the session's bet lines before they are forwarded. A
///   stake the ledger refuses is never forwarded.
pub struct Gatekeeper {
    ledger: Arc<dyn Ledger>,
    logins: Option<Arc<Logins>>,
    game_id: GameId,
}

impl Gatekeeper {
    pub fn new(ledger: Arc<dyn Ledger>, game_id: GameId) -> Self {
        Self {
            ledger,
            logins: None,
            game_id,
        }
    }
    pub fn with_logins(mut self, logins: Arc<Logins>) -> Self {
        self.logins = Some(logins);
        self
    }
    async fn login(&self, session: &mut Session, frame: &RawFrame) -> Result<Verdict, PrecheckError> {
        let login = frame
            .parse::<Login>()
            .map_err(|e| PrecheckError::Malformed(frame.command, e.to_string()))?;
        session.login(&login);
        if let Some(logins) = &self.logins {
            if let Some(previous) = logins.claim(session.token(), session.id()).await {
                log::info!(
                    "[session {}] {} displaced connection {}",
                    session.id(),
                    session.account(),
                    previous
                );
            }
        }
        let balance = self.ledger.balance(&session.credentials(self.game_id)).await?;
        session.set_balance(balance);
        log::info!("[session {}] {} logged in", session.id(), session.account());
        Ok(Verdict::Handled(Some(Frame::member(session.member()))))
    }
    async fn stake(&self, session: &mut Session, frame: &RawFrame) -> Result<(), PrecheckError> {
        let Ok(m) = frame.parse::<Move>() else {
            return Ok(());
        };
        let (Some(kind), Some(amount)) = (m.action, m.amount) else {
            return Ok(());
        };
        if !amount.is_finite() || amount <= 0.0 {
            return Ok(());
        }
        let key = BetKey::new(m.no, kind);
        let stake = self
            .ledger
            .place(&session.credentials(self.game_id), key, amount)
            .await?;
        session.set_balance(stake.balance);
        let total = session.bets().committed(&key) + stake.amount;
        session.bets_mut().commit(key, Stake { amount: total, ..stake });
        log::debug!(
            "[session {}] line {} now {}, balance {}",
            session.id(),
            key,
            total,
            session.balance()
        );
        Ok(())
    }
}

#[async_trait::async_trait]
impl Precheck for Gatekeeper {
    async fn check(
        &self,
        session: &mut Session,
        frame: &RawFrame,
    ) -> Result<Verdict, PrecheckError> {
        match frame.command {
            Command::Login => self.login(session, frame).await,
            Command::Bet | Command::Play => {
                self.stake(session, frame).await?;
                Ok(Verdict::Forward)
            }
            _ => Ok(Verdict::Forward),
        }
    }
    async fn leave(&self, session: &Session) {
        if let Some(logins) = &self.logins {
            logins.release(session.token(), session.id()).await;
        }
    }
}
