use super::*;
use crate::protocol::Command;
use crate::protocol::Frame;
use crate::protocol::Payload;
use crate::protocol::Seat;
use crate::protocol::Table;
use crate::settlement::Reconciler;

/// Rewrites frames on their way from the room bus to the client.
///
/// Never fails: a payload that does not match its command passes through
/// untouched. Returns a follow-up frame to write after the rewritten one.
pub struct Dispatcher {
    reconciler: Reconciler,
}

impl Dispatcher {
    pub fn new(reconciler: Reconciler) -> Self {
        Self { reconciler }
    }

    pub async fn dispatch(&self, session: &mut Session, frame: &mut Frame) -> Option<Frame> {
        match (frame.command, &mut frame.data) {
            (Command::Ask, Payload::Move(offer)) => {
                let stake = session.bets().committed(&BetKey::base(offer.no));
                Gating::apply(session.balance(), stake, offer);
                None
            }
            (Command::NewRound, Payload::Table(table)) => {
                self.enter(session, table, true);
                None
            }
            (Command::TableResult, Payload::Table(table)) => {
                self.enter(session, table, false);
                None
            }
            (Command::UpdateSeat, Payload::Seats(seats)) => {
                self.seat(session, seats);
                None
            }
            (Command::GameResult, Payload::Outcomes(outcomes)) if !outcomes.is_empty() => {
                let summary = self.reconciler.settle(session, outcomes).await;
                log::info!(
                    "[dispatch {}] round {} settled, net {}",
                    session.id(),
                    summary.round,
                    summary.win
                );
                frame.data = Payload::Summary(summary);
                Some(Frame::member(session.member()))
            }
            (Command::GameResult, Payload::Outcomes(_)) => {
                log::warn!("[dispatch {}] empty game result", session.id());
                None
            }
            (command, Payload::Raw(_)) => {
                log::debug!("[dispatch {}] {} payload passed through", session.id(), command);
                None
            }
            _ => None,
        }
    }

    /// Tracks room and round. Bet lines of the previous round are dropped
    /// when a new round opens.
    fn enter(&self, session: &mut Session, table: &Table, opening: bool) {
        match RoundId::compose(&table.round, table.id) {
            Ok(round) => {
                let label = round.to_string();
                if session.enter(round) && opening {
                    session.bets_mut().clear();
                }
                log::debug!("[dispatch {}] in round {}", session.id(), label);
            }
            Err(e) => log::error!("[dispatch {}] round rejected: {}", session.id(), e),
        }
    }

    fn seat(&self, session: &Session, seats: &[Seat]) {
        if let Some(seat) = seats.iter().find(|s| s.account == session.account()) {
            log::debug!("[dispatch {}] seated at {}", session.id(), seat.no);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Amount;
    use crate::protocol::ActionKind;
    use crate::protocol::Hand;
    use crate::protocol::Login;
    use crate::protocol::Move;
    use crate::protocol::Outcome;
    use crate::protocol::Pile;
    use crate::settlement::MemoryLedger;
    use serde_json::json;
    use std::collections::BTreeMap;
    use std::sync::Arc;

    async fn setup(balance: Amount) -> (Dispatcher, Session) {
        let ledger = MemoryLedger::new();
        ledger.deposit("t-1", balance).await;
        let dispatcher = Dispatcher::new(Reconciler::new(Arc::new(ledger), 21));
        let mut session = Session::new("c-1");
        session.login(&Login {
            token: "t-1".into(),
            game_token: "g-1".into(),
            account: "alice".into(),
            name: "Alice".into(),
        });
        session.set_balance(balance);
        (dispatcher, session)
    }
    fn ask() -> Frame {
        Frame::new(
            Command::Ask,
            Payload::Move(Move::offer(
                7,
                1,
                &[
                    (ActionKind::Double, true),
                    (ActionKind::Split, true),
                    (ActionKind::Insurance, true),
                ],
            )),
        )
    }
    fn table(command: Command, round: &str) -> Frame {
        Frame::new(
            command,
            Payload::Table(Table {
                id: 7,
                round: round.into(),
            }),
        )
    }

    #[tokio::test]
    async fn short_balance_disables_paid_options() {
        let (dispatcher, mut session) = setup(50.0).await;
        session.bets_mut().commit(BetKey::base(1), 100.0);
        let mut frame = ask();
        assert!(dispatcher.dispatch(&mut session, &mut frame).await.is_none());
        let Payload::Move(offer) = frame.data else {
            panic!("ask payload should stay a move");
        };
        assert!(!offer.allows(ActionKind::Double));
        assert!(!offer.allows(ActionKind::Split));
        assert!(!offer.allows(ActionKind::Insurance));
    }
    #[tokio::test]
    async fn no_bet_line_keeps_options() {
        let (dispatcher, mut session) = setup(0.0).await;
        let mut frame = ask();
        dispatcher.dispatch(&mut session, &mut frame).await;
        assert_eq!(frame, ask());
    }
    #[tokio::test]
    async fn new_round_tracks_round_and_clears_lines() {
        let (dispatcher, mut session) = setup(500.0).await;
        let mut frame = table(Command::NewRound, "2024-05-01-12-03");
        dispatcher.dispatch(&mut session, &mut frame).await;
        session.bets_mut().commit(BetKey::base(1), 100.0);
        let mut again = table(Command::NewRound, "2024-05-01-12-03");
        dispatcher.dispatch(&mut session, &mut again).await;
        assert_eq!(session.bets().len(), 1);
        let mut next = table(Command::NewRound, "2024-05-01-12-04");
        dispatcher.dispatch(&mut session, &mut next).await;
        assert!(session.bets().is_empty());
        assert_eq!(session.room(), Some("7"));
        assert_eq!(
            session.round().map(|r| r.to_string()),
            Some("2024-05-01-007-12-04".to_string())
        );
        assert_eq!(next, table(Command::NewRound, "2024-05-01-12-04"));
    }
    #[tokio::test]
    async fn table_result_keeps_lines() {
        let (dispatcher, mut session) = setup(500.0).await;
        session.bets_mut().commit(BetKey::base(1), 100.0);
        let mut frame = table(Command::TableResult, "2024-05-01-12-03");
        dispatcher.dispatch(&mut session, &mut frame).await;
        assert_eq!(session.bets().len(), 1);
        assert!(session.round().is_some());
    }
    #[tokio::test]
    async fn malformed_round_leaves_session_untouched() {
        let (dispatcher, mut session) = setup(500.0).await;
        let mut frame = table(Command::NewRound, "2024-05-01-12");
        dispatcher.dispatch(&mut session, &mut frame).await;
        assert!(session.round().is_none());
        assert!(session.room().is_none());
    }
    #[tokio::test]
    async fn mismatched_payload_passes_through() {
        let (dispatcher, mut session) = setup(500.0).await;
        let mut frame = Frame::new(Command::GameResult, Payload::Raw(json!({ "odd": 1 })));
        let before = frame.clone();
        assert!(dispatcher.dispatch(&mut session, &mut frame).await.is_none());
        assert_eq!(frame, before);
    }
    #[tokio::test]
    async fn game_result_is_condensed_and_followed_by_member_info() {
        let (dispatcher, mut session) = setup(900.0).await;
        session.bets_mut().commit(BetKey::base(1), 100.0);
        let outcome = Outcome {
            id: 7,
            round: "2024-05-01-12-03".into(),
            no: 1,
            dealer: Hand::from(&["S9", "HK"][..]),
            action: BTreeMap::from([(
                ActionKind::Bet,
                Pile {
                    bet: 100.0,
                    pay: 200.0,
                    cards: Hand::from(&["SA", "HQ"][..]),
                },
            )]),
        };
        let mut frame = Frame::new(Command::GameResult, Payload::Outcomes(vec![outcome]));
        let follow = dispatcher.dispatch(&mut session, &mut frame).await;
        assert_eq!(
            serde_json::to_value(&frame.data).unwrap(),
            json!({ "id": 7, "round": "2024-05-01-12-03", "win": 100.0 })
        );
        let follow = follow.expect("settlement should report the new balance");
        assert_eq!(follow.command, Command::MemberInfo);
        assert_eq!(session.balance(), 1100.0);
    }
}
