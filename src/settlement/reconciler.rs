use super::*;
use crate::Amount;
use crate::GameId;
use crate::protocol::ActionKind;
use crate::protocol::Hand;
use crate::protocol::Outcome;
use crate::protocol::Pile;
use crate::protocol::Summary;
use crate::session::BetKey;
use crate::session::RoundId;
use crate::session::Session;
use std::sync::Arc;

/// Settles a finished round against the bet lines of one session.
///
/// Each outcome pile is matched to the committed line it settles against
/// and paid out through the [`Ledger`]. A line with no committed stake is
/// skipped. A failing payout is logged and never blocks its siblings.
pub struct Reconciler {
    ledger: Arc<dyn Ledger>,
    game_id: GameId,
}

impl Reconciler {
    pub fn new(ledger: Arc<dyn Ledger>, game_id: GameId) -> Self {
        Self { ledger, game_id }
    }

    /// Pays out every resolved line, refreshes the cached balance, and
    /// condenses the round into its net result.
    pub async fn settle(&self, session: &mut Session, outcomes: &[Outcome]) -> Summary {
        for outcome in outcomes {
            self.seat(session, outcome).await;
        }
        self.refresh(session).await;
        Self::summarize(outcomes)
    }

    /// Sum of `pay - bet` over every pile of every seat.
    pub fn net(outcomes: &[Outcome]) -> Amount {
        outcomes.iter().map(Outcome::net).sum()
    }

    fn summarize(outcomes: &[Outcome]) -> Summary {
        let (id, round) = outcomes
            .first()
            .map(|o| (o.id, o.round.clone()))
            .unwrap_or_default();
        Summary {
            id,
            round,
            win: Self::net(outcomes),
        }
    }

    async fn seat(&self, session: &Session, outcome: &Outcome) {
        let round = match RoundId::compose(&outcome.round, outcome.id) {
            Ok(round) => round,
            Err(e) => {
                log::error!("[settle {}] seat {} skipped: {}", session.id(), outcome.no, e);
                return;
            }
        };
        let banker = outcome.dealer.joined();
        for (&kind, pile) in outcome.action.iter() {
            let settles = BetKey::settling(outcome.no, kind);
            let Some(stake) = session.bets().stake(&settles) else {
                log::debug!("[settle {}] no stake on {}", session.id(), settles);
                continue;
            };
            let payout = Payout {
                credentials: session.credentials(self.game_id),
                round: round.clone(),
                line: BetKey::new(outcome.no, kind),
                settles,
                action: kind,
                banker: banker.clone(),
                result: Self::cards(outcome, kind, pile).joined(),
                stake,
                bet: pile.bet,
                pay: pile.pay,
                rate: pile.rate(),
                lines: session.bets().lines(),
                paid_at: chrono::Utc::now(),
            };
            match self.ledger.payout(&payout).await {
                Ok(receipt) if receipt.replayed => {
                    log::info!("[settle {}] {} already paid", session.id(), receipt.key)
                }
                Ok(receipt) => log::info!(
                    "[settle {}] {} credited {} (rate {})",
                    session.id(),
                    receipt.key,
                    receipt.credited,
                    payout.rate
                ),
                Err(e) => log::error!("[settle {}] {} failed: {}", session.id(), payout.key(), e),
            }
        }
    }

    /// Cards a line was decided on. A double shares the base hand and
    /// insurance is decided on the dealer's hand.
    fn cards(outcome: &Outcome, kind: ActionKind, pile: &Pile) -> Hand {
        match kind {
            ActionKind::Double => outcome
                .pile(ActionKind::Bet)
                .map(|base| base.cards.clone())
                .unwrap_or_else(|| pile.cards.clone()),
            ActionKind::Insurance => outcome.dealer.clone(),
            _ => pile.cards.clone(),
        }
    }

    async fn refresh(&self, session: &mut Session) {
        match self.ledger.balance(&session.credentials(self.game_id)).await {
            Ok(balance) => session.set_balance(balance),
            Err(e) => log::warn!("[settle {}] balance refresh failed: {}", session.id(), e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::Login;
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    /// Ledger that records every payout and can be told to refuse some lines.
    #[derive(Default)]
    struct Recorder {
        paid: Mutex<Vec<Payout>>,
        refuse: Option<ActionKind>,
        balance: Amount,
    }

    #[async_trait::async_trait]
    impl Ledger for Recorder {
        async fn place(
            &self,
            _: &Credentials,
            _: BetKey,
            amount: Amount,
        ) -> Result<Stake, LedgerError> {
            Ok(Stake {
                reference: "ord-1".into(),
                amount,
                balance: self.balance,
            })
        }
        async fn payout(&self, payout: &Payout) -> Result<Receipt, LedgerError> {
            if self.refuse == Some(payout.action) {
                return Err(LedgerError::Unavailable("down".into()));
            }
            self.paid.lock().unwrap().push(payout.clone());
            Ok(Receipt {
                key: payout.key(),
                credited: payout.pay,
                replayed: false,
            })
        }
        async fn balance(&self, _: &Credentials) -> Result<Amount, LedgerError> {
            Ok(self.balance)
        }
    }

    fn session() -> Session {
        let mut session = Session::new("c-1");
        session.login(&Login {
            token: "t-1".into(),
            game_token: "g-1".into(),
            account: "alice".into(),
            name: "Alice".into(),
        });
        session
    }
    fn pile(bet: Amount, pay: Amount, cards: &[&str]) -> Pile {
        Pile {
            bet,
            pay,
            cards: Hand::from(cards),
        }
    }
    fn outcome(no: usize, action: Vec<(ActionKind, Pile)>) -> Outcome {
        Outcome {
            id: 7,
            round: "2024-05-01-12-03".into(),
            no,
            dealer: Hand::from(&["SA", "HK"][..]),
            action: action.into_iter().collect::<BTreeMap<_, _>>(),
        }
    }

    #[tokio::test]
    async fn net_total_ignores_seat_order() {
        let outcomes = vec![
            outcome(1, vec![(ActionKind::Bet, pile(100.0, 200.0, &[]))]),
            outcome(
                2,
                vec![
                    (ActionKind::Bet, pile(100.0, 0.0, &[])),
                    (ActionKind::Insurance, pile(50.0, 150.0, &[])),
                ],
            ),
            outcome(3, vec![(ActionKind::GiveUp, pile(75.0, 37.5, &[]))]),
        ];
        let reversed = outcomes.iter().rev().cloned().collect::<Vec<_>>();
        let mut wins = Vec::new();
        for order in [outcomes, reversed] {
            let ledger = Arc::new(Recorder::default());
            let reconciler = Reconciler::new(ledger.clone(), 21);
            let mut session = session();
            session.bets_mut().commit(BetKey::base(1), 100.0);
            session.bets_mut().commit(BetKey::base(2), 100.0);
            session.bets_mut().commit(BetKey::new(2, ActionKind::Insurance), 50.0);
            session.bets_mut().commit(BetKey::base(3), 75.0);
            wins.push(reconciler.settle(&mut session, &order).await.win);
            assert_eq!(ledger.paid.lock().unwrap().len(), 4);
        }
        assert_eq!(wins, vec![62.5, 62.5]);
        assert_eq!(Reconciler::net(&[]), 0.0);
    }
    #[tokio::test]
    async fn winning_bet_pays_double() {
        let ledger = Arc::new(Recorder {
            balance: 1100.0,
            ..Default::default()
        });
        let reconciler = Reconciler::new(ledger.clone(), 21);
        let mut session = session();
        session.bets_mut().commit(BetKey::base(1), 100.0);
        let outcomes = vec![outcome(1, vec![(ActionKind::Bet, pile(100.0, 200.0, &["H10", "D9"]))])];
        let summary = reconciler.settle(&mut session, &outcomes).await;
        assert_eq!(summary.win, 100.0);
        assert_eq!(summary.id, 7);
        assert_eq!(session.balance(), 1100.0);
        let paid = ledger.paid.lock().unwrap();
        assert_eq!(paid.len(), 1);
        assert_eq!(paid[0].rate, 2.0);
        assert_eq!(paid[0].banker, "SA,HK");
        assert_eq!(paid[0].result, "H10,D9");
        assert_eq!(paid[0].round.to_string(), "2024-05-01-007-12-03");
        assert_eq!(paid[0].key(), "t-1/2024-05-01-007-12-03/1-Bet");
    }
    #[tokio::test]
    async fn pay_and_give_up_settle_against_bet_line() {
        let ledger = Arc::new(Recorder::default());
        let reconciler = Reconciler::new(ledger.clone(), 21);
        let mut session = session();
        session.bets_mut().commit(BetKey::base(2), 100.0);
        let outcomes = vec![
            outcome(2, vec![(ActionKind::Pay, pile(100.0, 250.0, &[]))]),
            outcome(2, vec![(ActionKind::GiveUp, pile(100.0, 50.0, &[]))]),
        ];
        reconciler.settle(&mut session, &outcomes).await;
        let paid = ledger.paid.lock().unwrap();
        assert_eq!(paid.len(), 2);
        assert!(paid.iter().all(|p| p.settles == BetKey::base(2)));
        assert!(paid.iter().all(|p| p.stake == 100.0));
    }
    #[tokio::test]
    async fn unstaked_lines_are_skipped_but_counted() {
        let ledger = Arc::new(Recorder::default());
        let reconciler = Reconciler::new(ledger.clone(), 21);
        let mut session = session();
        let outcomes = vec![outcome(3, vec![(ActionKind::Bet, pile(100.0, 0.0, &[]))])];
        let summary = reconciler.settle(&mut session, &outcomes).await;
        assert!(ledger.paid.lock().unwrap().is_empty());
        assert_eq!(summary.win, -100.0);
    }
    #[tokio::test]
    async fn double_and_insurance_take_borrowed_cards() {
        let ledger = Arc::new(Recorder::default());
        let reconciler = Reconciler::new(ledger.clone(), 21);
        let mut session = session();
        session.bets_mut().commit(BetKey::base(1), 100.0);
        session.bets_mut().commit(BetKey::new(1, ActionKind::Double), 100.0);
        session.bets_mut().commit(BetKey::new(1, ActionKind::Insurance), 50.0);
        let outcomes = vec![outcome(
            1,
            vec![
                (ActionKind::Bet, pile(100.0, 0.0, &["H10", "D6", "C9"])),
                (ActionKind::Double, pile(100.0, 0.0, &[])),
                (ActionKind::Insurance, pile(50.0, 150.0, &["X"])),
            ],
        )];
        reconciler.settle(&mut session, &outcomes).await;
        let paid = ledger.paid.lock().unwrap();
        let result = |kind| {
            paid.iter()
                .find(|p| p.action == kind)
                .map(|p| p.result.clone())
                .unwrap()
        };
        assert_eq!(result(ActionKind::Double), "H10,D6,C9");
        assert_eq!(result(ActionKind::Insurance), "SA,HK");
        assert!(paid.iter().all(|p| p.lines.len() == 3));
    }
    #[tokio::test]
    async fn failed_line_does_not_block_siblings() {
        let ledger = Arc::new(Recorder {
            refuse: Some(ActionKind::Bet),
            ..Default::default()
        });
        let reconciler = Reconciler::new(ledger.clone(), 21);
        let mut session = session();
        session.bets_mut().commit(BetKey::base(1), 100.0);
        session.bets_mut().commit(BetKey::new(1, ActionKind::Insurance), 50.0);
        session.bets_mut().commit(BetKey::new(2, ActionKind::Split), 100.0);
        let outcomes = vec![
            outcome(
                1,
                vec![
                    (ActionKind::Bet, pile(100.0, 0.0, &[])),
                    (ActionKind::Insurance, pile(50.0, 150.0, &[])),
                ],
            ),
            outcome(2, vec![(ActionKind::Split, pile(100.0, 200.0, &[]))]),
        ];
        let summary = reconciler.settle(&mut session, &outcomes).await;
        let paid = ledger.paid.lock().unwrap();
        assert_eq!(paid.len(), 2);
        assert!(paid.iter().all(|p| p.action != ActionKind::Bet));
        assert_eq!(summary.win, 100.0);
    }
    #[tokio::test]
    async fn malformed_round_skips_seat() {
        let ledger = Arc::new(Recorder::default());
        let reconciler = Reconciler::new(ledger.clone(), 21);
        let mut session = session();
        session.bets_mut().commit(BetKey::base(1), 100.0);
        let mut bad = outcome(1, vec![(ActionKind::Bet, pile(100.0, 200.0, &[]))]);
        bad.round = "2024-05-01".into();
        let summary = reconciler.settle(&mut session, &[bad]).await;
        assert!(ledger.paid.lock().unwrap().is_empty());
        assert_eq!(summary.win, 100.0);
    }
    #[tokio::test]
    async fn redelivered_result_settles_once() {
        let ledger = Arc::new(MemoryLedger::new());
        ledger.deposit("t-1", 900.0).await;
        let reconciler = Reconciler::new(ledger.clone(), 21);
        let mut session = session();
        session.bets_mut().commit(BetKey::base(1), 100.0);
        let outcomes = vec![outcome(1, vec![(ActionKind::Bet, pile(100.0, 200.0, &[]))])];
        reconciler.settle(&mut session, &outcomes).await;
        reconciler.settle(&mut session, &outcomes).await;
        assert_eq!(session.balance(), 1100.0);
    }
}
