use super::ActionKind;
use super::Hand;
use crate::Amount;
use crate::Seat;
use crate::TableId;
use serde::Deserialize;
use serde::Serialize;
use std::collections::BTreeMap;

/// Resolution of one bet line: what was staked, what was paid, and the
/// cards the line was decided on.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pile {
    pub bet: Amount,
    pub pay: Amount,
    #[serde(default)]
    pub cards: Hand,
}

impl Pile {
    pub fn net(&self) -> Amount {
        self.pay - self.bet
    }
    /// Payout multiple of the stake. Zero stakes pay at rate zero.
    pub fn rate(&self) -> Amount {
        if self.bet > 0.0 {
            self.pay / self.bet
        } else {
            0.0
        }
    }
}

/// A seat's round result as computed by the room: the dealer's final hand
/// and one pile per action kind the seat resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    pub id: TableId,
    pub round: String,
    pub no: Seat,
    #[serde(default)]
    pub dealer: Hand,
    #[serde(default)]
    pub action: BTreeMap<ActionKind, Pile>,
}

impl Outcome {
    pub fn pile(&self, kind: ActionKind) -> Option<&Pile> {
        self.action.get(&kind)
    }
    /// Sum of `pay - bet` over every pile of this seat.
    pub fn net(&self) -> Amount {
        self.action.values().map(Pile::net).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn rate_is_pay_over_bet() {
        let pile = Pile {
            bet: 100.0,
            pay: 200.0,
            cards: Hand::default(),
        };
        assert_eq!(pile.rate(), 2.0);
        assert_eq!(pile.net(), 100.0);
    }
    #[test]
    fn zero_stake_rate() {
        assert_eq!(Pile::default().rate(), 0.0);
    }
    #[test]
    fn seat_net_sums_piles() {
        let outcome = Outcome {
            id: 7,
            round: "2024-05-01-12-03".into(),
            no: 1,
            dealer: Hand::default(),
            action: BTreeMap::from([
                (ActionKind::Bet, Pile { bet: 100.0, pay: 0.0, cards: Hand::default() }),
                (ActionKind::Insurance, Pile { bet: 50.0, pay: 150.0, cards: Hand::default() }),
            ]),
        };
        assert_eq!(outcome.net(), 0.0);
    }
}
