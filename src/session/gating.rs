use crate::Amount;
use crate::protocol::ActionKind;
use crate::protocol::Move;

/// Withdraws offered options the player cannot fund.
///
/// - Double and Split need another full stake: withdrawn when the balance
///   is below the committed base bet.
/// - Insurance costs half the stake: withdrawn when there is a stake and the
///   balance does not exceed half of it.
///
/// Gating only ever disables options; it never offers what the room did not.
pub struct Gating;

impl Gating {
    pub fn apply(balance: Amount, stake: Amount, offer: &mut Move) {
        if balance < stake {
            offer.disable(ActionKind::Double);
            offer.disable(ActionKind::Split);
        }
        if stake > 0.0 && balance <= stake / 2.0 {
            offer.disable(ActionKind::Insurance);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    fn offer() -> Move {
        Move::offer(
            7,
            1,
            &[
                (ActionKind::Hit, true),
                (ActionKind::Stand, true),
                (ActionKind::Double, true),
                (ActionKind::Split, true),
                (ActionKind::Insurance, true),
            ],
        )
    }
    #[test]
    fn funded_player_keeps_options() {
        let mut m = offer();
        Gating::apply(500.0, 100.0, &mut m);
        assert_eq!(m, offer());
    }
    #[test]
    fn short_of_stake_loses_double_and_split() {
        let mut m = offer();
        Gating::apply(80.0, 100.0, &mut m);
        assert!(!m.allows(ActionKind::Double));
        assert!(!m.allows(ActionKind::Split));
        assert!(m.allows(ActionKind::Insurance));
        assert!(m.allows(ActionKind::Hit));
    }
    #[test]
    fn half_stake_loses_insurance_too() {
        let mut m = offer();
        Gating::apply(50.0, 100.0, &mut m);
        assert!(!m.allows(ActionKind::Double));
        assert!(!m.allows(ActionKind::Split));
        assert!(!m.allows(ActionKind::Insurance));
        assert!(m.allows(ActionKind::Stand));
    }
    #[test]
    fn exact_stake_can_double() {
        let mut m = offer();
        Gating::apply(100.0, 100.0, &mut m);
        assert!(m.allows(ActionKind::Double));
        assert!(m.allows(ActionKind::Split));
    }
    #[test]
    fn nothing_staked_nothing_withdrawn() {
        let mut m = offer();
        Gating::apply(0.0, 0.0, &mut m);
        assert_eq!(m, offer());
    }
    #[test]
    fn never_enables_options() {
        let mut m = Move::offer(7, 1, &[(ActionKind::Double, false)]);
        Gating::apply(1000.0, 10.0, &mut m);
        assert!(!m.allows(ActionKind::Double));
        assert!(!m.options.contains_key(&ActionKind::Split));
    }
}
