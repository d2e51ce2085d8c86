use crate::Seat;
use crate::protocol::ActionKind;
use serde::Serialize;
use serde::Serializer;

/// Identity of one bet line: `{seat}-{action}`, e.g. `1-Bet`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BetKey {
    seat: Seat,
    kind: ActionKind,
}

impl BetKey {
    pub fn new(seat: Seat, kind: ActionKind) -> Self {
        Self { seat, kind }
    }
    /// Key of the committed line an outcome of `kind` settles against.
    pub fn settling(seat: Seat, kind: ActionKind) -> Self {
        Self::new(seat, kind.settles_as())
    }
    /// Key of the seat's base wager.
    pub fn base(seat: Seat) -> Self {
        Self::new(seat, ActionKind::Bet)
    }
    pub fn seat(&self) -> Seat {
        self.seat
    }
    pub fn kind(&self) -> ActionKind {
        self.kind
    }
}

impl std::fmt::Display for BetKey {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}-{}", self.seat, self.kind)
    }
}

impl Serialize for BetKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
