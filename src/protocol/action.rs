use serde::Deserialize;
use serde::Serialize;

/// Player decisions and the outcome kinds a round can resolve a bet line into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    Bet,
    Hit,
    Stand,
    Double,
    Split,
    Insurance,
    Pay,
    GiveUp,
}

impl ActionKind {
    /// The bet line an outcome of this kind is settled against.
    /// Pay and GiveUp resolve the original wager, so they map back to Bet.
    pub fn settles_as(self) -> Self {
        match self {
            Self::Pay | Self::GiveUp => Self::Bet,
            kind => kind,
        }
    }
    pub fn label(&self) -> &'static str {
        match self {
            Self::Bet => "Bet",
            Self::Hit => "Hit",
            Self::Stand => "Stand",
            Self::Double => "Double",
            Self::Split => "Split",
            Self::Insurance => "Insurance",
            Self::Pay => "Pay",
            Self::GiveUp => "GiveUp",
        }
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl TryFrom<&str> for ActionKind {
    type Error = String;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "Bet" => Ok(Self::Bet),
            "Hit" => Ok(Self::Hit),
            "Stand" => Ok(Self::Stand),
            "Double" => Ok(Self::Double),
            "Split" => Ok(Self::Split),
            "Insurance" => Ok(Self::Insurance),
            "Pay" => Ok(Self::Pay),
            "GiveUp" => Ok(Self::GiveUp),
            _ => Err(format!("unknown action kind: {}", s)),
        }
    }
}
