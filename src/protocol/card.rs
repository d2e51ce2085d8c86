use serde::Deserialize;
use serde::Serialize;

/// A single card as its two-character code (e.g. `"SA"`, `"HT"`).
/// Dealing and hand evaluation live in the game room; the session only
/// relays codes into settlement records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Card(String);

impl Card {
    pub fn code(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Card {
    fn from(code: &str) -> Self {
        Self(code.to_string())
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// An ordered set of cards, as resolved by the room for a player or dealer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hand(Vec<Card>);

impl Hand {
    pub fn codes(&self) -> Vec<&str> {
        self.0.iter().map(Card::code).collect()
    }
    /// Comma-joined card codes, the form settlement records carry.
    pub fn joined(&self) -> String {
        self.codes().join(",")
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<Card>> for Hand {
    fn from(cards: Vec<Card>) -> Self {
        Self(cards)
    }
}

impl From<&[&str]> for Hand {
    fn from(codes: &[&str]) -> Self {
        Self(codes.iter().copied().map(Card::from).collect())
    }
}

impl std::fmt::Display for Hand {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(&self.joined())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn joins_codes_with_commas() {
        let hand = Hand::from(&["SA", "HK", "D5"][..]);
        assert_eq!(hand.joined(), "SA,HK,D5");
    }
    #[test]
    fn empty_hand_joins_to_empty() {
        assert_eq!(Hand::default().joined(), "");
    }
    #[test]
    fn decodes_from_code_array() {
        let hand = serde_json::from_str::<Hand>(r#"["C2","C3"]"#).unwrap();
        assert_eq!(hand.codes(), vec!["C2", "C3"]);
    }
}
