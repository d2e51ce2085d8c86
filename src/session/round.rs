use crate::TableId;
use serde::Serialize;
use serde::Serializer;

/// Reasons a round identifier cannot be built.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RoundError {
    #[error("round {raw:?} has {found} components, expected {expected}")]
    Components {
        raw: String,
        found: usize,
        expected: usize,
    },
    #[error("round {raw:?} has an empty component")]
    Empty { raw: String },
    #[error("round {raw:?} has a non-numeric date")]
    Date { raw: String },
    #[error("round {raw:?} has a non-numeric table id {table:?}")]
    Table { raw: String, table: String },
}

/// Canonical round identity: `YYYY-MM-DD-<table:03>-seq1-seq2`.
///
/// Built from the room's raw `YYYY-MM-DD-seq1-seq2` plus the table id. Every
/// settlement line of a round is keyed by it, so malformed input is rejected
/// rather than passed through.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RoundId {
    day: [String; 3],
    table: TableId,
    seq: [String; 2],
}

impl RoundId {
    /// Normalizes a raw round string for the given table.
    pub fn compose(raw: &str, table: TableId) -> Result<Self, RoundError> {
        let [y, m, d, s1, s2] = Self::split(raw)?;
        Self::date(raw, [y, m, d], [s1, s2], table)
    }
    /// Raw round string the room uses, without the table segment.
    pub fn raw(&self) -> String {
        format!("{}-{}", self.day(), self.seq.join("-"))
    }
    pub fn day(&self) -> String {
        self.day.join("-")
    }
    pub fn table(&self) -> TableId {
        self.table
    }
    fn split(raw: &str) -> Result<[String; 5], RoundError> {
        let parts = raw.split('-').map(str::to_string).collect::<Vec<_>>();
        let parts = <[String; 5]>::try_from(parts).map_err(|parts| RoundError::Components {
            raw: raw.to_string(),
            found: parts.len(),
            expected: 5,
        })?;
        if parts.iter().any(String::is_empty) {
            return Err(RoundError::Empty {
                raw: raw.to_string(),
            });
        }
        Ok(parts)
    }
    fn date(
        raw: &str,
        day: [String; 3],
        seq: [String; 2],
        table: TableId,
    ) -> Result<Self, RoundError> {
        if !day.iter().all(|p| p.bytes().all(|b| b.is_ascii_digit())) {
            return Err(RoundError::Date {
                raw: raw.to_string(),
            });
        }
        Ok(Self { day, table, seq })
    }
}

impl std::str::FromStr for RoundId {
    type Err = RoundError;
    /// Parses the canonical six-component form.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = s.split('-').map(str::to_string).collect::<Vec<_>>();
        if parts.len() != 6 {
            return Err(RoundError::Components {
                raw: s.to_string(),
                found: parts.len(),
                expected: 6,
            });
        }
        let table = parts[3]
            .parse::<TableId>()
            .ok()
            .filter(|_| parts[3].bytes().all(|b| b.is_ascii_digit()))
            .ok_or_else(|| RoundError::Table {
                raw: s.to_string(),
                table: parts[3].clone(),
            })?;
        Self::compose(&[&parts[0..3], &parts[4..6]].concat().join("-"), table)
    }
}

impl std::fmt::Display for RoundId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}-{:03}-{}", self.day(), self.table, self.seq.join("-"))
    }
}

impl Serialize for RoundId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
