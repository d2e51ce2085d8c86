use serde::Deserialize;
use serde::Serialize;

/// Status tag of a frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    #[default]
    Ok,
    /// The same player logged in on a newer connection.
    DuplicateLogin,
    Error,
}
