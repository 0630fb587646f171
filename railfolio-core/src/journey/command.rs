use serde::{Deserialize, Serialize};

/// Rider commands, usually bound to keys by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    StepForward,
    StepBack,
    /// Swallows the key so the page does not page-scroll; no motion change.
    Brake,
    Horn,
    Restart,
}

/// What the session did with a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandOutcome {
    Applied,
    /// Accepted but intentionally has no effect.
    Consumed,
    /// Dropped because the journey is not running, locked, or showing a detail.
    Ignored,
}

impl CommandOutcome {
    /// Whether the host should suppress the key's default browser action.
    #[must_use]
    pub const fn is_handled(self) -> bool {
        !matches!(self, Self::Ignored)
    }
}
