//! Pipeline stages a task moves through.

use super::TaskDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Pipeline column a task belongs to.
///
/// The board groups by stage and drag-and-drop mutates nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Stage {
    /// Raw ideas not yet worked on.
    Ideas,
    /// Script or outline in progress.
    Script,
    /// Recording, editing, or writing in progress.
    Production,
    /// Content is live.
    Published,
}

impl Stage {
    /// Every stage, in column order.
    pub const ALL: [Self; 4] = [Self::Ideas, Self::Script, Self::Production, Self::Published];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ideas => "Ideas",
            Self::Script => "Script",
            Self::Production => "Production",
            Self::Published => "Published",
        }
    }

    /// Returns the zero-based column position.
    #[must_use]
    pub const fn position(self) -> usize {
        match self {
            Self::Ideas => 0,
            Self::Script => 1,
            Self::Production => 2,
            Self::Published => 3,
        }
    }
}

impl TryFrom<&str> for Stage {
    type Error = TaskDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "ideas" => Ok(Self::Ideas),
            "script" => Ok(Self::Script),
            "production" => Ok(Self::Production),
            "published" => Ok(Self::Published),
            _ => Err(TaskDomainError::UnknownStage(value.to_owned())),
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
