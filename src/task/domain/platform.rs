//! Publishing platforms and the board's platform filter.

use super::{PriorityTag, TaskDomainError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Platform a piece of content is planned for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    /// Long-form video.
    YouTube,
    /// Photo and reel posts.
    Instagram,
    /// Short-form video.
    TikTok,
    /// Written articles.
    Blog,
}

impl Platform {
    /// Every platform, in selector order.
    pub const ALL: [Self; 4] = [Self::YouTube, Self::Instagram, Self::TikTok, Self::Blog];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::YouTube => "YouTube",
            Self::Instagram => "Instagram",
            Self::TikTok => "TikTok",
            Self::Blog => "Blog",
        }
    }

    /// Returns the priority tags that may be added to a task on this
    /// platform.
    ///
    /// The base set (`High Priority`, `Medium`, `Low Priority`) is always
    /// offered. The returned set gates additions only; tags already present
    /// on a task are never stripped by it.
    #[must_use]
    pub const fn selectable_tags(self) -> &'static [PriorityTag] {
        match self {
            Self::YouTube | Self::TikTok => &[
                PriorityTag::HighPriority,
                PriorityTag::Medium,
                PriorityTag::LowPriority,
                PriorityTag::Sponsored,
                PriorityTag::Editing,
            ],
            Self::Instagram => &[
                PriorityTag::HighPriority,
                PriorityTag::Medium,
                PriorityTag::LowPriority,
                PriorityTag::Sponsored,
            ],
            Self::Blog => &[
                PriorityTag::HighPriority,
                PriorityTag::Medium,
                PriorityTag::LowPriority,
                PriorityTag::Draft,
                PriorityTag::Sponsored,
            ],
        }
    }

    /// Returns `true` when `tag` may be added on this platform.
    #[must_use]
    pub fn offers(self, tag: PriorityTag) -> bool {
        self.selectable_tags().contains(&tag)
    }
}

impl TryFrom<&str> for Platform {
    type Error = TaskDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "youtube" => Ok(Self::YouTube),
            "instagram" => Ok(Self::Instagram),
            "tiktok" => Ok(Self::TikTok),
            "blog" => Ok(Self::Blog),
            _ => Err(TaskDomainError::UnknownPlatform(value.to_owned())),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Active platform selector on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlatformFilter {
    /// Tasks of every platform are shown.
    #[default]
    All,
    /// Only tasks of the given platform are shown.
    Only(Platform),
}

impl PlatformFilter {
    /// Returns `true` when a task on `platform` passes the filter.
    #[must_use]
    pub fn admits(self, platform: Platform) -> bool {
        match self {
            Self::All => true,
            Self::Only(selected) => selected == platform,
        }
    }
}

impl From<Platform> for PlatformFilter {
    fn from(platform: Platform) -> Self {
        Self::Only(platform)
    }
}

impl TryFrom<&str> for PlatformFilter {
    type Error = TaskDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        if value.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        Platform::try_from(value).map(Self::Only)
    }
}
