//! Priority tags and the duplicate-free tag set carried by each task.

use super::TaskDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tag describing a task's priority or production state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PriorityTag {
    /// Urgent content.
    #[serde(rename = "High Priority")]
    HighPriority,
    /// Normal urgency.
    #[serde(rename = "Medium")]
    Medium,
    /// Can wait.
    #[serde(rename = "Low Priority")]
    LowPriority,
    /// Paid partnership content.
    #[serde(rename = "Sponsored")]
    Sponsored,
    /// Still a rough draft.
    #[serde(rename = "Draft")]
    Draft,
    /// In the editing suite.
    #[serde(rename = "Editing")]
    Editing,
    /// Already posted.
    #[serde(rename = "Posted")]
    Posted,
}

impl PriorityTag {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::HighPriority => "High Priority",
            Self::Medium => "Medium",
            Self::LowPriority => "Low Priority",
            Self::Sponsored => "Sponsored",
            Self::Draft => "Draft",
            Self::Editing => "Editing",
            Self::Posted => "Posted",
        }
    }
}

impl TryFrom<&str> for PriorityTag {
    type Error = TaskDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "high priority" => Ok(Self::HighPriority),
            "medium" => Ok(Self::Medium),
            "low priority" => Ok(Self::LowPriority),
            "sponsored" => Ok(Self::Sponsored),
            "draft" => Ok(Self::Draft),
            "editing" => Ok(Self::Editing),
            "posted" => Ok(Self::Posted),
            _ => Err(TaskDomainError::UnknownPriority(value.to_owned())),
        }
    }
}

impl fmt::Display for PriorityTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered set of priority tags.
///
/// Membership is what matters; insertion order is kept for display. The set
/// never holds the same tag twice.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Vec<PriorityTag>", into = "Vec<PriorityTag>")]
pub struct PrioritySet(Vec<PriorityTag>);

impl PrioritySet {
    /// Creates an empty tag set.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Returns `true` when the tag is present.
    #[must_use]
    pub fn contains(&self, tag: PriorityTag) -> bool {
        self.0.contains(&tag)
    }

    /// Adds the tag if absent, removes it if present.
    ///
    /// Returns `true` when the tag is present after the call.
    pub fn toggle(&mut self, tag: PriorityTag) -> bool {
        if let Some(position) = self.0.iter().position(|existing| *existing == tag) {
            self.0.remove(position);
            false
        } else {
            self.0.push(tag);
            true
        }
    }

    /// Removes every tag.
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Returns the tags in insertion order.
    #[must_use]
    pub fn as_slice(&self) -> &[PriorityTag] {
        &self.0
    }

    /// Iterates the tags in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = PriorityTag> + '_ {
        self.0.iter().copied()
    }

    /// Returns the number of tags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when no tag is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the tags of `offered` that are not yet present, in offer
    /// order.
    #[must_use]
    pub fn addable_from(&self, offered: &[PriorityTag]) -> Vec<PriorityTag> {
        offered
            .iter()
            .copied()
            .filter(|tag| !self.contains(*tag))
            .collect()
    }
}

impl FromIterator<PriorityTag> for PrioritySet {
    fn from_iter<I: IntoIterator<Item = PriorityTag>>(iter: I) -> Self {
        let mut tags = Vec::new();
        for tag in iter {
            if !tags.contains(&tag) {
                tags.push(tag);
            }
        }
        Self(tags)
    }
}

impl From<Vec<PriorityTag>> for PrioritySet {
    fn from(tags: Vec<PriorityTag>) -> Self {
        tags.into_iter().collect()
    }
}

impl From<PrioritySet> for Vec<PriorityTag> {
    fn from(set: PrioritySet) -> Self {
        set.0
    }
}
