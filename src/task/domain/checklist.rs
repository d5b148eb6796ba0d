//! Quality checklist attached to every task.

use serde::{Deserialize, Serialize};

/// Single checklist entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    /// Identifier unique within the owning checklist.
    pub id: String,
    /// Display text.
    pub text: String,
    /// Whether the item has been ticked.
    pub checked: bool,
}

impl ChecklistItem {
    /// Creates an unchecked item.
    #[must_use]
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            checked: false,
        }
    }
}

/// Returns the checklist every new idea starts with.
#[must_use]
pub fn default_checklist() -> Vec<ChecklistItem> {
    vec![
        ChecklistItem::new("c1", "Hook"),
        ChecklistItem::new("c2", "Call to action (CTA)"),
        ChecklistItem::new("c3", "Caption reviewed"),
        ChecklistItem::new("c4", "Strategic hashtags"),
    ]
}

/// Flips the `checked` flag of the item with `item_id`.
///
/// Returns `false` when no item matches.
pub fn toggle_item(checklist: &mut [ChecklistItem], item_id: &str) -> bool {
    match checklist.iter_mut().find(|item| item.id == item_id) {
        Some(item) => {
            item.checked = !item.checked;
            true
        }
        None => false,
    }
}
