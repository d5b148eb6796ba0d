//! Working copy held by the full edit surface until it is saved.

use crate::task::domain::{DueDate, Platform, PriorityTag, Stage, Task};

/// Draft of a task being edited.
///
/// Changes stay local to the draft; [`EditDraft::commit`] yields the record
/// to hand to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditDraft {
    original: Task,
    working: Task,
    title_input: String,
}

impl EditDraft {
    /// Starts editing `task`.
    #[must_use]
    pub fn new(task: Task) -> Self {
        Self {
            title_input: task.title().to_owned(),
            working: task.clone(),
            original: task,
        }
    }

    /// Returns the task the draft started from.
    #[must_use]
    pub const fn original(&self) -> &Task {
        &self.original
    }

    /// Returns the draft as currently edited.
    #[must_use]
    pub const fn working(&self) -> &Task {
        &self.working
    }

    /// Returns the raw title input, which may be blank mid-edit.
    #[must_use]
    pub fn title_input(&self) -> &str {
        &self.title_input
    }

    /// Replaces the title input.
    pub fn set_title(&mut self, input: impl Into<String>) {
        self.title_input = input.into();
    }

    /// Switches platform and clears every priority tag.
    ///
    /// The side panel's quick switch keeps tags; the full editor starts the
    /// new platform from an empty set.
    pub fn set_platform(&mut self, platform: Platform) {
        if self.working.platform() == platform {
            return;
        }
        self.working.set_platform(platform);
        self.working.clear_priority();
    }

    /// Toggles `tag`, refusing to add one the platform does not offer.
    ///
    /// Returns `true` when the set changed.
    pub fn toggle_priority(&mut self, tag: PriorityTag) -> bool {
        if !self.working.priority().contains(tag) && !self.working.platform().offers(tag) {
            return false;
        }
        self.working.toggle_priority(tag);
        true
    }

    /// Returns the tags that can still be added on the current platform.
    #[must_use]
    pub fn addable_tags(&self) -> Vec<PriorityTag> {
        self.working
            .priority()
            .addable_from(self.working.platform().selectable_tags())
    }

    /// Moves the draft to another stage.
    pub const fn set_status(&mut self, status: Stage) {
        self.working.set_status(status);
    }

    /// Replaces the description.
    pub fn set_description(&mut self, description: impl Into<String>) {
        self.working.set_description(description);
    }

    /// Flips a checklist item.
    pub fn toggle_checklist_item(&mut self, item_id: &str) -> bool {
        self.working.toggle_checklist_item(item_id)
    }

    /// Sets or clears the due date.
    pub const fn set_due_date(&mut self, due_date: Option<DueDate>) {
        self.working.set_due_date(due_date);
    }

    /// Returns `true` when committing would change the stored task.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.clone().commit() != self.original
    }

    /// Produces the full record to save.
    ///
    /// A blank title falls back to the title the draft started from.
    #[must_use]
    pub fn commit(self) -> Task {
        let Self {
            mut working,
            title_input,
            ..
        } = self;
        working.retitle(&title_input);
        working
    }
}
