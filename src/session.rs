//! Edit session staging.
//!
//! At most one draft exists at a time. A session without a target commits as
//! a new task; `begin` points it at an existing task and stages that task's
//! current fields. Committing goes through the store, so all validation and
//! persistence rules apply unchanged.

use crate::error::{Error, Result};
use crate::store::TaskStore;
use crate::task::{Priority, TaskId};

#[derive(Debug, Clone, Default)]
pub struct EditSession {
    target: Option<TaskId>,
    text: String,
    priority: Priority,
}

impl EditSession {
    /// Fresh session in new-task mode with an empty draft
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage an existing task for editing, discarding any previous draft
    pub fn begin(&mut self, store: &TaskStore, id: TaskId) -> Result<()> {
        let task = store
            .get(id)
            .ok_or_else(|| Error::TaskNotFound(id.to_string()))?;
        self.target = Some(id);
        self.text = task.text.clone();
        self.priority = task.priority;
        Ok(())
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn set_priority(&mut self, priority: Priority) {
        self.priority = priority;
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    /// The task being edited, or `None` in new-task mode
    pub fn target(&self) -> Option<TaskId> {
        self.target
    }

    pub fn is_editing(&self) -> bool {
        self.target.is_some()
    }

    /// Apply the draft: update the target task, or add a new one.
    ///
    /// A successful commit clears the draft. On error the draft stays
    /// staged so the caller can correct the input and retry.
    pub fn commit(&mut self, store: &mut TaskStore) -> Result<TaskId> {
        let id = match self.target {
            Some(id) => store.update(id, &self.text, self.priority)?.id,
            None => store.add(&self.text, self.priority)?.id,
        };
        self.cancel();
        Ok(id)
    }

    /// Drop the draft and return to new-task mode
    pub fn cancel(&mut self) {
        *self = Self::default();
    }
}
