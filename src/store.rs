//! In-memory task store with write-through persistence.
//!
//! The store is the single source of truth for the task list. Every
//! successful mutation queues a snapshot on the save queue; the mutation
//! itself never fails on storage. Callers that need durability call
//! [`TaskStore::flush`] before exiting.

use chrono::Utc;

use crate::error::{Error, Result};
use crate::saver::SaveQueue;
use crate::storage::Storage;
use crate::task::{self, Priority, Task, TaskId, TaskSnapshot};

pub struct TaskStore {
    tasks: Vec<Task>,
    queue: SaveQueue,
}

impl TaskStore {
    /// Open the store, loading the saved list (or empty if none/unreadable)
    pub fn open(storage: Storage) -> Self {
        let snapshot = storage.load();
        Self {
            tasks: snapshot.tasks,
            queue: SaveQueue::spawn(storage),
        }
    }

    /// Append a new ongoing task at the end of the list
    pub fn add(&mut self, text: &str, priority: Priority) -> Result<&Task> {
        let text = task::normalize_text(text)?;
        let new_task = Task::new(text, priority, Utc::now());
        self.tasks.push(new_task);
        self.persist();
        Ok(self.tasks.last().expect("just pushed"))
    }

    /// Replace text and priority in place; completion state and timestamps
    /// are untouched
    pub fn update(&mut self, id: TaskId, text: &str, priority: Priority) -> Result<&Task> {
        let text = task::normalize_text(text)?;
        let index = self.index_of(id)?;
        {
            let entry = &mut self.tasks[index];
            entry.text = text;
            entry.priority = priority;
        }
        self.persist();
        Ok(&self.tasks[index])
    }

    /// Delete a task unconditionally, returning it.
    /// Confirmation prompts are a caller concern.
    pub fn remove(&mut self, id: TaskId) -> Result<Task> {
        let index = self.index_of(id)?;
        let removed = self.tasks.remove(index);
        self.persist();
        Ok(removed)
    }

    /// Flip completion state, stamping or clearing `completed_at`
    pub fn toggle_complete(&mut self, id: TaskId) -> Result<&Task> {
        let index = self.index_of(id)?;
        self.tasks[index].toggle(Utc::now());
        self.persist();
        Ok(&self.tasks[index])
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// The full list in insertion order
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Resolve user input to a task id.
    ///
    /// Accepts a full id or an unambiguous prefix (case-insensitive).
    pub fn resolve_id(&self, input: &str) -> Result<TaskId> {
        let needle = input.trim().to_ascii_lowercase();
        if needle.is_empty() {
            return Err(Error::TaskNotFound(input.trim().to_string()));
        }

        let mut matches: Vec<&Task> = self
            .tasks
            .iter()
            .filter(|task| task.id.to_string().to_ascii_lowercase().starts_with(&needle))
            .collect();

        match matches.len() {
            0 => Err(Error::TaskNotFound(input.trim().to_string())),
            1 => Ok(matches.remove(0).id),
            _ => Err(Error::AmbiguousId {
                input: input.trim().to_string(),
                matches: matches
                    .iter()
                    .map(|task| task.id.to_string())
                    .collect::<Vec<_>>()
                    .join(", "),
            }),
        }
    }

    /// Wait until every queued save has been applied.
    ///
    /// Surfaces the most recent storage failure, which mutations themselves
    /// deliberately do not.
    pub fn flush(&self) -> Result<()> {
        self.queue.flush()
    }

    fn index_of(&self, id: TaskId) -> Result<usize> {
        self.tasks
            .iter()
            .position(|task| task.id == id)
            .ok_or_else(|| Error::TaskNotFound(id.to_string()))
    }

    fn persist(&self) {
        // Fire-and-forget at this layer; ordering and failure reporting
        // live in the save queue.
        let _ = self
            .queue
            .enqueue(TaskSnapshot::from_tasks(self.tasks.clone()));
    }
}
