//! Task records, snapshots, and legacy migration.
//!
//! The persisted format is a versioned snapshot document. Older installs
//! saved a bare JSON array of records without ids, a schema version, or
//! (sometimes) timestamps; `parse_saved` migrates that format forward.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};

/// Schema version written with every snapshot
pub const TASKS_SCHEMA_VERSION: &str = "td.tasks.v1";

/// Stable task identifier, assigned once at creation.
///
/// Tasks are always addressed by id, never by list position, so deleting
/// an earlier task can never redirect an edit to the wrong one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(Uuid);

impl TaskId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Task priority
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Priority {
    #[serde(alias = "low", alias = "LOW")]
    Low,
    #[default]
    #[serde(alias = "medium", alias = "MEDIUM")]
    Medium,
    #[serde(alias = "high", alias = "HIGH")]
    High,
}

impl Priority {
    /// Parse a priority from user input (case-insensitive)
    pub fn parse(input: &str) -> Result<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            _ => Err(Error::InvalidPriority(input.trim().to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single to-do item.
///
/// Invariants maintained by [`crate::store::TaskStore`]:
/// - `text` is never empty after trimming
/// - `completed_at` is set only while `completed` is true (migrated legacy
///   records may lack the timestamp even when completed)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    pub completed: bool,
    #[serde(default)]
    pub priority: Priority,
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "completedAt", default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Create a new ongoing task. `text` must already be validated.
    pub fn new(text: String, priority: Priority, now: DateTime<Utc>) -> Self {
        Self {
            id: TaskId::new(),
            text,
            completed: false,
            priority,
            created_at: Some(now),
            completed_at: None,
        }
    }

    /// Flip completion state, keeping `completed_at` consistent
    pub fn toggle(&mut self, now: DateTime<Utc>) {
        self.completed = !self.completed;
        self.completed_at = if self.completed { Some(now) } else { None };
    }

    pub fn status_label(&self) -> &'static str {
        if self.completed {
            "Completed"
        } else {
            "Ongoing"
        }
    }
}

/// Versioned persisted document holding the whole task list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskSnapshot {
    pub schema_version: String,
    pub generated_at: DateTime<Utc>,
    pub tasks: Vec<Task>,
}

impl TaskSnapshot {
    pub fn empty() -> Self {
        Self::from_tasks(Vec::new())
    }

    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        Self {
            schema_version: TASKS_SCHEMA_VERSION.to_string(),
            generated_at: Utc::now(),
            tasks,
        }
    }
}

/// Validate and trim task text
pub fn normalize_text(input: &str) -> Result<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(Error::EmptyText);
    }
    Ok(trimmed.to_string())
}

/// Pre-versioning record shape: no id, optional timestamps
#[derive(Debug, Deserialize)]
struct LegacyRecord {
    text: String,
    #[serde(default)]
    completed: bool,
    #[serde(default)]
    priority: Priority,
    #[serde(rename = "createdAt", default)]
    created_at: Option<DateTime<Utc>>,
    #[serde(rename = "completedAt", default)]
    completed_at: Option<DateTime<Utc>>,
}

fn migrate_legacy(records: Vec<LegacyRecord>) -> Vec<Task> {
    records
        .into_iter()
        .filter_map(|record| {
            let text = record.text.trim().to_string();
            if text.is_empty() {
                tracing::warn!("dropping saved task with empty text during migration");
                return None;
            }
            // A stray completion timestamp on an ongoing task loses to the flag.
            let completed_at = if record.completed {
                record.completed_at
            } else {
                None
            };
            Some(Task {
                id: TaskId::new(),
                text,
                completed: record.completed,
                priority: record.priority,
                created_at: record.created_at,
                completed_at,
            })
        })
        .collect()
}

/// Parse saved task data, migrating the legacy bare-array format forward.
///
/// Returns an error for unparseable data or an unrecognized schema version;
/// the storage layer decides how to react (it logs and starts empty).
pub fn parse_saved(content: &str) -> Result<TaskSnapshot> {
    let value: serde_json::Value = serde_json::from_str(content)?;
    if value.is_array() {
        let records: Vec<LegacyRecord> = serde_json::from_value(value)?;
        return Ok(TaskSnapshot::from_tasks(migrate_legacy(records)));
    }

    let snapshot: TaskSnapshot = serde_json::from_value(value)?;
    if snapshot.schema_version != TASKS_SCHEMA_VERSION {
        return Err(Error::UnknownSchema(snapshot.schema_version));
    }
    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_round_trip_restores_ongoing_state() {
        let mut task = Task::new("Buy milk".to_string(), Priority::High, Utc::now());
        assert!(!task.completed);
        assert!(task.completed_at.is_none());

        task.toggle(Utc::now());
        assert!(task.completed);
        assert!(task.completed_at.is_some());

        task.toggle(Utc::now());
        assert!(!task.completed);
        assert!(task.completed_at.is_none());
    }

    #[test]
    fn normalize_text_rejects_whitespace() {
        assert!(matches!(normalize_text(""), Err(Error::EmptyText)));
        assert!(matches!(normalize_text("   "), Err(Error::EmptyText)));
        assert_eq!(normalize_text("  Buy milk  ").expect("text"), "Buy milk");
    }

    #[test]
    fn priority_parse_is_case_insensitive() {
        assert_eq!(Priority::parse("low").expect("low"), Priority::Low);
        assert_eq!(Priority::parse("HIGH").expect("high"), Priority::High);
        assert_eq!(Priority::parse(" Medium ").expect("medium"), Priority::Medium);
        assert!(matches!(
            Priority::parse("urgent"),
            Err(Error::InvalidPriority(_))
        ));
    }

    #[test]
    fn parse_saved_reads_versioned_snapshot() {
        let snapshot = TaskSnapshot::from_tasks(vec![Task::new(
            "Write report".to_string(),
            Priority::Medium,
            Utc::now(),
        )]);
        let json = serde_json::to_string(&snapshot).expect("serialize");

        let parsed = parse_saved(&json).expect("parse");
        assert_eq!(parsed.tasks.len(), 1);
        assert_eq!(parsed.tasks[0].text, "Write report");
        assert_eq!(parsed.tasks[0].id, snapshot.tasks[0].id);
    }

    #[test]
    fn parse_saved_migrates_legacy_array() {
        let json = r#"[
            { "text": "Old task", "completed": false, "priority": "Low",
              "createdAt": "2023-05-01T12:00:00Z", "completedAt": null },
            { "text": "Done task", "completed": true, "priority": "High" }
        ]"#;

        let parsed = parse_saved(json).expect("parse");
        assert_eq!(parsed.schema_version, TASKS_SCHEMA_VERSION);
        assert_eq!(parsed.tasks.len(), 2);
        assert_ne!(parsed.tasks[0].id, parsed.tasks[1].id);
        assert_eq!(parsed.tasks[0].text, "Old task");
        assert!(parsed.tasks[0].created_at.is_some());
        assert!(parsed.tasks[1].completed);
        assert!(parsed.tasks[1].created_at.is_none());
    }

    #[test]
    fn legacy_migration_clears_stray_completion_timestamp() {
        let json = r#"[
            { "text": "Inconsistent", "completed": false, "priority": "Medium",
              "completedAt": "2023-05-01T12:00:00Z" }
        ]"#;

        let parsed = parse_saved(json).expect("parse");
        assert!(!parsed.tasks[0].completed);
        assert!(parsed.tasks[0].completed_at.is_none());
    }

    #[test]
    fn parse_saved_rejects_unknown_schema_version() {
        let json = r#"{ "schema_version": "td.tasks.v99",
                        "generated_at": "2023-05-01T12:00:00Z", "tasks": [] }"#;
        assert!(matches!(parse_saved(json), Err(Error::UnknownSchema(_))));
    }

    #[test]
    fn snapshot_round_trips_through_json() {
        let mut task = Task::new("Ship release".to_string(), Priority::High, Utc::now());
        task.toggle(Utc::now());
        let snapshot = TaskSnapshot::from_tasks(vec![task]);

        let json = serde_json::to_string_pretty(&snapshot).expect("serialize");
        let parsed = parse_saved(&json).expect("parse");

        assert_eq!(parsed.tasks[0].id, snapshot.tasks[0].id);
        assert_eq!(parsed.tasks[0].completed_at, snapshot.tasks[0].completed_at);
        assert_eq!(parsed.tasks[0].priority, Priority::High);
    }
}
