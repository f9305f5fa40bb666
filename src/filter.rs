//! Filter modes and pure list filtering.

use std::fmt;

use crate::error::{Error, Result};
use crate::task::Task;

/// Which subset of tasks to display. Not persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FilterMode {
    #[default]
    All,
    Ongoing,
    Completed,
}

impl FilterMode {
    /// Parse a filter mode from user input (case-insensitive)
    pub fn parse(input: &str) -> Result<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(FilterMode::All),
            "ongoing" => Ok(FilterMode::Ongoing),
            "completed" => Ok(FilterMode::Completed),
            _ => Err(Error::InvalidArgument(format!(
                "unknown filter '{}' (expected all, ongoing, or completed)",
                input.trim()
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterMode::All => "All",
            FilterMode::Ongoing => "Ongoing",
            FilterMode::Completed => "Completed",
        }
    }
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Select the visible subsequence for a filter mode.
///
/// Pure: no mutation, relative order preserved. Ongoing and Completed
/// partition any list exactly.
pub fn filter(tasks: &[Task], mode: FilterMode) -> Vec<&Task> {
    tasks
        .iter()
        .filter(|task| match mode {
            FilterMode::All => true,
            FilterMode::Ongoing => !task.completed,
            FilterMode::Completed => task.completed,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::{Priority, TaskId};
    use chrono::Utc;

    fn sample_list() -> Vec<Task> {
        let mut tasks = vec![
            Task::new("a".to_string(), Priority::Low, Utc::now()),
            Task::new("b".to_string(), Priority::Medium, Utc::now()),
            Task::new("c".to_string(), Priority::High, Utc::now()),
            Task::new("d".to_string(), Priority::Low, Utc::now()),
        ];
        tasks[1].toggle(Utc::now());
        tasks[3].toggle(Utc::now());
        tasks
    }

    #[test]
    fn all_is_identity() {
        let tasks = sample_list();
        let all = filter(&tasks, FilterMode::All);
        let ids: Vec<TaskId> = all.iter().map(|task| task.id).collect();
        let expected: Vec<TaskId> = tasks.iter().map(|task| task.id).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn ongoing_and_completed_partition_the_list() {
        let tasks = sample_list();
        let ongoing = filter(&tasks, FilterMode::Ongoing);
        let completed = filter(&tasks, FilterMode::Completed);

        assert_eq!(ongoing.len() + completed.len(), tasks.len());
        for task in &ongoing {
            assert!(!task.completed);
            assert!(!completed.iter().any(|other| other.id == task.id));
        }
        for task in &completed {
            assert!(task.completed);
        }

        // Relative order within each side matches the original list.
        let positions = |subset: &[&Task]| -> Vec<usize> {
            subset
                .iter()
                .map(|task| tasks.iter().position(|t| t.id == task.id).expect("member"))
                .collect()
        };
        assert!(positions(&ongoing).windows(2).all(|w| w[0] < w[1]));
        assert!(positions(&completed).windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn empty_list_filters_to_empty() {
        let tasks: Vec<Task> = Vec::new();
        assert!(filter(&tasks, FilterMode::Ongoing).is_empty());
        assert!(filter(&tasks, FilterMode::Completed).is_empty());
        assert!(filter(&tasks, FilterMode::All).is_empty());
    }

    #[test]
    fn parse_accepts_case_insensitive_names() {
        assert_eq!(FilterMode::parse("ALL").expect("all"), FilterMode::All);
        assert_eq!(
            FilterMode::parse("Ongoing").expect("ongoing"),
            FilterMode::Ongoing
        );
        assert_eq!(
            FilterMode::parse(" completed ").expect("completed"),
            FilterMode::Completed
        );
        assert!(FilterMode::parse("done").is_err());
    }
}
