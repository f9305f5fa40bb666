//! Command-line interface for td
//!
//! This module defines the CLI structure using clap derive macros.
//! Each subcommand is defined in its own submodule and invokes exactly one
//! store operation; rendering stays out of the core.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::storage::Storage;
use crate::store::TaskStore;
use crate::task::Task;

mod add;
mod edit;
mod list;
mod remove;
mod show;
mod toggle;

/// td - personal task list
///
/// A single-user to-do list with priorities, completion timestamps, and
/// durable local storage.
#[derive(Parser, Debug)]
#[command(name = "td")]
#[command(author, version, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the task list file (defaults to the platform data dir)
    #[arg(long, global = true, env = "TD_DATA_FILE")]
    pub data_file: Option<PathBuf>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a new task
    Add {
        /// Task text
        text: String,

        /// Priority: low, medium, high (config default when omitted)
        #[arg(long)]
        priority: Option<String>,
    },

    /// List tasks
    List {
        /// Filter: all, ongoing, completed
        #[arg(long, default_value = "all")]
        filter: String,
    },

    /// Edit a task's text and/or priority
    Edit {
        /// Task id (or unambiguous prefix)
        id: String,

        /// New task text
        #[arg(long)]
        text: Option<String>,

        /// New priority: low, medium, high
        #[arg(long)]
        priority: Option<String>,
    },

    /// Toggle a task between ongoing and completed
    Toggle {
        /// Task id (or unambiguous prefix)
        id: String,
    },

    /// Remove a task
    Remove {
        /// Task id (or unambiguous prefix)
        id: String,
    },

    /// Show a single task
    Show {
        /// Task id (or unambiguous prefix)
        id: String,
    },
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let json = self.json;
        let quiet = self.quiet;
        let data_file = self.data_file;

        match self.command {
            Commands::Add { text, priority } => add::run(add::Options {
                text,
                priority,
                data_file,
                json,
                quiet,
            }),
            Commands::List { filter } => list::run(list::Options {
                filter,
                data_file,
                json,
                quiet,
            }),
            Commands::Edit { id, text, priority } => edit::run(edit::Options {
                id,
                text,
                priority,
                data_file,
                json,
                quiet,
            }),
            Commands::Toggle { id } => toggle::run(toggle::Options {
                id,
                data_file,
                json,
                quiet,
            }),
            Commands::Remove { id } => remove::run(remove::Options {
                id,
                data_file,
                json,
                quiet,
            }),
            Commands::Show { id } => show::run(show::Options {
                id,
                data_file,
                json,
                quiet,
            }),
        }
    }
}

/// Resolve config and open the store.
///
/// Data file precedence: `--data-file`/`TD_DATA_FILE`, then the config
/// override, then the platform default.
fn open_store(data_file: Option<PathBuf>) -> Result<(TaskStore, Config)> {
    let config = Config::load()?;

    let storage = match data_file.or_else(|| config.storage.path.clone()) {
        Some(path) => Storage::new(path),
        None => Storage::default_location().ok_or_else(|| {
            Error::InvalidConfig(
                "could not determine a data directory; set --data-file".to_string(),
            )
        })?,
    };

    Ok((TaskStore::open(storage), config))
}

/// Short id shown in human output; full ids appear in JSON
fn short_id(task: &Task) -> String {
    let id = task.id.to_string();
    id[..8].to_string()
}

/// One-line human rendering of a task
fn task_line(task: &Task) -> String {
    let marker = if task.completed { "x" } else { " " };
    let mut line = format!(
        "[{marker}] {} {} ({}, {})",
        short_id(task),
        task.text,
        task.priority,
        task.status_label()
    );
    if let Some(created) = task.created_at {
        line.push_str(&format!(" created {}", created.format("%Y-%m-%d %H:%M")));
    }
    if let Some(completed) = task.completed_at {
        line.push_str(&format!(" completed {}", completed.format("%Y-%m-%d %H:%M")));
    }
    line
}
