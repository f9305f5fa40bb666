//! td show command implementation.

use std::path::PathBuf;

use crate::error::Result;
use crate::output::{emit_success, HumanOutput, OutputOptions};

pub struct Options {
    pub id: String,
    pub data_file: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub fn run(options: Options) -> Result<()> {
    let (store, _config) = super::open_store(options.data_file)?;
    let id = store.resolve_id(&options.id)?;
    let task = store.get(id).expect("resolved id exists").clone();

    let mut human = HumanOutput::new("Task");
    human.push_summary("id", task.id.to_string());
    human.push_summary("text", task.text.clone());
    human.push_summary("priority", task.priority.to_string());
    human.push_summary("status", task.status_label());
    if let Some(created) = task.created_at {
        human.push_summary("created", created.to_rfc3339());
    }
    if let Some(completed) = task.completed_at {
        human.push_summary("completed", completed.to_rfc3339());
    }

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "show",
        &task,
        Some(&human),
    )
}
