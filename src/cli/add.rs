//! td add command implementation.

use std::path::PathBuf;

use crate::error::Result;
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::task::Priority;

pub struct Options {
    pub text: String,
    pub priority: Option<String>,
    pub data_file: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub fn run(options: Options) -> Result<()> {
    let (mut store, config) = super::open_store(options.data_file)?;

    let priority = match options.priority.as_deref() {
        Some(value) => Priority::parse(value)?,
        None => config.tasks.default_priority,
    };

    let task = store.add(&options.text, priority)?.clone();
    store.flush()?;

    let mut human = HumanOutput::new("Added task");
    human.push_summary("id", super::short_id(&task));
    human.push_detail(super::task_line(&task));

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "add",
        &task,
        Some(&human),
    )
}
