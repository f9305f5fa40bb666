//! td toggle command implementation.

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
    let (mut store, _config) = super::open_store(options.data_file)?;
    let id = store.resolve_id(&options.id)?;

    let task = store.toggle_complete(id)?.clone();
    store.flush()?;

    let header = if task.completed {
        "Completed task"
    } else {
        "Reopened task"
    };
    let mut human = HumanOutput::new(header);
    human.push_summary("id", super::short_id(&task));
    human.push_detail(super::task_line(&task));

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "toggle",
        &task,
        Some(&human),
    )
}
