//! td remove command implementation.
//!
//! Deletion is unconditional; any confirmation prompt belongs to the caller,
//! not the store.

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

    let removed = store.remove(id)?;
    store.flush()?;

    let mut human = HumanOutput::new("Removed task");
    human.push_summary("id", super::short_id(&removed));
    human.push_summary("remaining", store.len().to_string());
    human.push_detail(super::task_line(&removed));

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "remove",
        &removed,
        Some(&human),
    )
}
