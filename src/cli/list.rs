//! td list command implementation.

use std::path::PathBuf;

use serde::Serialize;

use crate::error::Result;
use crate::filter::{filter, FilterMode};
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::task::Task;

pub struct Options {
    pub filter: String,
    pub data_file: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

#[derive(Serialize)]
struct ListData<'a> {
    filter: &'a str,
    count: usize,
    tasks: Vec<&'a Task>,
}

pub fn run(options: Options) -> Result<()> {
    let mode = FilterMode::parse(&options.filter)?;
    let (store, _config) = super::open_store(options.data_file)?;

    let visible = filter(store.tasks(), mode);

    let mut human = HumanOutput::new(format!("Tasks ({})", mode));
    human.push_summary("count", visible.len().to_string());
    if visible.is_empty() {
        human.push_detail("no tasks found");
    }
    for task in &visible {
        human.push_detail(super::task_line(task));
    }

    let data = ListData {
        filter: mode.as_str(),
        count: visible.len(),
        tasks: visible,
    };

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "list",
        &data,
        Some(&human),
    )
}
