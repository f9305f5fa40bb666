//! td edit command implementation.
//!
//! Drives an edit session: stage the task's current fields, overlay the
//! flags the user passed, then commit through the store.

use std::path::PathBuf;

use crate::error::Result;
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::session::EditSession;
use crate::task::Priority;

pub struct Options {
    pub id: String,
    pub text: Option<String>,
    pub priority: Option<String>,
    pub data_file: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub fn run(options: Options) -> Result<()> {
    let (mut store, _config) = super::open_store(options.data_file)?;
    let id = store.resolve_id(&options.id)?;

    let mut session = EditSession::new();
    session.begin(&store, id)?;
    if let Some(text) = options.text {
        session.set_text(text);
    }
    if let Some(priority) = options.priority.as_deref() {
        session.set_priority(Priority::parse(priority)?);
    }

    let committed = session.commit(&mut store)?;
    let task = store.get(committed).expect("just committed").clone();
    store.flush()?;

    let mut human = HumanOutput::new("Updated task");
    human.push_summary("id", super::short_id(&task));
    human.push_detail(super::task_line(&task));

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "edit",
        &task,
        Some(&human),
    )
}
