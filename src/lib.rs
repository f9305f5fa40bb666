//! td - Personal Task List Library
//!
//! This library provides the core functionality for the td CLI tool: a
//! single-user task list with durable local storage.
//!
//! # Core Concepts
//!
//! - **Tasks**: To-do items with stable ids, priority, and timestamps
//! - **TaskStore**: In-memory source of truth that writes through to storage
//!   after every mutation
//! - **Filtering**: Pure derivation of the visible subset (all/ongoing/completed)
//! - **Edit Sessions**: Staging area for an in-progress edit or new task
//! - **Save Queue**: Single-writer queue applying saves in issuance order
//!
//! # Module Organization
//!
//! - `cli`: Command-line interface using clap
//! - `config`: Configuration loading from `config.toml`
//! - `error`: Error types and result aliases
//! - `task`: Task records, snapshots, and legacy migration
//! - `store`: In-memory task store with write-through persistence
//! - `filter`: Filter modes and pure list filtering
//! - `session`: Edit session staging
//! - `storage`: File storage and atomic writes
//! - `saver`: Background save queue
//! - `lock`: File locking for concurrency safety

pub mod cli;
pub mod config;
pub mod error;
pub mod filter;
pub mod lock;
pub mod output;
pub mod saver;
pub mod session;
pub mod storage;
pub mod store;
pub mod task;

pub use error::{Error, Result};
