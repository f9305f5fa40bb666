//! Background save queue.
//!
//! All persistence writes go through one writer thread, so snapshots reach
//! storage strictly in the order the store issued them. Mutations never wait
//! on the disk; a caller that needs to know whether its change is durable
//! waits on the returned receipt or calls [`SaveQueue::flush`].

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};

use crate::error::{Error, Result};
use crate::storage::Storage;
use crate::task::TaskSnapshot;

enum Job {
    Save {
        snapshot: TaskSnapshot,
        done: Sender<Result<()>>,
    },
    /// Reports the last save failure since the previous flush, if any
    Flush { done: Sender<Result<()>> },
}

/// Handle on a queued save. Waiting is optional.
pub struct SaveReceipt {
    done: Receiver<Result<()>>,
}

impl SaveReceipt {
    /// Block until this save has been applied to storage
    pub fn wait(self) -> Result<()> {
        match self.done.recv() {
            Ok(result) => result,
            Err(_) => Err(Error::SaveFailed("save queue shut down".to_string())),
        }
    }
}

/// Single-writer queue applying snapshots in issuance order
pub struct SaveQueue {
    sender: Option<Sender<Job>>,
    handle: Option<JoinHandle<()>>,
}

impl SaveQueue {
    /// Start the writer thread for the given storage
    pub fn spawn(storage: Storage) -> Self {
        let (sender, receiver) = mpsc::channel::<Job>();
        let handle = thread::spawn(move || writer_loop(storage, receiver));
        Self {
            sender: Some(sender),
            handle: Some(handle),
        }
    }

    /// Queue a snapshot for persistence
    pub fn enqueue(&self, snapshot: TaskSnapshot) -> SaveReceipt {
        let (done, done_rx) = mpsc::channel();
        if let Some(sender) = &self.sender {
            if sender.send(Job::Save { snapshot, done }).is_err() {
                tracing::warn!("save queue writer is gone, snapshot dropped");
            }
        }
        SaveReceipt { done: done_rx }
    }

    /// Wait for every queued save, surfacing the most recent failure.
    ///
    /// A successful flush means the latest snapshot is durable.
    pub fn flush(&self) -> Result<()> {
        let (done, done_rx) = mpsc::channel();
        let Some(sender) = &self.sender else {
            return Err(Error::SaveFailed("save queue shut down".to_string()));
        };
        if sender.send(Job::Flush { done }).is_err() {
            return Err(Error::SaveFailed("save queue shut down".to_string()));
        }
        match done_rx.recv() {
            Ok(result) => result,
            Err(_) => Err(Error::SaveFailed("save queue shut down".to_string())),
        }
    }
}

impl Drop for SaveQueue {
    fn drop(&mut self) {
        // Closing the channel lets the writer drain remaining jobs and exit.
        self.sender.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn writer_loop(storage: Storage, receiver: Receiver<Job>) {
    let mut last_error: Option<String> = None;

    while let Ok(job) = receiver.recv() {
        match job {
            Job::Save { snapshot, done } => {
                let result = match storage.save(&snapshot) {
                    Ok(()) => Ok(()),
                    Err(err) => {
                        let message = err.to_string();
                        tracing::warn!(
                            path = %storage.data_file().display(),
                            error = %message,
                            "failed to persist task list"
                        );
                        last_error = Some(message.clone());
                        Err(Error::SaveFailed(message))
                    }
                };
                let _ = done.send(result);
            }
            Job::Flush { done } => {
                let result = match last_error.take() {
                    Some(message) => Err(Error::SaveFailed(message)),
                    None => Ok(()),
                };
                let _ = done.send(result);
            }
        }
    }
}
