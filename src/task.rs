//! Run the CPU-bound pipeline on a background thread.
//!
//! The embed/extract loops never yield, so the caller hands the whole job
//! to a worker and gets back a handle: progress arrives on a bounded
//! channel, cancellation is a shared flag, and [`StegoTask::join`] yields
//! the result.

use crate::carrier::{CancelToken, Image, Progress};
use crate::config::{DecodeOptions, EncodeOptions, PROGRESS_BACKLOG};
use crate::error::{Error, Result};
use crate::pipeline::{decode_with, encode_with};
use std::sync::mpsc::{self, Receiver, SyncSender};
use std::thread::{self, JoinHandle};

/// Handle to a running encode or decode.
pub struct StegoTask<T> {
    handle: JoinHandle<Result<T>>,
    progress: Receiver<Progress>,
    cancel: CancelToken,
}

impl<T: Send + 'static> StegoTask<T> {
    fn spawn<F>(name: &str, job: F) -> Result<Self>
    where
        F: FnOnce(&mut SyncSender<Progress>, &CancelToken) -> Result<T> + Send + 'static,
    {
        // The worker waits once this many ticks are unread.
        let (mut tx, rx) = mpsc::sync_channel(PROGRESS_BACKLOG);
        let cancel = CancelToken::new();
        let worker_cancel = cancel.clone();

        let handle = thread::Builder::new()
            .name(name.to_string())
            .spawn(move || job(&mut tx, &worker_cancel))?;

        Ok(Self {
            handle,
            progress: rx,
            cancel,
        })
    }

    /// Progress ticks emitted by the worker.
    pub fn progress(&self) -> &Receiver<Progress> {
        &self.progress
    }

    /// Ask the worker to stop at the next pixel boundary.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// A token that cancels this task.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Whether the worker has returned.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the worker and return its outcome.
    ///
    /// Unread progress is discarded.
    pub fn join(self) -> Result<T> {
        let Self {
            handle, progress, ..
        } = self;
        drop(progress);

        handle
            .join()
            .map_err(|_| Error::Worker("worker thread panicked".to_string()))?
    }
}

/// Start hiding `message` in a copy of `image` on a worker thread.
pub fn spawn_encode(
    image: Image,
    message: String,
    password: Option<String>,
    options: EncodeOptions,
) -> Result<StegoTask<Image>> {
    StegoTask::spawn("stego-encode", move |tx, cancel| {
        encode_with(
            &image,
            &message,
            password.as_deref(),
            &options,
            tx,
            cancel,
        )
    })
}

/// Start recovering a message from `image` on a worker thread.
pub fn spawn_decode(
    image: Image,
    password: Option<String>,
    options: DecodeOptions,
) -> Result<StegoTask<String>> {
    StegoTask::spawn("stego-decode", move |tx, cancel| {
        decode_with(&image, password.as_deref(), &options, tx, cancel)
    })
}
