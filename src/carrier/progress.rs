//! Advisory progress reporting and cooperative cancellation.

use crate::config::PROGRESS_INTERVAL_BITS;
use crate::error::{Error, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Sender, SyncSender};
use std::sync::Arc;

/// A progress tick.
///
/// Units are bits for embedding and extraction, carriers for batches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub processed: usize,
    pub total: usize,
}

impl Progress {
    /// Completion in `0.0..=1.0`.
    pub fn fraction(&self) -> f32 {
        if self.total == 0 {
            return 1.0;
        }
        (self.processed as f32 / self.total as f32).min(1.0)
    }

    /// Whether every unit has been processed.
    pub fn is_complete(&self) -> bool {
        self.processed >= self.total
    }
}

/// Receives progress ticks.
///
/// Errors returned here are logged and otherwise ignored; they never
/// abort the operation that is reporting.
pub trait ProgressObserver {
    fn on_progress(&mut self, progress: Progress) -> Result<()>;
}

/// Discards all ticks.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {
    fn on_progress(&mut self, _progress: Progress) -> Result<()> {
        Ok(())
    }
}

impl<F> ProgressObserver for F
where
    F: FnMut(Progress) -> Result<()>,
{
    fn on_progress(&mut self, progress: Progress) -> Result<()> {
        self(progress)
    }
}

impl ProgressObserver for Vec<Progress> {
    fn on_progress(&mut self, progress: Progress) -> Result<()> {
        self.push(progress);
        Ok(())
    }
}

impl ProgressObserver for SyncSender<Progress> {
    fn on_progress(&mut self, progress: Progress) -> Result<()> {
        self.send(progress)
            .map_err(|_| Error::Worker("progress receiver dropped".to_string()))
    }
}

impl ProgressObserver for Sender<Progress> {
    fn on_progress(&mut self, progress: Progress) -> Result<()> {
        self.send(progress)
            .map_err(|_| Error::Worker("progress receiver dropped".to_string()))
    }
}

/// Rate-limits ticks to one per `PROGRESS_INTERVAL_BITS` and shields the
/// caller from observer failures.
pub(crate) struct Ticker<'a> {
    observer: &'a mut dyn ProgressObserver,
    total: usize,
    disabled: bool,
}

/// Report a single tick, logging instead of failing.
pub(crate) fn report_once(observer: &mut dyn ProgressObserver, progress: Progress) {
    if let Err(e) = observer.on_progress(progress) {
        log::warn!("progress observer failed: {}", e);
    }
}

impl<'a> Ticker<'a> {
    pub(crate) fn new(observer: &'a mut dyn ProgressObserver, total: usize) -> Self {
        Self {
            observer,
            total,
            disabled: false,
        }
    }

    pub(crate) fn tick(&mut self, processed: usize) {
        if processed % PROGRESS_INTERVAL_BITS == 0 {
            self.report(processed, self.total);
        }
    }

    pub(crate) fn finish(&mut self, processed: usize) {
        self.report(processed, processed);
    }

    fn report(&mut self, processed: usize, total: usize) {
        if self.disabled {
            return;
        }
        let progress = Progress {
            processed,
            total,
        };
        log::trace!("progress {:.1}%", progress.fraction() * 100.0);
        if let Err(e) = self.observer.on_progress(progress) {
            log::warn!("progress observer failed, no further ticks: {}", e);
            self.disabled = true;
        }
    }
}

/// Shared cancellation flag, checked at every pixel boundary.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    /// A fresh, uncancelled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Every clone observes it.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Whether [`CancelToken::cancel`] was called on any clone.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    /// Return [`Error::Cancelled`] if cancellation was requested.
    pub fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            Err(Error::Cancelled)
        } else {
            Ok(())
        }
    }
}
