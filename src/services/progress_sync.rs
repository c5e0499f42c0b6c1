//! Fire-and-forget remote persistence of reading progress.
//!
//! Scroll events arrive far faster than the network round-trips, so saves
//! coalesce: at most one snapshot is in flight, and a snapshot queued while
//! one is in flight replaces any still-pending one. The final position
//! therefore always wins and a stale in-flight response can never overwrite
//! a newer value. Failures are logged and swallowed — progress display is
//! not a reliability-critical feature.

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread::{self, JoinHandle};

use log::warn;

use crate::types::errors::ProgressError;
use crate::types::progress::ReadingProgress;

/// Destination for progress snapshots. The HTTP sink is the production
/// implementation; tests record into memory.
pub trait ProgressSink: Send {
    fn persist(&self, progress: &ReadingProgress) -> Result<(), ProgressError>;
}

/// Posts snapshots to `POST /api/books/{id}/progress`.
pub struct HttpProgressSink {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl HttpProgressSink {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

impl ProgressSink for HttpProgressSink {
    fn persist(&self, progress: &ReadingProgress) -> Result<(), ProgressError> {
        let url = format!("{}/api/books/{}/progress", self.base_url, progress.book_id);
        let response = self
            .client
            .post(&url)
            .json(progress)
            .send()
            .map_err(|e| ProgressError::SyncError(e.to_string()))?;
        if !response.status().is_success() {
            return Err(ProgressError::SyncError(format!(
                "{} returned {}",
                url,
                response.status()
            )));
        }
        Ok(())
    }
}

/// Background sender with a coalescing queue.
pub struct ProgressSync {
    tx: Option<Sender<ReadingProgress>>,
    worker: Option<JoinHandle<()>>,
}

impl ProgressSync {
    /// Spawns the sender thread. The sink is owned by the worker.
    pub fn new(sink: Box<dyn ProgressSink>) -> Self {
        let (tx, rx) = mpsc::channel::<ReadingProgress>();
        let worker = thread::spawn(move || Self::run(rx, sink));
        Self {
            tx: Some(tx),
            worker: Some(worker),
        }
    }

    fn run(rx: Receiver<ReadingProgress>, sink: Box<dyn ProgressSink>) {
        while let Ok(mut snapshot) = rx.recv() {
            // Drain anything that queued up while we were busy; only the
            // newest snapshot is worth sending.
            loop {
                match rx.try_recv() {
                    Ok(newer) => snapshot = newer,
                    Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
                }
            }
            if let Err(e) = sink.persist(&snapshot) {
                warn!(
                    "failed to save progress for {}: {}",
                    snapshot.book_id, e
                );
            }
        }
    }

    /// Queues a snapshot. Never blocks; the caller does not observe the
    /// outcome.
    pub fn queue(&self, progress: ReadingProgress) {
        if let Some(ref tx) = self.tx {
            // A send error means the worker is gone; nothing left to do.
            let _ = tx.send(progress);
        }
    }

    /// Queues a final snapshot, then waits for the worker to drain.
    pub fn flush_and_stop(mut self, last: Option<ReadingProgress>) {
        if let Some(progress) = last {
            self.queue(progress);
        }
        self.tx.take();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

impl Drop for ProgressSync {
    fn drop(&mut self) {
        self.tx.take();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}
