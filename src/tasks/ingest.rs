//! Upload Ingest Task
//!
//! Bounded FIFO of pending uploads with a single consumer that installs each
//! one into the document mailbox.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::document::DocumentMailbox;
use crate::error::{AppError, Result};

// == Pending Upload ==
/// Raw document text waiting to be installed.
#[derive(Debug)]
pub struct PendingUpload {
    pub text: String,
    pub queued_at: DateTime<Utc>,
}

/// Consumer side of the upload queue, owned by the ingest task.
pub type UploadReceiver = mpsc::Receiver<PendingUpload>;

// == Upload Queue ==
/// Producer side of the upload queue, cloned into every request handler.
///
/// Enqueueing never waits: a full queue is reported back immediately.
#[derive(Debug, Clone)]
pub struct UploadQueue {
    sender: mpsc::Sender<PendingUpload>,
}

/// Creates the upload queue holding at most `capacity` pending uploads.
pub fn upload_channel(capacity: usize) -> (UploadQueue, UploadReceiver) {
    let (sender, receiver) = mpsc::channel(capacity.max(1));
    (UploadQueue { sender }, receiver)
}

impl UploadQueue {
    /// Queues `text` for installation.
    ///
    /// # Errors
    /// - `AppError::Busy` if the queue is full
    /// - `AppError::Internal` if the ingest task is no longer running
    pub fn enqueue(&self, text: String) -> Result<()> {
        let upload = PendingUpload {
            text,
            queued_at: Utc::now(),
        };

        match self.sender.try_send(upload) {
            Ok(()) => {
                debug!(pending = self.pending(), "Upload queued");
                Ok(())
            }
            Err(TrySendError::Full(_)) => {
                warn!(capacity = self.capacity(), "Upload queue full, rejecting upload");
                Err(AppError::Busy(
                    "Upload queue is full, try again shortly".to_string(),
                ))
            }
            Err(TrySendError::Closed(_)) => Err(AppError::Internal(
                "Upload worker is not running".to_string(),
            )),
        }
    }

    /// Number of uploads queued but not yet picked up by the worker.
    pub fn pending(&self) -> usize {
        self.sender.max_capacity() - self.sender.capacity()
    }

    pub fn capacity(&self) -> usize {
        self.sender.max_capacity()
    }
}

/// Spawns the single worker that applies queued uploads in order.
///
/// After each install the worker sleeps for `settle_delay` before taking the
/// next upload. The task ends once every `UploadQueue` has been dropped; the
/// returned handle lets shutdown abort it earlier.
pub fn spawn_ingest_task(
    mut receiver: UploadReceiver,
    mailbox: Arc<DocumentMailbox>,
    settle_delay: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(
            "Starting upload ingest task with settle delay of {}ms",
            settle_delay.as_millis()
        );

        while let Some(upload) = receiver.recv().await {
            let waited_ms = (Utc::now() - upload.queued_at).num_milliseconds();
            let version = mailbox.set(upload.text).await;

            info!(version, waited_ms, "Processed new document");

            if !settle_delay.is_zero() {
                tokio::time::sleep(settle_delay).await;
            }
        }

        info!("Upload queue closed, ingest task exiting");
    })
}
