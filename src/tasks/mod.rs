//! Background Tasks Module
//!
//! Contains the long-lived workers that run alongside request handling.
//!
//! # Tasks
//! - Upload ingest: drains queued uploads into the document mailbox, one at
//!   a time, in arrival order

mod ingest;

pub use ingest::{spawn_ingest_task, upload_channel, PendingUpload, UploadQueue, UploadReceiver};
