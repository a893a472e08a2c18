//! Document Module
//!
//! The single current document and the mailbox that replaces it.

mod mailbox;

pub use mailbox::{Document, DocumentMailbox};

/// Informational chunk streamed when a query arrives before any upload
pub const NO_DOCUMENT_MESSAGE: &str = "No document uploaded yet";
