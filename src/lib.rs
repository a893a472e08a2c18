//! Doc Query - single-document question answering server
//!
//! Keeps one current document, answers queries about it through an external
//! answering service, caches answers in a bounded LRU cache and streams them
//! back as server-sent events.

pub mod answer;
pub mod api;
pub mod cache;
pub mod config;
pub mod document;
pub mod error;
pub mod models;
pub mod query;
pub mod stream;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use tasks::spawn_ingest_task;
