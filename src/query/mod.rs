//! Query Module
//!
//! Resolves a query to an answer from the cache or the answering service.

mod resolver;

pub use resolver::{QueryResolver, Resolution};
