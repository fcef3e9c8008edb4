//! Mythogen — LLM-backed procedural religion generator service.
//!
//! Validates thematic parameters, prompts a generative-text backend for a
//! structured religion document, and serves the results over a JSON REST API
//! with transient in-memory storage.

pub mod assemble;
pub mod backend;
pub mod config;
pub mod error;
pub mod generator;
pub mod prompt;
pub mod server;
pub mod store;
pub mod types;
