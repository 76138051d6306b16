//! postcraft: LLM-Drafted Social Media Posts
//!
//! Generates batches of short posts across five content pillars, enforces a
//! per-client quota, falls back to templates when the model is unavailable,
//! and keeps the drafts in a spreadsheet-backed store.

pub mod cli;
pub mod config;
pub mod error;
pub mod generation;
pub mod logging;
pub mod pillar;
pub mod provider;
pub mod rate_limit;
pub mod server;
pub mod sheets;
