//! portfolio-qa - question answering over a static knowledge document
//!
//! Serves a small HTTP API that embeds a knowledge file into a prompt, sends
//! it with the caller's question to an OpenAI-compatible completions API,
//! and relays the answer.

pub mod cli;
pub mod config;
pub mod error;
pub mod handlers;
pub mod knowledge;
pub mod middleware;
pub mod prompt;
pub mod provider;
pub mod telemetry;
