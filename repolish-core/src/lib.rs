//! Repolish Core - Core library for the review rewriting service
//!
//! This crate provides the style catalog, prompt construction, and the
//! retry-wrapped chat-completion client behind the Repolish web
//! front-end.

pub mod client;
pub mod config;
pub mod error;
pub mod prompt;
pub mod retry;
pub mod secrets;
pub mod style;

pub use client::ReviewClient;
pub use config::Config;
pub use error::{Error, Result};
pub use retry::RetryPolicy;
pub use secrets::Secrets;
pub use style::Style;
