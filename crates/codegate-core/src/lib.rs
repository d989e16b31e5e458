//! Shared plumbing for Codegate services.
//!
//! Tracing setup, env-var configuration helpers, the injectable clock and
//! the HTTP observability layers.

pub mod clock;
pub mod config;
pub mod middleware;
pub mod tracing;
