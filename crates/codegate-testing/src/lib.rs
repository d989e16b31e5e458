//! Test utilities for Codegate services.
//!
//! Provides `MockProxy` (trusted-proxy header sets) and response body helpers.
//! Import from tests only; never from production code.

pub mod body;
pub mod proxy;
