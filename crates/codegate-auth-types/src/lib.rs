//! Types that live at the trust boundary with the upstream reverse proxy.
//!
//! Provides the session cookie builders, the `ClientIdentity` and
//! `ForwardedContext` extractors, and session-id generation.

pub mod cookie;
pub mod forwarded;
pub mod identity;
pub mod session;
