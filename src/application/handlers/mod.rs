//! Application handlers.
//!
//! Handlers that turn requests into replies on the server side.

pub mod guide;

pub use guide::GuidedReplyEngine;
