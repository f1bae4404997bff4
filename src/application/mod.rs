//! Application layer.
//!
//! - `handlers` - server-side reply generation
//! - `client` - controllers for the guided panels and integration step

pub mod client;
pub mod handlers;

pub use client::{GuideSession, IntegrationController, PanelController};
pub use handlers::GuidedReplyEngine;
