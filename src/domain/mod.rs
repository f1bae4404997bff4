//! Domain layer - Core business logic.
//!
//! - `foundation` - shared value objects (purpose, percentage, errors)
//! - `guide` - the guided-conversation protocol and its state machine

pub mod foundation;
pub mod guide;
