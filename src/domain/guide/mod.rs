//! Guide module - the guided-conversation protocol.
//!
//! - `reply` - request and reply shapes exchanged with the service
//! - `panel` - per-panel state and its transition function
//! - `progress` - completion across panels
//! - `aggregate` - summary snapshot consumed by the integration step
//! - `context` - summaries a relay session carries into later prompts
//! - `catalog` - opening questions, options and personas per purpose

pub mod aggregate;
pub mod catalog;
pub mod context;
pub mod panel;
pub mod progress;
pub mod reply;

pub use aggregate::AggregateState;
pub use catalog::{guide_for, PurposeGuide, ANSWER_FORMAT_INSTRUCTION};
pub use context::SummaryContext;
pub use panel::{ConversationState, PanelPhase};
pub use progress::GuideProgress;
pub use reply::{GuideRequest, ServiceReply};
