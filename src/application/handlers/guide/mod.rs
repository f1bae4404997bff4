//! Guide handlers - server-side reply generation.

mod generate_reply;

pub use generate_reply::{parse_panel_answer, GuidedReplyEngine, UNEXPECTED_FORMAT_MESSAGE};
