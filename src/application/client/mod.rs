//! Guide client - controllers that drive the panels through a gateway.
//!
//! - `panel` - one panel's conversation and view
//! - `integration` - proposal synthesis from completed panels
//! - `session` - the full set of panels plus integration
//! - `view` - framework-neutral view models

pub mod integration;
pub mod panel;
pub mod session;
pub mod view;

pub use integration::{IntegrationController, IntegrationError, SynthesisOutcome};
pub use panel::{PanelController, PanelError, PanelUpdate};
pub use session::{GuideSession, SessionError};
pub use view::{IntegrationOutput, IntegrationView, PanelOutput, PanelView};
