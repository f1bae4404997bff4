//! Reply Backend Adapters.

mod process_relay;

pub use process_relay::ProcessRelay;
