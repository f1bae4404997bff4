//! Proposal Builder - guided curriculum proposal assistant
//!
//! Six guided panels (objective, outcomes, pedagogy, development,
//! implementation, evaluation) each converse with a generation service until
//! they hold a summary; an integration step then synthesizes the summaries
//! into one proposal. The crate contains both sides of that protocol: the
//! client controllers and the relay server that answers them.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
