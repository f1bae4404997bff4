//! Foundation module - Shared domain primitives.
//!
//! Contains the value objects and error types that form the vocabulary
//! of the proposal builder domain.

mod errors;
mod percentage;
mod purpose;

pub use errors::ValidationError;
pub use percentage::Percentage;
pub use purpose::Purpose;
