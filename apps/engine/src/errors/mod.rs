//! Error handling for the Mousel engine.

pub mod domain;

pub use domain::{DomainError, ValidationKind};
