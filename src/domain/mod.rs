//! # Domain Layer
//!
//! Core business logic of the pricing and booking engine: validated value
//! objects, entities, and the pure rate formula engine. Nothing in this
//! layer performs I/O or depends on infrastructure.

pub mod entities;
pub mod errors;
pub mod services;
pub mod value_objects;

pub use errors::{DomainError, DomainResult};
