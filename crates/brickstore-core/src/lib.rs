//! Brickstore Core - mapping policy for the LEGO set aggregate
//!
//! This crate provides:
//! - The `LegoSet` aggregate (`Manual`, `Model`)
//! - Naming strategies translating logical names into schema names
//! - Lifecycle events, including id assignment before save
//! - Reading converters for large text columns
//! - The error and logging facilities shared with the store and CLI

pub mod config;
pub mod convert;
pub mod errors;
pub mod events;
pub mod logging_facility;
pub mod mapping;
pub mod model;
pub mod schema;

// Re-export commonly used types
pub use config::{AggregateConfiguration, BrickstoreConfig};
pub use errors::{BrickstoreError, ExError, ExErrorKind, Result};
pub use model::{LegoSet, Manual, Model};
