//! Brickstore Store - SQLite persistence for the LEGO set aggregate
//!
//! Provides:
//! - Connection helpers and embedded, checksummed migrations
//! - A CLOB handle over SQLite text cells
//! - `LegoSetRepository`, which derives every table and column name from
//!   the configured naming strategy

pub mod clob;
pub mod db;
pub mod errors;
pub mod migrations;
pub mod repo;

// Re-export key types
pub use clob::SqliteClob;
pub use errors::Result;
pub use repo::LegoSetRepository;
