//! Logical-to-physical name mapping
//!
//! Entities describe themselves with [`EntityType`] and [`PersistentProperty`]
//! constants; a [`NamingStrategy`] turns those into table and column names.

pub mod alias_strategy;
pub mod aliases;
pub mod naming;
pub mod property;

pub use alias_strategy::AliasNamingStrategy;
pub use aliases::ColumnAliases;
pub use naming::{to_snake_case, DefaultNamingStrategy, NamingStrategy};
pub use property::{EntityType, PersistentProperty};
