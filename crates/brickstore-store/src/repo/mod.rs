//! Repository layer for the LegoSet aggregate

pub mod lego_set_repo;
pub mod sql;

pub use lego_set_repo::LegoSetRepository;
