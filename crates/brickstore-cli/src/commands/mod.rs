pub mod context;
pub mod schema;
pub mod sets;
