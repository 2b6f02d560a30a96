pub mod lego_set;
pub mod manual;

pub use lego_set::{LegoSet, Model};
pub use manual::Manual;
