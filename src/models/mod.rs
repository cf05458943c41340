pub mod place;
pub mod row_model;

pub use place::*;
pub use row_model::*;
