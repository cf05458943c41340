pub mod builder;
pub mod path;

pub use builder::*;
pub use path::*;
