pub mod animator;
pub mod gate;
pub mod scheduler;

pub use animator::*;
pub use gate::*;
pub use scheduler::*;
