// API modules
pub mod benchmark;
pub mod prime;
pub mod sink;
pub mod stats;
pub mod timer;

pub use benchmark::*;
pub use prime::*;
pub use sink::*;
pub use stats::*;
pub use timer::*;
