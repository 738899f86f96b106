pub mod engine;
pub mod extract;
pub mod types;

pub use engine::*;
pub use extract::*;
pub use types::*;
