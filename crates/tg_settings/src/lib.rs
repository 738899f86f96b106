pub mod defaults;
pub mod settings;

pub use settings::{EmptyPolicy, Settings};
