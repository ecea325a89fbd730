pub mod task;
pub mod dimension;
pub mod filter;
pub mod config;

pub use task::*;
pub use dimension::*;
pub use filter::*;
pub use config::*;
