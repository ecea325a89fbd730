pub mod attrs;
pub mod build;
pub mod files;
pub mod filter;
pub mod notify;
pub mod pipeline;
pub mod sort;
