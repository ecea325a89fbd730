pub mod config_io;
pub mod filter_io;
pub mod source_io;
