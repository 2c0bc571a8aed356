pub mod cli;
pub mod content_type;
pub mod error;
pub mod files;
pub mod storage;
pub mod upload;

pub use cli::{run, Cli, Commands};
