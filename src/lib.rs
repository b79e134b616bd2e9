pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod handler;
pub mod search;
pub mod service;
pub mod test_utils;

pub use error::{FinderError, Result};

/// Package version from Cargo.toml.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
