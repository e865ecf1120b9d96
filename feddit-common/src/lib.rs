//! # Feddit Common Library
//!
//! Shared code for the Feddit analyzer binaries:
//! - Common error type
//! - TOML bootstrap configuration and config file discovery

pub mod config;
pub mod error;

pub use error::{Error, Result};
