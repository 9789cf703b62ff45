//! Common utilities and definitions shared across modules
//!
//! This module contains the error type, resolver configuration and the
//! well-known names used by every resolution phase.

pub mod config;
pub mod consts;
pub mod error;

// Re-export commonly used items for convenience
pub use config::Config;
pub use consts::*;
pub use error::{Error, Result};
