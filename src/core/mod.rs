//! Core application layer
//!
//! This module provides the shared plumbing of the admin panel:
//! - Configuration management
//! - Structured logging system
//! - Error handling and type system

pub mod config;
pub mod error;
pub mod logging;

pub use config::Config;
pub use error::{AdminError, ErrorContext, ErrorResponse, Result};
pub use logging::Logger;
