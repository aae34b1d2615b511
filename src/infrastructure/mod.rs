//! Infrastructure layer module
//!
//! This module contains the application-edge plumbing:
//! - Configuration management
//! - Logging infrastructure

pub mod config;
pub mod logging;
