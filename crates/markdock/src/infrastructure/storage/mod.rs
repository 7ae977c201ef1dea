//! Storage infrastructure: settings file persistence.
//!
//! The `config` sub-module handles:
//!
//! - Resolving the platform-appropriate settings directory and creating it.
//! - Reading the JSON settings file, falling back to defaults on any error.
//! - Writing the file atomically (temp file in the same directory, then rename).

pub mod config;
