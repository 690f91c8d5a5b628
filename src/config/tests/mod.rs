//! Unit tests for configuration loading and precedence.
//!
//! Tests are organised into modules by functional area:
//! - `helpers`: Shared test utilities
//! - `precedence`: Layer precedence tests
//! - `field_resolution`: Token, repository, and cursor path resolution tests
//! - `loading`: End-to-end loading from environment and CLI arguments
//! - `validation`: Kinds parsing and consistency checks

mod field_resolution;
mod helpers;
mod loading;
mod precedence;
