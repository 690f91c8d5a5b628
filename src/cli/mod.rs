//! CLI operation handlers.
//!
//! - [`moderate`]: Runs one moderation pass over the configured repository
//!
//! Report formatting is in [`output`].

pub mod moderate;
pub mod output;
