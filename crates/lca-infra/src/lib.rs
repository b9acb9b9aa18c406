//! Infrastructure for the LCA shopping assistant.
//!
//! Resolves the data directory and loads `config.toml` from it. Nothing
//! else touches the filesystem.

pub mod config;
pub mod filesystem;
