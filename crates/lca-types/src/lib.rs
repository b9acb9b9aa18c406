//! Shared domain types for the LCA shopping assistant.
//!
//! Conversation turns, per-session state, scripted response rules,
//! configuration, and the error types used across the workspace.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod rule;
pub mod session;
