//! Conversation log, session bookkeeping, and the paced chat service.
//!
//! `ChatService` is the single caller of the responder: it filters blank
//! input, enforces the guest quota, appends turns to the log, and waits out
//! the presentation delays.

pub mod log;
pub mod service;
pub mod session;
