//! Business logic for the LCA shopping assistant.
//!
//! The scripted responder and its rule table, the append-only conversation
//! log, guest quota bookkeeping, the paced chat service, and the voice-mode
//! toggle. Depends only on `lca-types` -- never on `lca-infra` or any IO.

pub mod chat;
pub mod responder;
pub mod voice;
