//! Interactive CLI chat experience.
//!
//! Welcome banner, paced greeting and replies with a typing spinner, slash
//! commands, the mock voice toggle, and the guest demo footer. Entry point:
//! `loop_runner::run_chat_loop`.

pub mod banner;
pub mod commands;
pub mod input;
pub mod loop_runner;
pub mod renderer;
