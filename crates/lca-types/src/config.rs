//! Assistant configuration types.
//!
//! `AssistantConfig` represents the top-level `config.toml` that controls
//! the assistant's display name, the guest quota, presentation pacing, and
//! optionally a replacement rule table.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::rule::ResponseRule;
use crate::session::DEFAULT_GUEST_QUOTA;

/// Top-level configuration for the assistant.
///
/// Loaded from `~/.lca/config.toml`. All fields have sensible defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantConfig {
    /// Name shown in the chat banner.
    #[serde(default = "default_assistant_name")]
    pub assistant_name: String,

    /// Subtitle shown under the name.
    #[serde(default = "default_tagline")]
    pub tagline: String,

    /// Free questions allowed before a guest must log in.
    #[serde(default = "default_guest_quota")]
    pub guest_quota: u32,

    /// Delay before the opening greeting appears.
    #[serde(default = "default_greeting_delay_ms")]
    pub greeting_delay_ms: u64,

    /// Delay between a user message and the scripted reply ("typing").
    #[serde(default = "default_reply_delay_ms")]
    pub reply_delay_ms: u64,

    /// How long voice mode keeps the "listening" flag raised.
    #[serde(default = "default_listen_timeout_ms")]
    pub listen_timeout_ms: u64,

    /// Replacement rule table. Empty means "use the built-in catalog".
    #[serde(default)]
    pub rules: Vec<ResponseRule>,
}

fn default_assistant_name() -> String {
    "LCA Assistant".to_string()
}

fn default_tagline() -> String {
    "Life Contextual Advisor".to_string()
}

fn default_guest_quota() -> u32 {
    DEFAULT_GUEST_QUOTA
}

fn default_greeting_delay_ms() -> u64 {
    500
}

fn default_reply_delay_ms() -> u64 {
    1500
}

fn default_listen_timeout_ms() -> u64 {
    3000
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            assistant_name: default_assistant_name(),
            tagline: default_tagline(),
            guest_quota: default_guest_quota(),
            greeting_delay_ms: default_greeting_delay_ms(),
            reply_delay_ms: default_reply_delay_ms(),
            listen_timeout_ms: default_listen_timeout_ms(),
            rules: Vec::new(),
        }
    }
}

impl AssistantConfig {
    pub fn greeting_delay(&self) -> Duration {
        Duration::from_millis(self.greeting_delay_ms)
    }

    pub fn reply_delay(&self) -> Duration {
        Duration::from_millis(self.reply_delay_ms)
    }

    pub fn listen_timeout(&self) -> Duration {
        Duration::from_millis(self.listen_timeout_ms)
    }

    /// Zero out the presentation delays (`--no-delay`, one-shot commands).
    pub fn without_delays(mut self) -> Self {
        self.greeting_delay_ms = 0;
        self.reply_delay_ms = 0;
        self
    }
}
