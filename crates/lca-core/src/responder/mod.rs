//! Scripted dialogue responder.
//!
//! Maps free-text input plus a session snapshot to exactly one reply by
//! walking an ordered rule table. There is no language understanding here:
//! matching is a substring test over the lowercased input.

pub mod catalog;
pub mod table;

use lca_types::config::AssistantConfig;
use lca_types::error::RuleError;
use lca_types::rule::ResponseRule;
use lca_types::session::{DEFAULT_GUEST_QUOTA, SessionState};
use tracing::debug;

pub use table::RuleTable;

/// Deterministic keyword-to-reply responder.
///
/// `respond` is a pure function of `(input, session)`: it never mutates the
/// session. Appending turns and counting guest questions is the caller's job
/// (see [`crate::chat::service::ChatService`]).
#[derive(Debug, Clone)]
pub struct Responder {
    rules: RuleTable,
    guest_quota: u32,
}

impl Responder {
    pub fn new(rules: RuleTable, guest_quota: u32) -> Self {
        Self { rules, guest_quota }
    }

    /// Build the responder described by a loaded configuration.
    pub fn from_config(config: &AssistantConfig) -> Result<Self, RuleError> {
        let rules = RuleTable::from_overrides(config.rules.clone())?;
        Ok(Self::new(rules, config.guest_quota))
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    pub fn guest_quota(&self) -> u32 {
        self.guest_quota
    }

    /// Produce the reply for `input` in the given session.
    ///
    /// A guest who has used up the quota gets the limit message no matter
    /// what they typed; the rule table is not consulted.
    pub fn respond(&self, input: &str, session: &SessionState) -> String {
        if session.quota_exhausted(self.guest_quota) {
            debug!(
                used = session.queries_used_this_session,
                quota = self.guest_quota,
                "Guest quota exhausted"
            );
            return self.quota_exceeded_message();
        }

        let lowered = input.to_lowercase();
        if let Some(rule) = self.rules.first_match(&lowered) {
            debug!(rule = %rule.name, authenticated = session.is_authenticated, "Rule matched");
            return rule.text_for(session.is_authenticated).to_string();
        }

        debug!(authenticated = session.is_authenticated, "No rule matched, using default reply");
        if session.is_authenticated {
            catalog::DEFAULT_AUTHENTICATED.to_string()
        } else {
            let used = session.queries_used_this_session;
            catalog::default_guest(
                used + 1,
                self.guest_quota,
                self.guest_quota.saturating_sub(used),
            )
        }
    }

    /// The rule that would answer `input`, ignoring quota.
    pub fn matching_rule(&self, input: &str) -> Option<&ResponseRule> {
        self.rules.first_match(&input.to_lowercase())
    }

    pub fn quota_exceeded_message(&self) -> String {
        catalog::quota_exceeded(self.guest_quota)
    }

    /// The opening message for a fresh session.
    pub fn greeting(&self, session: &SessionState) -> String {
        if session.is_authenticated {
            catalog::GREETING_AUTHENTICATED.to_string()
        } else {
            catalog::greeting_guest(self.guest_quota)
        }
    }
}

impl Default for Responder {
    fn default() -> Self {
        Self::new(RuleTable::builtin(), DEFAULT_GUEST_QUOTA)
    }
}
