//! Scripted response rules.
//!
//! A rule maps a set of keywords to a canned reply. The input matches when
//! its lowercased form contains any of the keywords. Rules carry an optional
//! guest variant; when absent, guests get the authenticated text.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::RuleError;

/// A static predicate-to-template mapping used for scripted replies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseRule {
    /// Short identifier shown by `lca rules` and in debug logs.
    pub name: String,
    /// Substrings tested against the lowercased input. Any one matching is enough.
    pub keywords: Vec<String>,
    /// Reply for logged-in users.
    pub authenticated_text: String,
    /// Reply for guests. Falls back to `authenticated_text` when `None`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guest_text: Option<String>,
}

impl ResponseRule {
    /// Build a rule whose reply is the same for guests and logged-in users.
    pub fn new(name: &str, keywords: &[&str], text: &str) -> Self {
        Self {
            name: name.to_string(),
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
            authenticated_text: text.to_string(),
            guest_text: None,
        }
    }

    /// Attach a guest-specific reply.
    pub fn with_guest_text(mut self, text: &str) -> Self {
        self.guest_text = Some(text.to_string());
        self
    }

    /// Whether the already-lowercased input contains any keyword.
    pub fn matches(&self, lowered_input: &str) -> bool {
        self.keywords.iter().any(|k| lowered_input.contains(k.as_str()))
    }

    /// The reply for the given authentication state.
    pub fn text_for(&self, is_authenticated: bool) -> &str {
        if is_authenticated {
            &self.authenticated_text
        } else {
            self.guest_text.as_deref().unwrap_or(&self.authenticated_text)
        }
    }

    /// Lowercase and trim every keyword in place.
    ///
    /// Rules loaded from `config.toml` may use any casing; matching is
    /// always done against the lowercased input.
    pub fn normalize(&mut self) {
        for keyword in &mut self.keywords {
            *keyword = keyword.trim().to_lowercase();
        }
    }

    /// Check that the rule can ever match and always has something to say.
    pub fn validate(&self) -> Result<(), RuleError> {
        if self.name.trim().is_empty() {
            return Err(RuleError::MissingName);
        }
        if self.keywords.is_empty() {
            return Err(RuleError::NoKeywords(self.name.clone()));
        }
        if self.keywords.iter().any(|k| k.trim().is_empty()) {
            return Err(RuleError::BlankKeyword(self.name.clone()));
        }
        if self.authenticated_text.trim().is_empty() {
            return Err(RuleError::BlankText(self.name.clone()));
        }
        if matches!(&self.guest_text, Some(t) if t.trim().is_empty()) {
            return Err(RuleError::BlankText(self.name.clone()));
        }
        Ok(())
    }
}

/// Validate every rule and reject repeated names.
///
/// The first offending rule, in order, is reported.
pub fn validate_rules(rules: &[ResponseRule]) -> Result<(), RuleError> {
    let mut seen = HashSet::new();
    for rule in rules {
        rule.validate()?;
        if !seen.insert(rule.name.as_str()) {
            return Err(RuleError::DuplicateName(rule.name.clone()));
        }
    }
    Ok(())
}
