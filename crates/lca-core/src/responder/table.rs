//! Ordered, validated rule table.

use lca_types::error::RuleError;
use lca_types::rule::{ResponseRule, validate_rules};

use super::catalog;

/// An ordered list of response rules, evaluated top to bottom.
///
/// Built once at startup and never modified afterwards.
#[derive(Debug, Clone)]
pub struct RuleTable {
    rules: Vec<ResponseRule>,
}

impl RuleTable {
    /// Build a table from caller-supplied rules.
    ///
    /// Keywords are normalized to lowercase. Every rule must validate and
    /// rule names must be unique.
    pub fn new(mut rules: Vec<ResponseRule>) -> Result<Self, RuleError> {
        for rule in &mut rules {
            rule.normalize();
        }
        validate_rules(&rules)?;
        Ok(Self { rules })
    }

    /// The built-in device/plan/intent catalog.
    pub fn builtin() -> Self {
        Self {
            rules: catalog::builtin_rules(),
        }
    }

    /// Use `rules` when non-empty, otherwise the built-in catalog.
    pub fn from_overrides(rules: Vec<ResponseRule>) -> Result<Self, RuleError> {
        if rules.is_empty() {
            Ok(Self::builtin())
        } else {
            Self::new(rules)
        }
    }

    /// First rule whose keywords appear in the already-lowercased input.
    pub fn first_match(&self, lowered_input: &str) -> Option<&ResponseRule> {
        self.rules.iter().find(|rule| rule.matches(lowered_input))
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResponseRule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_table() {
        let table = RuleTable::builtin();
        assert_eq!(table.len(), 5);
        assert!(!table.is_empty());
    }

    #[test]
    fn test_first_match_respects_order() {
        let table = RuleTable::builtin();
        // "phone" (iphone rule) outranks "plan" (plans rule).
        let rule = table.first_match("which phone plan is best").unwrap();
        assert_eq!(rule.name, "iphone");
        // "galaxy" outranks "compare".
        let rule = table.first_match("compare galaxy models").unwrap();
        assert_eq!(rule.name, "samsung");
        assert!(table.first_match("hello there").is_none());
    }

    #[test]
    fn test_new_normalizes_keywords() {
        let rule = ResponseRule {
            name: "router".to_string(),
            keywords: vec!["WiFi".to_string()],
            authenticated_text: "Routers!".to_string(),
            guest_text: None,
        };
        let table = RuleTable::new(vec![rule]).unwrap();
        assert_eq!(table.first_match("my wifi is slow").unwrap().name, "router");
    }

    #[test]
    fn test_new_rejects_duplicates() {
        let err = RuleTable::new(vec![
            ResponseRule::new("tv", &["tv"], "one"),
            ResponseRule::new("tv", &["television"], "two"),
        ])
        .unwrap_err();
        assert!(matches!(err, RuleError::DuplicateName(name) if name == "tv"));
    }

    #[test]
    fn test_new_rejects_invalid_rule() {
        let err = RuleTable::new(vec![ResponseRule::new("empty", &[], "text")]).unwrap_err();
        assert!(matches!(err, RuleError::NoKeywords(_)));
    }

    #[test]
    fn test_from_overrides() {
        let table = RuleTable::from_overrides(Vec::new()).unwrap();
        assert_eq!(table.len(), 5);

        let table =
            RuleTable::from_overrides(vec![ResponseRule::new("tv", &["tv"], "MagentaTV")]).unwrap();
        assert_eq!(table.len(), 1);
        assert!(table.first_match("iphone").is_none());
    }
}
