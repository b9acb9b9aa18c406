//! Built-in rule table and fixed assistant messages.
//!
//! Order matters: device names are checked before plans, plans before the
//! generic "compare" and "cart" intents. "phone" is a keyword of the iPhone
//! rule, so any input mentioning a phone lands there first.

use lca_types::rule::ResponseRule;

const IPHONE_AUTHENTICATED: &str = "I can help you find the perfect iPhone! We have iPhone 15 Pro (from €999) and iPhone 15 (from €899) with our MagentaMobil plans. Would you like to compare models or see current offers? I can add one to your cart when you're ready!";

const IPHONE_GUEST: &str = "Great choice! iPhone 15 Pro starts at €999 with our MagentaMobil plans. To get personalized offers and one-click cart features, please log in!";

const SAMSUNG: &str = "Samsung Galaxy S24 Ultra (from €1,199) and S24+ (from €899) are popular! Both include amazing cameras and work perfectly with our 5G network. Want to compare specifications or bundle with a plan?";

const PLANS: &str = "Our MagentaMobil plans offer great value! MagentaMobil M (€39.95/month) includes 20GB, and MagentaMobil L (€54.95/month) has unlimited data. Which suits your usage better?";

const COMPARE: &str = "I love helping with comparisons! What devices would you like me to compare? I can show you detailed feature-by-feature breakdowns with current pricing and bundle options.";

const CART_AUTHENTICATED: &str = "I can help you add items to cart! What would you like to purchase? I'll guide you through model selection, colors, storage options, and suggest the best plans.";

const CART_GUEST: &str = "I'd love to help with purchases! Please log in first so I can add items to your cart and provide personalized recommendations.";

/// Reply for logged-in users when no rule matches.
pub const DEFAULT_AUTHENTICATED: &str = "I'm here to help with all your Telekom needs! Ask me about devices, plans, comparisons, or let me help you shop. What interests you most?";

/// Opening message for logged-in users.
pub const GREETING_AUTHENTICATED: &str = "Hi! I'm LCA, your personal shopping assistant. How can I help you find the perfect device or plan today?";

/// The built-in rules, highest priority first.
pub fn builtin_rules() -> Vec<ResponseRule> {
    vec![
        ResponseRule::new("iphone", &["iphone", "phone"], IPHONE_AUTHENTICATED)
            .with_guest_text(IPHONE_GUEST),
        ResponseRule::new("samsung", &["samsung", "galaxy"], SAMSUNG),
        ResponseRule::new("plans", &["plan", "tariff", "magenta"], PLANS),
        ResponseRule::new("compare", &["compare"], COMPARE),
        ResponseRule::new("cart", &["cart", "buy"], CART_AUTHENTICATED).with_guest_text(CART_GUEST),
    ]
}

/// Reply for guests when no rule matches.
///
/// `question` is the 1-based number of the question being answered and
/// `remaining` the number of demo questions left, this one included.
pub fn default_guest(question: u32, quota: u32, remaining: u32) -> String {
    format!(
        "That's interesting! I'm designed to help with shopping, recommendations, and more. \
         This is question {question} of {quota} in demo mode ({remaining} left including this one). \
         Log in for unlimited chat and automation!"
    )
}

/// The message that replaces every reply once a guest is out of questions.
pub fn quota_exceeded(quota: u32) -> String {
    format!(
        "You've reached the demo limit of {quota} questions. \
         Please log in to continue chatting and unlock full automation features!"
    )
}

/// Opening message for guests.
pub fn greeting_guest(quota: u32) -> String {
    format!(
        "Welcome! I'm LCA, your shopping assistant. I'm in demo mode - you can ask me \
         {quota} questions to try me out, then log in for the full experience!"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_rules_are_valid() {
        for rule in builtin_rules() {
            rule.validate().unwrap();
        }
    }

    #[test]
    fn test_builtin_rule_order() {
        let names: Vec<String> = builtin_rules().into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["iphone", "samsung", "plans", "compare", "cart"]);
    }

    #[test]
    fn test_only_iphone_and_cart_have_guest_variants() {
        let with_guest: Vec<String> = builtin_rules()
            .into_iter()
            .filter(|r| r.guest_text.is_some())
            .map(|r| r.name)
            .collect();
        assert_eq!(with_guest, vec!["iphone", "cart"]);
    }

    #[test]
    fn test_templates_embed_numbers() {
        let text = default_guest(2, 3, 2);
        assert!(text.contains("question 2 of 3"));
        assert!(text.contains("(2 left"));

        assert!(quota_exceeded(3).contains("demo limit of 3 questions"));
        assert!(greeting_guest(5).contains("ask me 5 questions"));
    }
}
