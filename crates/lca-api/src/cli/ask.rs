//! One-shot question command.

use anyhow::{Result, bail};
use console::style;

use lca_core::responder::Responder;
use lca_types::session::SessionState;

use crate::state::AppState;

/// Answer a single question without starting a chat session.
///
/// The session snapshot is built from the flags, so the guest quota can be
/// exercised directly:
///
/// ```bash
/// lca ask "Tell me about the iPhone 15"
/// lca ask "anything" --used 3          # quota-exceeded message
/// lca ask "magenta plans" --login --json
/// ```
pub fn ask(state: &AppState, message: &str, login: bool, used: u32, json: bool) -> Result<()> {
    let message = message.trim();
    if message.is_empty() {
        bail!("message must not be empty");
    }

    let responder = Responder::from_config(&state.config)?;
    let session = SessionState {
        is_authenticated: login,
        queries_used_this_session: used,
    };
    let reply = responder.respond(message, &session);

    if json {
        println!("{}", serde_json::to_string_pretty(&ask_json(&responder, message, &session, &reply))?);
        return Ok(());
    }

    println!();
    println!("  {} {}", style("You >").green().bold(), message);
    println!();
    println!(
        "  {} {}",
        style(&state.config.assistant_name).cyan().bold(),
        reply
    );
    if let Some(remaining) = session.remaining(responder.guest_quota()) {
        println!();
        println!(
            "  {}",
            style(format!(
                "Demo: {} of {} questions remaining",
                remaining.saturating_sub(1),
                responder.guest_quota()
            ))
            .dim()
        );
    }
    println!();
    Ok(())
}

fn ask_json(
    responder: &Responder,
    message: &str,
    session: &SessionState,
    reply: &str,
) -> serde_json::Value {
    // The quota guard answers before any rule is consulted.
    let rule = if session.quota_exhausted(responder.guest_quota()) {
        None
    } else {
        responder.matching_rule(message).map(|r| r.name.clone())
    };

    serde_json::json!({
        "input": message,
        "reply": reply,
        "rule": rule,
        "session": session,
        "guest_quota": responder.guest_quota(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guest(used: u32) -> SessionState {
        SessionState {
            is_authenticated: false,
            queries_used_this_session: used,
        }
    }

    #[test]
    fn test_ask_json_reports_rule() {
        let responder = Responder::default();
        let session = guest(0);
        let reply = responder.respond("samsung", &session);
        let value = ask_json(&responder, "samsung", &session, &reply);

        assert_eq!(value["rule"], "samsung");
        assert_eq!(value["session"]["is_authenticated"], false);
        assert_eq!(value["guest_quota"], 3);
        assert!(value["reply"].as_str().unwrap().contains("Galaxy"));
    }

    #[test]
    fn test_ask_json_no_rule_when_quota_exhausted() {
        let responder = Responder::default();
        let session = guest(3);
        let reply = responder.respond("samsung", &session);
        let value = ask_json(&responder, "samsung", &session, &reply);

        assert!(value["rule"].is_null());
        assert_eq!(value["reply"], responder.quota_exceeded_message());
    }
}
