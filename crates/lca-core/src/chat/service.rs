//! Chat service driving a single conversation.
//!
//! ChatService owns the conversation log and the session, calls the
//! responder, and paces replies with an artificial delay so the
//! presentation layer can show a typing indicator. Delays race against a
//! `CancellationToken`; closing the chat cancels any pending reply.

use std::time::{Duration, Instant};

use lca_types::chat::ConversationTurn;
use lca_types::config::AssistantConfig;
use lca_types::error::RuleError;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::chat::log::ConversationLog;
use crate::chat::session::SessionManager;
use crate::responder::Responder;
use crate::voice::{VoiceState, VoiceToggle};

/// Presentation delays. Purely cosmetic; zero is always valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pacing {
    pub greeting_delay: Duration,
    pub reply_delay: Duration,
}

impl Pacing {
    pub fn from_config(config: &AssistantConfig) -> Self {
        Self {
            greeting_delay: config.greeting_delay(),
            reply_delay: config.reply_delay(),
        }
    }

    /// No delays at all.
    pub fn immediate() -> Self {
        Self::default()
    }
}

/// Result of submitting one line of user input.
#[derive(Debug, Clone, PartialEq)]
pub enum SendOutcome {
    /// Input was blank; nothing was appended.
    Ignored,
    /// Voice mode is listening, so typed input is disabled; nothing was appended.
    Listening,
    /// The guest is out of questions. Only the limit message was appended.
    Blocked(ConversationTurn),
    /// The user turn and the scripted reply were both appended.
    Replied {
        user: ConversationTurn,
        reply: ConversationTurn,
    },
    /// The chat closed while the reply was pending. The user turn stays in
    /// the log; no reply was appended.
    Cancelled(ConversationTurn),
}

/// Orchestrates one chat session: log, quota, pacing, and voice toggle.
pub struct ChatService {
    responder: Responder,
    session: SessionManager,
    log: ConversationLog,
    voice: VoiceToggle,
    pacing: Pacing,
}

impl ChatService {
    pub fn new(
        responder: Responder,
        is_authenticated: bool,
        pacing: Pacing,
        listen_timeout: Duration,
    ) -> Self {
        let session = SessionManager::new(is_authenticated, responder.guest_quota());
        Self {
            responder,
            session,
            log: ConversationLog::new(),
            voice: VoiceToggle::new(listen_timeout),
            pacing,
        }
    }

    /// Wire a service from the loaded configuration.
    pub fn from_config(config: &AssistantConfig, is_authenticated: bool) -> Result<Self, RuleError> {
        let responder = Responder::from_config(config)?;
        Ok(Self::new(
            responder,
            is_authenticated,
            Pacing::from_config(config),
            config.listen_timeout(),
        ))
    }

    pub fn responder(&self) -> &Responder {
        &self.responder
    }

    pub fn log(&self) -> &ConversationLog {
        &self.log
    }

    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    /// Guest questions left, or `None` for logged-in users.
    pub fn remaining_queries(&self) -> Option<u32> {
        self.session.remaining()
    }

    pub fn voice(&self) -> &VoiceToggle {
        &self.voice
    }

    /// Flip voice mode at `now`.
    pub fn toggle_voice(&mut self, now: Instant) -> VoiceState {
        let state = self.voice.toggle(now);
        debug!(?state, "Voice mode toggled");
        state
    }

    /// Append the opening greeting after the greeting delay.
    ///
    /// Only greets an empty conversation. Returns `None` if the log already
    /// has turns or the chat was closed during the delay.
    pub async fn greet(&mut self, cancel: &CancellationToken) -> Option<ConversationTurn> {
        if !self.log.is_empty() {
            return None;
        }
        if !pause(self.pacing.greeting_delay, cancel).await || !self.log.is_empty() {
            return None;
        }

        let text = self.responder.greeting(self.session.state());
        info!(authenticated = self.session.is_authenticated(), "Session greeted");
        Some(self.log.append(ConversationTurn::assistant(text)).clone())
    }

    /// Submit one line of user input.
    pub async fn send(&mut self, input: &str, cancel: &CancellationToken) -> SendOutcome {
        let text = input.trim();
        if text.is_empty() {
            return SendOutcome::Ignored;
        }

        if self.voice.is_listening(Instant::now()) {
            return SendOutcome::Listening;
        }

        if self.session.quota_exhausted() {
            info!(
                quota = self.session.guest_quota(),
                "Guest quota reached, reply blocked"
            );
            let limit = ConversationTurn::assistant(self.responder.quota_exceeded_message());
            return SendOutcome::Blocked(self.log.append(limit).clone());
        }

        let user = self.log.append(ConversationTurn::user(text)).clone();

        if !pause(self.pacing.reply_delay, cancel).await {
            debug!("Chat closed before the reply was shown");
            return SendOutcome::Cancelled(user);
        }

        let reply_text = self.responder.respond(text, self.session.state());
        let reply = self.log.append(ConversationTurn::assistant(reply_text)).clone();
        self.session.record_query();

        debug!(
            used = self.session.state().queries_used_this_session,
            turns = self.log.len(),
            "Reply appended"
        );
        SendOutcome::Replied { user, reply }
    }

    /// Close the session.
    pub fn end(&mut self) {
        self.session.end();
        let duration_secs = self
            .session
            .ended_at()
            .map(|ended| (ended - self.session.started_at()).num_seconds())
            .unwrap_or_default();
        info!(
            turns = self.log.len(),
            duration_secs,
            queries_used = self.session.state().queries_used_this_session,
            "Session ended"
        );
    }
}

/// Wait for `duration` unless `cancel` fires first.
///
/// Returns `true` if the full delay elapsed.
async fn pause(duration: Duration, cancel: &CancellationToken) -> bool {
    if cancel.is_cancelled() {
        return false;
    }
    if duration.is_zero() {
        return true;
    }
    tokio::select! {
        biased;
        _ = cancel.cancelled() => false,
        _ = tokio::time::sleep(duration) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lca_types::chat::Speaker;

    fn service(is_authenticated: bool) -> ChatService {
        ChatService::new(
            Responder::default(),
            is_authenticated,
            Pacing::immediate(),
            Duration::from_secs(3),
        )
    }

    #[tokio::test]
    async fn test_greet_guest_once() {
        let mut chat = service(false);
        let cancel = CancellationToken::new();

        let greeting = chat.greet(&cancel).await.unwrap();
        assert_eq!(greeting.speaker(), Speaker::Assistant);
        assert!(greeting.text().starts_with("Welcome! I'm LCA"));

        assert!(chat.greet(&cancel).await.is_none());
        assert_eq!(chat.log().len(), 1);
    }

    #[tokio::test]
    async fn test_greet_authenticated() {
        let mut chat = service(true);
        let greeting = chat.greet(&CancellationToken::new()).await.unwrap();
        assert!(greeting.text().starts_with("Hi! I'm LCA"));
    }

    #[tokio::test]
    async fn test_blank_input_ignored() {
        let mut chat = service(false);
        let cancel = CancellationToken::new();
        assert_eq!(chat.send("   ", &cancel).await, SendOutcome::Ignored);
        assert_eq!(chat.send("", &cancel).await, SendOutcome::Ignored);
        assert!(chat.log().is_empty());
        assert_eq!(chat.session().state().queries_used_this_session, 0);
    }

    #[tokio::test]
    async fn test_send_appends_both_turns() {
        let mut chat = service(false);
        let cancel = CancellationToken::new();

        match chat.send("  Tell me about the iPhone 15 ", &cancel).await {
            SendOutcome::Replied { user, reply } => {
                assert_eq!(user.text(), "Tell me about the iPhone 15");
                assert!(reply.text().contains("€999"));
                assert!(reply.text().contains("log in"));
            }
            other => panic!("expected reply, got {other:?}"),
        }

        assert_eq!(chat.log().len(), 2);
        assert_eq!(chat.log().turns()[0].speaker(), Speaker::User);
        assert_eq!(chat.log().turns()[1].speaker(), Speaker::Assistant);
        assert_eq!(chat.session().state().queries_used_this_session, 1);
        assert_eq!(chat.remaining_queries(), Some(2));
    }

    #[tokio::test]
    async fn test_guest_blocked_after_quota() {
        let mut chat = service(false);
        let cancel = CancellationToken::new();

        for i in 0..3 {
            let outcome = chat.send("hello", &cancel).await;
            match outcome {
                SendOutcome::Replied { reply, .. } => {
                    assert!(reply.text().contains(&format!("question {} of 3", i + 1)));
                }
                other => panic!("expected reply, got {other:?}"),
            }
        }
        assert_eq!(chat.remaining_queries(), Some(0));

        let outcome = chat.send("iphone", &cancel).await;
        let SendOutcome::Blocked(limit) = outcome else {
            panic!("expected blocked outcome");
        };
        assert_eq!(limit.text(), chat.responder().quota_exceeded_message());

        // 3 exchanges plus one limit message; the blocked input is not logged.
        assert_eq!(chat.log().len(), 7);
        assert_eq!(chat.log().count_by(Speaker::User), 3);
        assert_eq!(chat.session().state().queries_used_this_session, 3);
    }

    #[tokio::test]
    async fn test_authenticated_never_blocked() {
        let mut chat = service(true);
        let cancel = CancellationToken::new();
        for _ in 0..10 {
            assert!(matches!(
                chat.send("magenta mobil plans", &cancel).await,
                SendOutcome::Replied { .. }
            ));
        }
        assert_eq!(chat.session().state().queries_used_this_session, 0);
        assert_eq!(chat.remaining_queries(), None);
    }

    #[tokio::test]
    async fn test_cancelled_reply_not_appended() {
        let mut chat = ChatService::new(
            Responder::default(),
            false,
            Pacing {
                greeting_delay: Duration::from_secs(60),
                reply_delay: Duration::from_secs(60),
            },
            Duration::from_secs(3),
        );
        let cancel = CancellationToken::new();
        cancel.cancel();

        assert!(chat.greet(&cancel).await.is_none());

        let outcome = chat.send("samsung", &cancel).await;
        let SendOutcome::Cancelled(user) = outcome else {
            panic!("expected cancelled outcome");
        };
        assert_eq!(user.text(), "samsung");
        assert_eq!(chat.log().len(), 1);
        assert_eq!(chat.session().state().queries_used_this_session, 0);
    }

    #[tokio::test]
    async fn test_cancel_during_delay() {
        let mut chat = ChatService::new(
            Responder::default(),
            true,
            Pacing {
                greeting_delay: Duration::ZERO,
                reply_delay: Duration::from_secs(60),
            },
            Duration::from_secs(3),
        );
        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            trigger.cancel();
        });

        let outcome = chat.send("compare", &cancel).await;
        assert!(matches!(outcome, SendOutcome::Cancelled(ref user) if user.text() == "compare"));
        // Only the user turn was logged.
        assert_eq!(chat.log().len(), 1);
        assert_eq!(chat.log().turns().last().unwrap().speaker(), Speaker::User);
    }

    #[tokio::test]
    async fn test_reply_delay_elapses() {
        let mut chat = ChatService::new(
            Responder::default(),
            true,
            Pacing {
                greeting_delay: Duration::ZERO,
                reply_delay: Duration::from_millis(10),
            },
            Duration::from_secs(3),
        );
        let outcome = chat.send("compare", &CancellationToken::new()).await;
        assert!(matches!(outcome, SendOutcome::Replied { .. }));
    }

    #[tokio::test]
    async fn test_input_disabled_while_listening() {
        let mut chat = ChatService::new(
            Responder::default(),
            false,
            Pacing::immediate(),
            Duration::from_secs(60),
        );
        let cancel = CancellationToken::new();

        assert_eq!(chat.toggle_voice(Instant::now()), VoiceState::Listening);
        assert_eq!(chat.send("iphone", &cancel).await, SendOutcome::Listening);
        assert!(chat.log().is_empty());

        assert_eq!(chat.toggle_voice(Instant::now()), VoiceState::Off);
        assert!(matches!(
            chat.send("iphone", &cancel).await,
            SendOutcome::Replied { .. }
        ));
    }

    #[tokio::test]
    async fn test_from_config() {
        let config = AssistantConfig {
            guest_quota: 1,
            ..AssistantConfig::default()
        }
        .without_delays();
        let mut chat = ChatService::from_config(&config, false).unwrap();
        let cancel = CancellationToken::new();

        assert!(matches!(chat.send("hi", &cancel).await, SendOutcome::Replied { .. }));
        assert!(matches!(chat.send("hi", &cancel).await, SendOutcome::Blocked(_)));
    }

    #[test]
    fn test_end_marks_session() {
        let mut chat = service(false);
        chat.end();
        let ended = chat.session().ended_at().unwrap();
        assert!(ended >= chat.session().started_at());
    }
}
