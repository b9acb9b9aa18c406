//! Main chat loop orchestration.
//!
//! Coordinates the conversation lifecycle: banner, paced greeting, input
//! loop with typing spinner, slash commands, voice toggle, and teardown.
//! Input keeps being read while a reply is pending, so Ctrl+D or `/exit`
//! closes the chat without waiting for it.

use std::io::Write;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use console::style;
use tokio::sync::Notify;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use lca_core::chat::service::{ChatService, SendOutcome};
use lca_core::voice::VoiceState;
use lca_types::chat::Speaker;

use crate::state::AppState;

use super::banner::print_welcome_banner;
use super::commands::{self, ChatCommand};
use super::input::{ChatInput, InputEvent, InputSource};
use super::renderer::{ChatRenderer, typing_spinner};

/// Turns shown by `/history`.
const HISTORY_TURNS: usize = 20;

/// Run the interactive chat loop.
///
/// `login` starts an authenticated session; otherwise the guest demo quota
/// applies. `no_delay` drops the greeting and typing delays.
pub async fn run_chat_loop(state: &AppState, login: bool, no_delay: bool) -> anyhow::Result<()> {
    let config = if no_delay {
        state.config.clone().without_delays()
    } else {
        state.config.clone()
    };

    let mut chat = ChatService::from_config(&config, login)?;
    let renderer = ChatRenderer::new(config.assistant_name.clone());
    // Cancelled when the chat closes; pending delays and voice timers stop with it.
    let shutdown = CancellationToken::new();

    info!(authenticated = login, quota = config.guest_quota, "Chat session started");

    print_welcome_banner(
        &config.assistant_name,
        &config.tagline,
        !login,
        chat.responder().rules().len(),
    );

    let spinner = typing_spinner();
    let greeting = chat.greet(&shutdown).await;
    spinner.finish_and_clear();
    if let Some(greeting) = greeting {
        renderer.print_assistant(greeting.text());
    }

    let prompt = format!("  {} ", style("You >").green().bold());
    let listening_prompt = format!("  {} ", style("Listening...").magenta().bold());
    let (mut chat_input, writer) = ChatInput::new(prompt, listening_prompt)
        .map_err(|e| anyhow::anyhow!("Failed to initialize input: {e}"))?;

    let mut voice_timer: Option<CancellationToken> = None;
    // Woken by the voice timer so the prompt is refreshed without new input.
    let listen_closed = Arc::new(Notify::new());
    // A line typed while a reply was pending, handled before reading again.
    let mut queued: Option<String> = None;

    loop {
        let listening = chat.voice().is_listening(Instant::now());
        chat_input.set_listening(listening);

        let event = match queued.take() {
            Some(text) => InputEvent::Message(text),
            None => tokio::select! {
                event = chat_input.read_line() => event,
                _ = listen_closed.notified() => continue,
            },
        };

        match event {
            InputEvent::Eof => break,
            InputEvent::Interrupted => {
                println!("\n  {}", style("Press Ctrl+D to exit, or keep chatting.").dim());
                continue;
            }
            InputEvent::Message(text) => {
                if text.is_empty() {
                    continue;
                }

                if let Some(cmd) = commands::parse(&text) {
                    match cmd {
                        ChatCommand::Help => commands::print_help(),
                        ChatCommand::Clear => chat_input.clear(),
                        ChatCommand::Exit => break,
                        ChatCommand::History => {
                            renderer.print_history(chat.log().tail(HISTORY_TURNS), chat.log().len())
                        }
                        ChatCommand::Status => print_status(&chat),
                        ChatCommand::Voice => {
                            if let Some(timer) = voice_timer.take() {
                                timer.cancel();
                            }
                            match chat.toggle_voice(Instant::now()) {
                                VoiceState::Listening => {
                                    renderer.print_notice("🎙", "Voice mode on. Listening...");
                                    let timer = shutdown.child_token();
                                    spawn_listen_timer(
                                        chat.voice().listen_timeout(),
                                        timer.clone(),
                                        writer.clone(),
                                        Arc::clone(&listen_closed),
                                    );
                                    voice_timer = Some(timer);
                                }
                                VoiceState::Idle => {
                                    renderer.print_notice("🎙", "Voice mode on.");
                                }
                                VoiceState::Off => {
                                    renderer.print_notice("🎙", "Voice mode off.");
                                }
                            }
                        }
                        ChatCommand::Unknown(name) => renderer.print_notice(
                            "?",
                            &format!("Unknown command: {name}. Type /help for available commands."),
                        ),
                    }
                    continue;
                }

                let spinner = typing_spinner();
                let exchange = await_reply(&mut chat, &mut chat_input, &text, &shutdown).await;
                spinner.finish_and_clear();
                queued = exchange.queued;

                match exchange.outcome {
                    SendOutcome::Ignored => {}
                    SendOutcome::Cancelled(_) => {
                        renderer.print_notice("×", "Chat closed before the reply arrived.");
                    }
                    SendOutcome::Listening => {
                        renderer.print_notice("🎙", "Still listening, typed input is paused.");
                    }
                    SendOutcome::Blocked(limit) => renderer.print_limit(limit.text()),
                    SendOutcome::Replied { reply, .. } => {
                        renderer.print_assistant(reply.text());
                        if let Some(remaining) = chat.remaining_queries() {
                            renderer.print_demo_footer(remaining);
                        }
                    }
                }

                if exchange.closed {
                    break;
                }
            }
        }
    }

    shutdown.cancel();
    chat_input.flush();
    chat.end();
    println!("\n  {}", style("Chat closed.").dim());
    Ok(())
}

/// What happened while one message waited for its reply.
#[derive(Debug)]
struct Exchange {
    outcome: SendOutcome,
    /// A line typed during the wait, to be handled next.
    queued: Option<String>,
    /// The user asked to close the chat during the wait.
    closed: bool,
}

/// Send `text` and keep reading input until the reply lands.
///
/// Ctrl+D or `/exit` cancels `shutdown`, which drops the pending reply.
/// The first other non-blank line is held for the next loop iteration;
/// Ctrl+C is ignored.
async fn await_reply(
    chat: &mut ChatService,
    input: &mut impl InputSource,
    text: &str,
    shutdown: &CancellationToken,
) -> Exchange {
    let send = chat.send(text, shutdown);
    tokio::pin!(send);

    let mut queued = None;
    let mut closed = false;

    loop {
        tokio::select! {
            outcome = &mut send => return Exchange { outcome, queued, closed },
            event = input.next_event(), if !closed && queued.is_none() => {
                if closes_chat(&event) {
                    debug!("Close requested while a reply was pending");
                    closed = true;
                    shutdown.cancel();
                } else if let InputEvent::Message(line) = event {
                    if !line.is_empty() {
                        queued = Some(line);
                    }
                }
            }
        }
    }
}

/// Whether an input event ends the chat.
fn closes_chat(event: &InputEvent) -> bool {
    match event {
        InputEvent::Eof => true,
        InputEvent::Message(text) => commands::parse(text) == Some(ChatCommand::Exit),
        InputEvent::Interrupted => false,
    }
}

/// Announce the end of the listening window unless cancelled first, then
/// wake the loop so it restores the normal prompt.
fn spawn_listen_timer<W>(
    timeout: Duration,
    cancel: CancellationToken,
    mut writer: W,
    listen_closed: Arc<Notify>,
) where
    W: Write + Send + 'static,
{
    tokio::spawn(async move {
        tokio::select! {
            _ = cancel.cancelled() => {}
            _ = tokio::time::sleep(timeout) => {
                let _ = writeln!(writer, "\n  {}", style("Stopped listening. Type your message.").dim());
                listen_closed.notify_one();
            }
        }
    });
}

fn print_status(chat: &ChatService) {
    let now = Instant::now();
    let mode = if chat.session().is_authenticated() {
        format!("{}", style("logged in").green())
    } else {
        format!("{}", style("demo").yellow())
    };
    let remaining = match chat.remaining_queries() {
        Some(n) => format!("{n} of {}", chat.session().guest_quota()),
        None => "unlimited".to_string(),
    };
    let voice = if !chat.voice().is_enabled() {
        "off".to_string()
    } else {
        match chat.voice().listening_remaining(now) {
            Some(left) => format!("listening, {:.1}s left", left.as_secs_f32()),
            None => "on".to_string(),
        }
    };
    let log = chat.log();

    println!();
    println!("  {}", style("── Session ──").dim());
    println!("  Mode:       {mode}");
    println!("  Questions:  {remaining} remaining");
    println!(
        "  Messages:   {} ({} from you, {} from the assistant)",
        log.len(),
        log.count_by(Speaker::User),
        log.count_by(Speaker::Assistant)
    );
    println!("  Voice:      {voice}");
    println!(
        "  Uptime:     {}",
        format_uptime(Utc::now() - chat.session().started_at())
    );
    println!();
}

fn format_uptime(elapsed: chrono::Duration) -> String {
    let secs = elapsed.num_seconds().max(0);
    match secs {
        0..60 => format!("{secs}s"),
        60..3600 => format!("{}m {:02}s", secs / 60, secs % 60),
        _ => format!("{}h {:02}m", secs / 3600, (secs % 3600) / 60),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lca_core::chat::service::Pacing;
    use lca_core::responder::Responder;
    use tokio::sync::mpsc;

    /// Input events fed from a channel; waits forever once drained.
    struct ScriptedInput {
        events: mpsc::UnboundedReceiver<InputEvent>,
    }

    impl InputSource for ScriptedInput {
        async fn next_event(&mut self) -> InputEvent {
            match self.events.recv().await {
                Some(event) => event,
                None => std::future::pending().await,
            }
        }
    }

    fn scripted(events: Vec<InputEvent>) -> ScriptedInput {
        let (tx, rx) = mpsc::unbounded_channel();
        for event in events {
            let _ = tx.send(event);
        }
        ScriptedInput { events: rx }
    }

    fn slow_chat(reply_delay: Duration) -> ChatService {
        ChatService::new(
            Responder::default(),
            false,
            Pacing {
                greeting_delay: Duration::ZERO,
                reply_delay,
            },
            Duration::from_secs(3),
        )
    }

    #[test]
    fn test_closes_chat() {
        assert!(closes_chat(&InputEvent::Eof));
        assert!(closes_chat(&InputEvent::Message("/exit".to_string())));
        assert!(closes_chat(&InputEvent::Message("/q".to_string())));
        assert!(!closes_chat(&InputEvent::Message("iphone".to_string())));
        assert!(!closes_chat(&InputEvent::Message("/help".to_string())));
        assert!(!closes_chat(&InputEvent::Interrupted));
    }

    #[tokio::test]
    async fn test_eof_drops_pending_reply() {
        let mut chat = slow_chat(Duration::from_secs(60));
        let mut input = scripted(vec![InputEvent::Eof]);
        let shutdown = CancellationToken::new();

        let exchange = await_reply(&mut chat, &mut input, "iphone", &shutdown).await;

        assert!(exchange.closed);
        assert!(shutdown.is_cancelled());
        assert!(matches!(exchange.outcome, SendOutcome::Cancelled(ref user) if user.text() == "iphone"));
        assert_eq!(chat.log().len(), 1);
        assert_eq!(chat.session().state().queries_used_this_session, 0);
    }

    #[tokio::test]
    async fn test_exit_command_drops_pending_reply() {
        let mut chat = slow_chat(Duration::from_secs(60));
        let mut input = scripted(vec![
            InputEvent::Interrupted,
            InputEvent::Message("/exit".to_string()),
        ]);
        let shutdown = CancellationToken::new();

        let exchange = await_reply(&mut chat, &mut input, "samsung", &shutdown).await;

        assert!(exchange.closed);
        assert!(matches!(exchange.outcome, SendOutcome::Cancelled(_)));
        assert_eq!(chat.log().count_by(Speaker::Assistant), 0);
    }

    #[tokio::test]
    async fn test_line_typed_during_reply_is_queued() {
        let mut chat = slow_chat(Duration::from_millis(50));
        let mut input = scripted(vec![
            InputEvent::Message(String::new()),
            InputEvent::Message("galaxy".to_string()),
            InputEvent::Message("cart".to_string()),
        ]);
        let shutdown = CancellationToken::new();

        let exchange = await_reply(&mut chat, &mut input, "compare", &shutdown).await;

        assert!(!exchange.closed);
        assert!(!shutdown.is_cancelled());
        assert!(matches!(exchange.outcome, SendOutcome::Replied { .. }));
        assert_eq!(exchange.queued.as_deref(), Some("galaxy"));
        assert_eq!(chat.log().len(), 2);
    }

    #[tokio::test]
    async fn test_immediate_reply_reads_nothing() {
        let mut chat = slow_chat(Duration::ZERO);
        let mut input = scripted(Vec::new());
        let shutdown = CancellationToken::new();

        let exchange = await_reply(&mut chat, &mut input, "plans", &shutdown).await;

        assert!(matches!(exchange.outcome, SendOutcome::Replied { .. }));
        assert!(exchange.queued.is_none());
        assert!(!exchange.closed);
    }

    #[tokio::test]
    async fn test_listen_timer_wakes_loop() {
        let listen_closed = Arc::new(Notify::new());
        spawn_listen_timer(
            Duration::from_millis(10),
            CancellationToken::new(),
            std::io::sink(),
            Arc::clone(&listen_closed),
        );

        tokio::time::timeout(Duration::from_secs(5), listen_closed.notified())
            .await
            .expect("timer should wake the loop");
    }

    #[tokio::test]
    async fn test_cancelled_listen_timer_stays_quiet() {
        let listen_closed = Arc::new(Notify::new());
        let cancel = CancellationToken::new();
        spawn_listen_timer(
            Duration::from_millis(50),
            cancel.clone(),
            std::io::sink(),
            Arc::clone(&listen_closed),
        );
        cancel.cancel();

        let woken = tokio::time::timeout(Duration::from_millis(200), listen_closed.notified()).await;
        assert!(woken.is_err());
    }

    #[test]
    fn test_format_uptime() {
        assert_eq!(format_uptime(chrono::Duration::seconds(42)), "42s");
        assert_eq!(format_uptime(chrono::Duration::seconds(125)), "2m 05s");
        assert_eq!(format_uptime(chrono::Duration::seconds(3 * 3600 + 7 * 60)), "3h 07m");
        assert_eq!(format_uptime(chrono::Duration::seconds(-5)), "0s");
    }
}
