//! Voice-mode toggle.
//!
//! There is no audio capture or transcription. Turning voice mode on raises
//! a "listening" flag that clears itself after a fixed timeout; while it is
//! raised the chat input is disabled. A speech-to-text backend would hook in
//! behind this same toggle.

use std::time::{Duration, Instant};

/// What the voice toggle is doing at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceState {
    /// Voice mode is off.
    Off,
    /// Voice mode is on and the listening window is open.
    Listening,
    /// Voice mode is on but the listening window has closed.
    Idle,
}

/// Timeout-based voice-mode flag pair.
///
/// Time is passed in explicitly so the toggle never reads a clock itself.
#[derive(Debug, Clone)]
pub struct VoiceToggle {
    enabled: bool,
    listening_until: Option<Instant>,
    listen_timeout: Duration,
}

impl VoiceToggle {
    pub fn new(listen_timeout: Duration) -> Self {
        Self {
            enabled: false,
            listening_until: None,
            listen_timeout,
        }
    }

    /// Flip voice mode and return the resulting state.
    ///
    /// Switching on opens a listening window of `listen_timeout` starting at
    /// `now`. Switching off closes any open window.
    pub fn toggle(&mut self, now: Instant) -> VoiceState {
        self.enabled = !self.enabled;
        self.listening_until = if self.enabled {
            Some(now + self.listen_timeout)
        } else {
            None
        };
        self.state(now)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_listening(&self, now: Instant) -> bool {
        matches!(self.listening_until, Some(deadline) if now < deadline)
    }

    /// Time left in the listening window, if one is open.
    pub fn listening_remaining(&self, now: Instant) -> Option<Duration> {
        self.listening_until
            .filter(|deadline| now < *deadline)
            .map(|deadline| deadline - now)
    }

    pub fn state(&self, now: Instant) -> VoiceState {
        match (self.enabled, self.is_listening(now)) {
            (false, _) => VoiceState::Off,
            (true, true) => VoiceState::Listening,
            (true, false) => VoiceState::Idle,
        }
    }

    pub fn listen_timeout(&self) -> Duration {
        self.listen_timeout
    }
}
