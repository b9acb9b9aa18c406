//! Session manager for chat sessions.
//!
//! Wraps a `SessionState` with the guest quota and lifecycle timestamps.
//! Counting guest questions happens here and nowhere else.

use chrono::{DateTime, Utc};
use lca_types::session::SessionState;

/// Manages the lifecycle and quota bookkeeping of a single chat session.
pub struct SessionManager {
    state: SessionState,
    guest_quota: u32,
    started_at: DateTime<Utc>,
    ended_at: Option<DateTime<Utc>>,
}

impl SessionManager {
    /// Start a session for a guest or a logged-in user.
    pub fn new(is_authenticated: bool, guest_quota: u32) -> Self {
        let state = if is_authenticated {
            SessionState::authenticated()
        } else {
            SessionState::guest()
        };
        Self {
            state,
            guest_quota,
            started_at: Utc::now(),
            ended_at: None,
        }
    }

    /// Snapshot handed to the responder.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.is_authenticated
    }

    pub fn guest_quota(&self) -> u32 {
        self.guest_quota
    }

    /// Whether a guest has no questions left.
    pub fn quota_exhausted(&self) -> bool {
        self.state.quota_exhausted(self.guest_quota)
    }

    /// Guest questions left, or `None` for logged-in users.
    pub fn remaining(&self) -> Option<u32> {
        self.state.remaining(self.guest_quota)
    }

    /// Count one answered question.
    ///
    /// Only guest questions are counted, and the counter never passes the
    /// quota.
    pub fn record_query(&mut self) {
        if !self.state.is_authenticated && !self.quota_exhausted() {
            self.state.queries_used_this_session += 1;
        }
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn ended_at(&self) -> Option<DateTime<Utc>> {
        self.ended_at
    }

    /// Mark the session as ended. Later calls keep the first timestamp.
    pub fn end(&mut self) {
        if self.ended_at.is_none() {
            self.ended_at = Some(Utc::now());
        }
    }
}
