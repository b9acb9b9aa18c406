//! Per-session authentication flag and guest query counter.

use serde::{Deserialize, Serialize};

/// Number of free questions a guest may ask before login is required.
pub const DEFAULT_GUEST_QUOTA: u32 = 3;

/// Snapshot of a chat session as seen by the responder.
///
/// Held by the chat service and passed explicitly; there is no global
/// session. Lives only as long as the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SessionState {
    pub is_authenticated: bool,
    pub queries_used_this_session: u32,
}

impl SessionState {
    /// A fresh guest session with no questions used.
    pub fn guest() -> Self {
        Self {
            is_authenticated: false,
            queries_used_this_session: 0,
        }
    }

    /// A fresh authenticated session.
    pub fn authenticated() -> Self {
        Self {
            is_authenticated: true,
            queries_used_this_session: 0,
        }
    }

    /// Whether a guest has used up `quota` questions.
    ///
    /// Always false for authenticated sessions.
    pub fn quota_exhausted(&self, quota: u32) -> bool {
        !self.is_authenticated && self.queries_used_this_session >= quota
    }

    /// Guest questions left under `quota`, or `None` when authenticated.
    pub fn remaining(&self, quota: u32) -> Option<u32> {
        if self.is_authenticated {
            None
        } else {
            Some(quota.saturating_sub(self.queries_used_this_session))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_guest() {
        assert_eq!(SessionState::default(), SessionState::guest());
    }

    #[test]
    fn test_quota_exhausted() {
        let mut session = SessionState::guest();
        assert!(!session.quota_exhausted(DEFAULT_GUEST_QUOTA));
        session.queries_used_this_session = 3;
        assert!(session.quota_exhausted(DEFAULT_GUEST_QUOTA));

        let mut auth = SessionState::authenticated();
        auth.queries_used_this_session = 50;
        assert!(!auth.quota_exhausted(DEFAULT_GUEST_QUOTA));
    }

    #[test]
    fn test_remaining() {
        let mut session = SessionState::guest();
        assert_eq!(session.remaining(3), Some(3));
        session.queries_used_this_session = 2;
        assert_eq!(session.remaining(3), Some(1));
        session.queries_used_this_session = 7;
        assert_eq!(session.remaining(3), Some(0));

        assert_eq!(SessionState::authenticated().remaining(3), None);
    }
}
