use std::time::{Duration, Instant};

/// How long a notice stays on screen before auto-clearing.
pub const NOTICE_TTL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// A transient user-facing message. At most one is live at a time;
/// posting a new one replaces the old and restarts the expiry clock.
/// Notices are purely advisory — they carry no retry semantics.
#[derive(Debug, Clone)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
    expires_at: Instant,
}

impl Notice {
    pub fn success(text: impl Into<String>, now: Instant) -> Self {
        Self {
            kind: NoticeKind::Success,
            text: text.into(),
            expires_at: now + NOTICE_TTL,
        }
    }

    pub fn error(text: impl Into<String>, now: Instant) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: text.into(),
            expires_at: now + NOTICE_TTL,
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}
