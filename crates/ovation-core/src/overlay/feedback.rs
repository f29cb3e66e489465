//! Feedback overlay state machine.
//!
//! Wall-clock based, no internal timer thread: `begin` arms a hide deadline
//! and the caller's periodic `tick` observes it via `due`. Re-arming while a
//! deadline is pending replaces it, so at most one deadline ever exists --
//! create and cancel are the same code path.

use chrono::{DateTime, Duration, Utc};

use crate::category::Category;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FeedbackState {
    Hidden,
    Showing {
        category: Category,
        hide_at: DateTime<Utc>,
    },
}

#[derive(Debug)]
pub struct FeedbackOverlay {
    state: FeedbackState,
}

impl Default for FeedbackOverlay {
    fn default() -> Self {
        Self::new()
    }
}

impl FeedbackOverlay {
    pub fn new() -> Self {
        Self {
            state: FeedbackState::Hidden,
        }
    }

    pub fn is_visible(&self) -> bool {
        matches!(self.state, FeedbackState::Showing { .. })
    }

    pub fn category(&self) -> Option<Category> {
        match self.state {
            FeedbackState::Showing { category, .. } => Some(category),
            FeedbackState::Hidden => None,
        }
    }

    /// Start (or restart) showing; arms the hide deadline at
    /// `now + display_ms`. A pending deadline is superseded -- last call
    /// wins, nothing queues.
    pub fn begin(&mut self, category: Category, now: DateTime<Utc>, display_ms: u64) {
        let hide_at = now + Duration::milliseconds(display_ms as i64);
        self.state = FeedbackState::Showing { category, hide_at };
    }

    /// Whether the hide deadline has fired.
    pub fn due(&self, now: DateTime<Utc>) -> bool {
        match self.state {
            FeedbackState::Showing { hide_at, .. } => now >= hide_at,
            FeedbackState::Hidden => false,
        }
    }

    /// Drop to Hidden, cancelling any pending deadline. Returns the category
    /// that was showing.
    pub fn clear(&mut self) -> Option<Category> {
        match std::mem::replace(&mut self.state, FeedbackState::Hidden) {
            FeedbackState::Showing { category, .. } => Some(category),
            FeedbackState::Hidden => None,
        }
    }
}
