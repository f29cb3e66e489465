use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::category::Category;

/// Every externally visible state change produces an Event.
/// The embedding host (or the CLI) observes them; they carry no control flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// The host bridge answered its first readiness probe; pool requests
    /// have been issued.
    BridgeReady {
        at: DateTime<Utc>,
    },
    /// A category's image pool arrived and was stored.
    PoolLoaded {
        category: Category,
        count: usize,
        at: DateTime<Utc>,
    },
    /// A reward image went up over the review card.
    FeedbackShown {
        category: Category,
        image: String,
        at: DateTime<Utc>,
    },
    /// The auto-hide deadline fired; the review card is back.
    FeedbackHidden {
        category: Category,
        at: DateTime<Utc>,
    },
    /// The intermission modal opened, blocking review until dismissed.
    IntermissionOpened {
        grade: Category,
        image: String,
        at: DateTime<Utc>,
    },
    /// An intermission was requested but the break pool is empty; no modal
    /// was shown and the grade was dropped.
    IntermissionSkipped {
        grade: Category,
        at: DateTime<Utc>,
    },
    /// The user dismissed the intermission; the host was told to resume
    /// grading with the remembered grade.
    IntermissionDismissed {
        grade: Category,
        at: DateTime<Utc>,
    },
    /// Full controller state at a point in time, for inspection.
    StateSnapshot {
        bridge_ready: bool,
        loaded_pools: Vec<Category>,
        feedback_category: Option<Category>,
        awaiting_dismissal: Option<Category>,
        deferred_start: bool,
        deferred_intermission: Option<Category>,
        at: DateTime<Utc>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_serialize_with_type_tag() {
        let event = Event::FeedbackShown {
            category: Category::Good,
            image: "a.png".to_string(),
            at: Utc::now(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "FeedbackShown");
        assert_eq!(json["category"], "good");
        assert_eq!(json["image"], "a.png");
    }

    #[test]
    fn snapshot_round_trips() {
        let event = Event::StateSnapshot {
            bridge_ready: true,
            loaded_pools: vec![Category::Good, Category::Break],
            feedback_category: None,
            awaiting_dismissal: Some(Category::Hard),
            deferred_start: false,
            deferred_intermission: None,
            at: Utc::now(),
        };
        let json = serde_json::to_string(&event).unwrap();
        let back: Event = serde_json::from_str(&json).unwrap();
        match back {
            Event::StateSnapshot {
                awaiting_dismissal, ..
            } => assert_eq!(awaiting_dismissal, Some(Category::Hard)),
            _ => panic!("Expected StateSnapshot"),
        }
    }
}
