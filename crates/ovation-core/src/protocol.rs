//! Textual channel convention spoken over the host bridge.
//!
//! Every message is a single channel string under a configurable namespace:
//!
//! ```text
//! <ns>#files#images/<category>      -> response: JSON array of image refs
//! <ns>#disableShowAnswer            fire-and-forget
//! <ns>#enableShowAnswer             fire-and-forget
//! <ns>#resumeReview#<grade>         fire-and-forget
//! <ns>#replayIntermissionSound      fire-and-forget
//! ```
//!
//! Hosts that speak this wire format adapt it onto [`crate::HostBridge`];
//! the controller itself only ever sees the trait.

use crate::category::Category;

pub fn images_channel(namespace: &str, category: Category) -> String {
    format!("{namespace}#files#images/{category}")
}

pub fn disable_show_answer_channel(namespace: &str) -> String {
    format!("{namespace}#disableShowAnswer")
}

pub fn enable_show_answer_channel(namespace: &str) -> String {
    format!("{namespace}#enableShowAnswer")
}

pub fn resume_review_channel(namespace: &str, grade: Category) -> String {
    format!("{namespace}#resumeReview#{grade}")
}

pub fn replay_sound_channel(namespace: &str) -> String {
    format!("{namespace}#replayIntermissionSound")
}

/// Decode a pool response payload: a JSON-encoded array of strings.
///
/// Anything else -- malformed JSON, a non-array, mixed element types --
/// decodes as an empty pool. The overlay must never fault on host data.
pub fn decode_pool_payload(payload: &str) -> Vec<String> {
    serde_json::from_str::<Vec<String>>(payload).unwrap_or_default()
}
