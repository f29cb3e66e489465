//! Overlay state machines.
//!
//! Two independent machines share the screen but never show together: the
//! auto-hiding feedback overlay and the user-dismissed intermission modal.
//! Both are pure state -- the controller maps their transitions onto the
//! surface and the host bridge.

pub mod feedback;
pub mod intermission;

pub use feedback::FeedbackOverlay;
pub use intermission::{Intermission, IntermissionState};
