//! # Ovation Core Library
//!
//! This library provides the core logic for Ovation, a reward overlay for
//! flashcard review: after each graded answer (or at session start, or on a
//! scheduled break) a random reward image covers the review card for a
//! fixed duration, then the card comes back. The webview embedding and the
//! CLI are thin layers over the same library.
//!
//! ## Architecture
//!
//! - **Controller**: a wall-clock-based state machine that requires the
//!   caller to periodically invoke `tick()`; no internal threads
//! - **Host Bridge / Overlay Surface**: traits at the seams to the
//!   surrounding review application and to the page markup, so both are
//!   substitutable in tests
//! - **Pools**: write-once per-category image pools, loaded asynchronously
//!   from the host in any order
//!
//! ## Key Components
//!
//! - [`Controller`]: entry points the host invokes on review events
//! - [`HostBridge`] / [`OverlaySurface`]: collaborator contracts
//! - [`Config`]: TOML configuration (display duration, grade set, namespace)
//! - [`Event`]: observable record of every visible state change

pub mod bridge;
pub mod category;
pub mod config;
pub mod controller;
pub mod error;
pub mod events;
pub mod overlay;
pub mod protocol;
pub mod registry;
pub mod select;
pub mod surface;

pub use bridge::{HostBridge, PoolResponse};
pub use category::Category;
pub use config::Config;
pub use controller::Controller;
pub use error::{ConfigError, CoreError, Result};
pub use events::Event;
pub use overlay::{FeedbackOverlay, Intermission, IntermissionState};
pub use registry::PoolRegistry;
pub use surface::OverlaySurface;
