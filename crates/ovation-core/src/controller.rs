//! The overlay controller.
//!
//! A single object owns the image pools, the two overlay state machines,
//! the pending flags and the random source. It is wall-clock based and has
//! no internal threads -- the embedding host invokes the entry points on
//! review events and calls `tick()` periodically.
//!
//! ## Control flow
//!
//! ```text
//! host event -> entry point -> pool lookup -> random pick -> surface + bridge
//!                   tick() -> bridge readiness, response ingestion, auto-hide
//! ```
//!
//! Nothing here returns an error: a missing pool, an unready bridge or a
//! malformed payload degrades to a silent no-op. The overlay must never
//! take the surrounding review page down with it.

use chrono::{DateTime, Utc};
use rand_pcg::Mcg128Xsl64;

use crate::bridge::HostBridge;
use crate::category::Category;
use crate::config::Config;
use crate::events::Event;
use crate::overlay::{FeedbackOverlay, Intermission};
use crate::registry::PoolRegistry;
use crate::select;
use crate::surface::OverlaySurface;

/// Pool retrieval progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BridgePhase {
    /// The host side of the channel has not answered a readiness probe yet.
    AwaitingBridge,
    /// All pool requests are out; responses arrive in any order.
    Requested,
}

/// Reward overlay controller.
///
/// Generic over the host bridge and the rendering surface so both can be
/// substituted in tests. Construct once per page lifetime.
pub struct Controller<B: HostBridge, S: OverlaySurface> {
    config: Config,
    bridge: B,
    surface: S,
    rng: Mcg128Xsl64,
    pools: PoolRegistry,
    feedback: FeedbackOverlay,
    intermission: Intermission,
    phase: BridgePhase,
    /// Session start requested before the start pool arrived.
    deferred_start: bool,
    /// Intermission requested before the break pool arrived; remembers the
    /// grade for the single automatic retry.
    deferred_intermission: Option<Category>,
    mounted: bool,
}

impl<B: HostBridge, S: OverlaySurface> Controller<B, S> {
    pub fn new(config: Config, bridge: B, surface: S) -> Self {
        let rng = select::seeded_rng(config.selector.seed);
        Self {
            config,
            bridge,
            surface,
            rng,
            pools: PoolRegistry::new(),
            feedback: FeedbackOverlay::new(),
            intermission: Intermission::new(),
            phase: BridgePhase::AwaitingBridge,
            deferred_start: false,
            deferred_intermission: None,
            mounted: false,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn bridge(&self) -> &B {
        &self.bridge
    }

    pub fn bridge_mut(&mut self) -> &mut B {
        &mut self.bridge
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self, now: DateTime<Utc>) -> Event {
        Event::StateSnapshot {
            bridge_ready: self.phase == BridgePhase::Requested,
            loaded_pools: self.pools.loaded(),
            feedback_category: self.feedback.category(),
            awaiting_dismissal: self.intermission.pending_grade(),
            deferred_start: self.deferred_start,
            deferred_intermission: self.deferred_intermission,
            at: now,
        }
    }

    // ── Host-invoked entry points ────────────────────────────────────

    /// Page load handler. Idempotent: however many times the load event
    /// fires, the containers are created exactly once.
    pub fn on_load(&mut self) {
        if self.mounted {
            return;
        }
        self.surface.mount();
        self.mounted = true;
    }

    /// Answer graded. Shows feedback when the grade is in the configured
    /// set and its pool has an image.
    pub fn on_answer(&mut self, grade: Category, now: DateTime<Utc>) -> Option<Event> {
        if !grade.is_answer_grade() || !self.config.feedback.grades.contains(&grade) {
            return None;
        }
        self.show_feedback(grade, now)
    }

    /// Review session started. Defers until the start pool arrives when it
    /// has not loaded yet; the deferred display happens exactly once.
    pub fn on_review_start(&mut self, now: DateTime<Utc>) -> Option<Event> {
        if !self.pools.is_loaded(Category::Start) {
            self.deferred_start = true;
            return None;
        }
        self.show_feedback(Category::Start, now)
    }

    /// Scheduled break reached. Opens the blocking intermission modal, or
    /// defers (once) until the break pool arrives.
    pub fn on_intermission(&mut self, grade: Category, now: DateTime<Utc>) -> Option<Event> {
        if !self.pools.is_loaded(Category::Break) {
            self.deferred_intermission = Some(grade);
            return None;
        }
        self.open_intermission(grade, now)
    }

    /// User activated the intermission's dismissal control.
    pub fn dismiss_intermission(&mut self, now: DateTime<Utc>) -> Option<Event> {
        let grade = self.intermission.dismiss()?;
        self.surface.hide_intermission();
        self.bridge.resume_review(grade);
        Some(Event::IntermissionDismissed { grade, at: now })
    }

    /// User clicked the intermission image. Forwards the replay request;
    /// no state change.
    pub fn replay_intermission_sound(&mut self) {
        if self.intermission.is_open() {
            self.bridge.replay_sound();
        }
    }

    /// Call periodically. Drives bridge readiness, response ingestion,
    /// deferred retries and the auto-hide deadline.
    pub fn tick(&mut self, now: DateTime<Utc>) -> Vec<Event> {
        let mut events = Vec::new();

        if self.phase == BridgePhase::AwaitingBridge && self.bridge.is_ready() {
            for category in Category::ALL {
                self.bridge.request_images(category);
            }
            self.phase = BridgePhase::Requested;
            events.push(Event::BridgeReady { at: now });
        }

        if self.phase == BridgePhase::Requested {
            while let Some(response) = self.bridge.poll_response() {
                if !self.pools.insert_payload(response.category, &response.payload) {
                    continue;
                }
                let count = self
                    .pools
                    .get(response.category)
                    .map(|pool| pool.len())
                    .unwrap_or(0);
                events.push(Event::PoolLoaded {
                    category: response.category,
                    count,
                    at: now,
                });

                match response.category {
                    Category::Start if self.deferred_start => {
                        self.deferred_start = false;
                        events.extend(self.show_feedback(Category::Start, now));
                    }
                    Category::Break => {
                        if let Some(grade) = self.deferred_intermission.take() {
                            events.extend(self.open_intermission(grade, now));
                        }
                    }
                    _ => {}
                }
            }
        }

        if self.feedback.due(now) {
            if let Some(category) = self.feedback.clear() {
                self.surface.hide_feedback();
                self.bridge.restore_confirmation_ui();
                events.push(Event::FeedbackHidden { category, at: now });
            }
        }

        events
    }

    // ── Internal ─────────────────────────────────────────────────────

    /// Pick and display an image for `category`. An absent or empty pool is
    /// a silent no-op: no surface call, no signal, and -- unlike a
    /// successful display -- no change to a pending hide deadline.
    fn show_feedback(&mut self, category: Category, now: DateTime<Utc>) -> Option<Event> {
        if self.intermission.is_open() {
            return None;
        }
        let pool = self.pools.get(category)?;
        let image = select::pick(&mut self.rng, pool)?.to_string();

        // Supersedes any pending deadline: last call wins, the overlay
        // stays up continuously between the two.
        self.feedback
            .begin(category, now, self.config.feedback.display_ms);
        self.bridge.suppress_confirmation_ui();
        self.surface.show_feedback(&image, category);
        Some(Event::FeedbackShown {
            category,
            image,
            at: now,
        })
    }

    /// Open the intermission modal. The break pool is loaded at this point;
    /// an empty one drops the grade and reports the skip.
    fn open_intermission(&mut self, grade: Category, now: DateTime<Utc>) -> Option<Event> {
        if self.intermission.is_open() {
            return None;
        }
        let pool = self.pools.get(Category::Break).unwrap_or(&[]);
        let image = match select::pick(&mut self.rng, pool) {
            Some(image) => image.to_string(),
            None => return Some(Event::IntermissionSkipped { grade, at: now }),
        };

        // The two overlays never show together: a still-visible feedback
        // image comes down (and its deadline with it) before the modal.
        if self.feedback.clear().is_some() {
            self.surface.hide_feedback();
        }
        self.bridge.suppress_confirmation_ui();
        self.surface.show_intermission(&image);
        self.intermission.open(grade);
        Some(Event::IntermissionOpened {
            grade,
            image,
            at: now,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::PoolResponse;
    use chrono::Duration;

    #[derive(Default)]
    struct NullBridge {
        ready: bool,
        replays: usize,
    }

    impl HostBridge for NullBridge {
        fn is_ready(&self) -> bool {
            self.ready
        }
        fn request_images(&mut self, _category: Category) {}
        fn poll_response(&mut self) -> Option<PoolResponse> {
            None
        }
        fn suppress_confirmation_ui(&mut self) {}
        fn restore_confirmation_ui(&mut self) {}
        fn resume_review(&mut self, _grade: Category) {}
        fn replay_sound(&mut self) {
            self.replays += 1;
        }
    }

    #[derive(Default)]
    struct NullSurface;

    impl OverlaySurface for NullSurface {
        fn mount(&mut self) {}
        fn show_feedback(&mut self, _image: &str, _category: Category) {}
        fn hide_feedback(&mut self) {}
        fn show_intermission(&mut self, _image: &str) {}
        fn hide_intermission(&mut self) {}
    }

    fn at(ms: i64) -> DateTime<Utc> {
        DateTime::<Utc>::UNIX_EPOCH + Duration::milliseconds(ms)
    }

    fn controller() -> Controller<NullBridge, NullSurface> {
        Controller::new(Config::default(), NullBridge::default(), NullSurface)
    }

    #[test]
    fn answer_before_any_pool_is_inert() {
        let mut controller = controller();
        assert!(controller.on_answer(Category::Good, at(0)).is_none());
        assert!(controller.tick(at(5000)).is_empty());
    }

    #[test]
    fn replay_outside_intermission_is_inert() {
        let mut controller = controller();
        controller.replay_intermission_sound();
        assert_eq!(controller.bridge().replays, 0);
    }

    #[test]
    fn snapshot_reports_initial_state() {
        let controller = controller();
        match controller.snapshot(at(0)) {
            Event::StateSnapshot {
                bridge_ready,
                loaded_pools,
                feedback_category,
                awaiting_dismissal,
                deferred_start,
                deferred_intermission,
                ..
            } => {
                assert!(!bridge_ready);
                assert!(loaded_pools.is_empty());
                assert_eq!(feedback_category, None);
                assert_eq!(awaiting_dismissal, None);
                assert!(!deferred_start);
                assert_eq!(deferred_intermission, None);
            }
            _ => panic!("Expected StateSnapshot"),
        }
    }

    #[test]
    fn unready_bridge_issues_no_requests() {
        let mut controller = controller();
        assert!(controller.tick(at(0)).is_empty());
        controller.bridge_mut().ready = true;
        let events = controller.tick(at(10));
        assert!(matches!(events.as_slice(), [Event::BridgeReady { .. }]));
        // Readiness is observed once; later ticks do not re-request.
        assert!(controller.tick(at(20)).is_empty());
    }
}
