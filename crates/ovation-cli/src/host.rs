//! Scripted host collaborators.
//!
//! The CLI has no webview, so the host side of the bridge is played by a
//! script: readiness flips when the script says so, pool responses are
//! queued by it, and everything the controller sends out is captured as
//! wire-format channel strings for printing.

use std::collections::VecDeque;

use ovation_core::{protocol, Category, HostBridge, OverlaySurface, PoolResponse};

pub struct ScriptedBridge {
    namespace: String,
    ready: bool,
    queued: VecDeque<PoolResponse>,
    outbound: Vec<String>,
}

impl ScriptedBridge {
    pub fn new(namespace: &str) -> Self {
        Self {
            namespace: namespace.to_string(),
            ready: false,
            queued: VecDeque::new(),
            outbound: Vec::new(),
        }
    }

    pub fn set_ready(&mut self) {
        self.ready = true;
    }

    pub fn queue_response(&mut self, category: Category, payload: &str) {
        self.queued.push_back(PoolResponse {
            category,
            payload: payload.to_string(),
        });
    }

    /// Drain the wire lines produced since the last call.
    pub fn take_outbound(&mut self) -> Vec<String> {
        std::mem::take(&mut self.outbound)
    }
}

impl HostBridge for ScriptedBridge {
    fn is_ready(&self) -> bool {
        self.ready
    }

    fn request_images(&mut self, category: Category) {
        self.outbound
            .push(protocol::images_channel(&self.namespace, category));
    }

    fn poll_response(&mut self) -> Option<PoolResponse> {
        self.queued.pop_front()
    }

    fn suppress_confirmation_ui(&mut self) {
        self.outbound
            .push(protocol::disable_show_answer_channel(&self.namespace));
    }

    fn restore_confirmation_ui(&mut self) {
        self.outbound
            .push(protocol::enable_show_answer_channel(&self.namespace));
    }

    fn resume_review(&mut self, grade: Category) {
        self.outbound
            .push(protocol::resume_review_channel(&self.namespace, grade));
    }

    fn replay_sound(&mut self) {
        self.outbound
            .push(protocol::replay_sound_channel(&self.namespace));
    }
}

/// Surface that records render operations as printable lines.
#[derive(Default)]
pub struct ScriptedSurface {
    ops: Vec<String>,
}

impl ScriptedSurface {
    /// Drain the render operations recorded since the last call.
    pub fn take_ops(&mut self) -> Vec<String> {
        std::mem::take(&mut self.ops)
    }
}

impl OverlaySurface for ScriptedSurface {
    fn mount(&mut self) {
        self.ops.push("mount".to_string());
    }

    fn show_feedback(&mut self, image: &str, category: Category) {
        self.ops.push(format!("showFeedback {category} {image}"));
    }

    fn hide_feedback(&mut self) {
        self.ops.push("hideFeedback".to_string());
    }

    fn show_intermission(&mut self, image: &str) {
        self.ops.push(format!("showIntermission {image}"));
    }

    fn hide_intermission(&mut self) {
        self.ops.push("hideIntermission".to_string());
    }
}
