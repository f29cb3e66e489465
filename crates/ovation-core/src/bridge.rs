use crate::category::Category;

/// One arrived pool response: the category it answers and the raw textual
/// payload (see [`crate::protocol::decode_pool_payload`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolResponse {
    pub category: Category,
    pub payload: String,
}

/// Asynchronous channel to the surrounding review application.
///
/// The host side may come up after the controller does, so readiness is
/// probed before any request goes out. Requests are fire-and-forget or
/// single-response; responses are drained via [`HostBridge::poll_response`]
/// in whatever order the host produced them.
pub trait HostBridge {
    /// Whether the host side of the channel is wired up yet.
    fn is_ready(&self) -> bool;

    /// Ask the host for one category's image pool. Issued at most once per
    /// category per page lifetime.
    fn request_images(&mut self, category: Category);

    /// Take one arrived response, any category, any order.
    fn poll_response(&mut self) -> Option<PoolResponse>;

    /// Tell the host to suppress its answer-confirmation UI while an image
    /// or the intermission modal covers the card.
    fn suppress_confirmation_ui(&mut self);

    /// Re-enable the answer-confirmation UI after feedback hides.
    fn restore_confirmation_ui(&mut self);

    /// Continue grading with the remembered grade after an intermission.
    fn resume_review(&mut self, grade: Category);

    /// Replay the intermission sound.
    fn replay_sound(&mut self);
}
