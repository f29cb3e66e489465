use crate::category::Category;

/// Rendering seam between the controller and the page.
///
/// Implementors own the actual markup: the fixed-id containers, the
/// `visible`/`hidden` class pair on overlay and card, and a per-grade class
/// for styling. The controller only decides *when* each operation happens.
pub trait OverlaySurface {
    /// Create the overlay containers. Called once; the controller guards
    /// against repeated load events.
    fn mount(&mut self);

    /// Put an image up over the review card (overlay visible, card hidden).
    fn show_feedback(&mut self, image: &str, category: Category);

    /// Restore the card and drop the displayed image node.
    fn hide_feedback(&mut self);

    /// Render the blocking intermission modal around an image.
    fn show_intermission(&mut self, image: &str);

    /// Tear the modal down and clear its content.
    fn hide_intermission(&mut self);
}
