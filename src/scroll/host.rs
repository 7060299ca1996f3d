use crate::{
    animation::{ease::Ease, state::VisualState},
    foundation::core::{AnchorGeometry, AnchorId, TargetId, Viewport},
    scroll::trigger::{ScrollAnimationId, TriggerId, TriggerSpec},
};

/// The scroll container the engine drives.
///
/// A host owns layout, native pinning and the actual scroll position. The engine measures through
/// it, attaches one trigger per region (plus one for snapping), pushes evaluated property states
/// back into it and asks it to animate the scroll offset when a gesture settles.
///
/// Scroll events flow the other way: the host's event loop calls
/// [`Choreography::on_scroll`](crate::Choreography::on_scroll) and friends.
pub trait ScrollHost {
    /// Current size of the visible area.
    fn viewport(&self) -> Viewport;

    /// `false` while fonts, images or late layout may still move anchors.
    fn is_layout_stable(&self) -> bool;

    /// Current geometry of `anchor`, including spacers of already attached pinned triggers.
    fn measure_anchor(&self, anchor: &AnchorId) -> Option<AnchorGeometry>;

    /// Whether `target` is rendered. Optional targets may be absent.
    fn has_target(&self, target: &TargetId) -> bool;

    /// Total scrollable distance, including pin spacers.
    fn max_scroll(&self) -> f64;

    /// Start reporting `spec.range` and, for pinned specs, insert `spec.pin_spacing` of spacer.
    fn attach_trigger(&mut self, spec: &TriggerSpec) -> anyhow::Result<TriggerId>;

    /// Detaching an unknown or already detached trigger is a no-op.
    fn detach_trigger(&mut self, id: TriggerId);

    /// Write one target's evaluated properties.
    fn apply_state(&mut self, target: &TargetId, state: &VisualState);

    /// Animate the scroll offset to `to` over `duration_secs`.
    fn animate_scroll(&mut self, to: f64, duration_secs: f64, ease: Ease) -> ScrollAnimationId;

    /// Cancelling a finished or unknown animation is a no-op.
    fn cancel_scroll_animation(&mut self, id: ScrollAnimationId);
}
