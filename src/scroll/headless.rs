//! In-memory [`ScrollHost`] for deterministic simulation and tests.
//!
//! The host keeps a static base layout of anchors and emulates native pinning: every attached
//! pinned trigger inserts its pin spacing below its own anchor, pushing later anchors down and
//! growing the scrollable distance.

use std::collections::BTreeMap;

use anyhow::bail;

use crate::{
    animation::{ease::Ease, state::VisualState},
    foundation::core::{AnchorGeometry, AnchorId, TargetId, Viewport},
    scroll::{
        host::ScrollHost,
        trigger::{ScrollAnimationId, TriggerId, TriggerRole, TriggerSpec},
    },
};

/// A scroll animation requested by the engine.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ScrollAnimation {
    /// Target offset in pixels.
    pub to: f64,
    /// Requested length.
    pub duration_secs: f64,
    /// Requested curve.
    pub ease: Ease,
}

/// Host with a static base layout and no clock; animations stay pending until finished by hand.
#[derive(Debug)]
pub struct HeadlessHost {
    viewport: Viewport,
    content_height: f64,
    layout_stable: bool,
    anchors: BTreeMap<AnchorId, AnchorGeometry>,
    targets: BTreeMap<TargetId, Option<VisualState>>,
    triggers: BTreeMap<TriggerId, TriggerSpec>,
    animations: BTreeMap<ScrollAnimationId, ScrollAnimation>,
    next_id: u64,
    attached_total: u64,
    attach_limit: Option<usize>,
}

impl HeadlessHost {
    /// Empty, stable layout the height of `viewport`.
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            content_height: viewport.height,
            layout_stable: true,
            anchors: BTreeMap::new(),
            targets: BTreeMap::new(),
            triggers: BTreeMap::new(),
            animations: BTreeMap::new(),
            next_id: 1,
            attached_total: 0,
            attach_limit: None,
        }
    }

    /// Place `anchor` at an explicit base position, growing content to cover it.
    pub fn with_anchor(mut self, anchor: impl Into<AnchorId>, top: f64, height: f64) -> Self {
        self.anchors
            .insert(anchor.into(), AnchorGeometry { top, height });
        self.content_height = self.content_height.max(top + height);
        self
    }

    /// Append `anchor` below all current content.
    pub fn stack_anchor(mut self, anchor: impl Into<AnchorId>, height: f64) -> Self {
        let top = self
            .anchors
            .values()
            .map(|g| g.top + g.height)
            .fold(0.0, f64::max);
        self.anchors
            .insert(anchor.into(), AnchorGeometry { top, height });
        self.content_height = top + height;
        self
    }

    /// Mark `targets` as rendered.
    pub fn with_targets<I, T>(mut self, targets: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<TargetId>,
    {
        for t in targets {
            self.targets.entry(t.into()).or_insert(None);
        }
        self
    }

    /// Stop rendering `target`, as a narrow layout might.
    pub fn remove_target(&mut self, target: &TargetId) {
        self.targets.remove(target);
    }

    /// Resize; already attached triggers keep their ranges until rebuilt.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Control what [`ScrollHost::is_layout_stable`] reports.
    pub fn set_layout_stable(&mut self, stable: bool) {
        self.layout_stable = stable;
    }

    /// Make `attach_trigger` fail once `limit` triggers are live.
    pub fn set_attach_limit(&mut self, limit: Option<usize>) {
        self.attach_limit = limit;
    }

    /// Triggers currently attached.
    pub fn live_triggers(&self) -> usize {
        self.triggers.len()
    }

    /// Specs of the attached triggers, in attach order.
    pub fn triggers(&self) -> impl Iterator<Item = &TriggerSpec> {
        self.triggers.values()
    }

    /// Number of attach calls that succeeded over the host's lifetime.
    pub fn attached_total(&self) -> u64 {
        self.attached_total
    }

    /// Last state applied to `target`, `None` if nothing was applied or it is absent.
    pub fn state_of(&self, target: &TargetId) -> Option<VisualState> {
        self.targets.get(target).copied().flatten()
    }

    /// Animations requested and neither finished nor cancelled.
    pub fn scroll_animations(&self) -> impl Iterator<Item = &ScrollAnimation> {
        self.animations.values()
    }

    /// Complete a running animation, returning it.
    pub fn finish_scroll_animation(&mut self, id: ScrollAnimationId) -> Option<ScrollAnimation> {
        self.animations.remove(&id)
    }

    fn base_top(&self, anchor: &AnchorId) -> Option<f64> {
        self.anchors.get(anchor).map(|g| g.top)
    }

    fn pin_spacing_above(&self, base_top: f64) -> f64 {
        self.triggers
            .values()
            .filter(|t| t.pin)
            .filter_map(|t| match &t.role {
                TriggerRole::Region { anchor, .. } => self
                    .base_top(anchor)
                    .filter(|top| *top < base_top)
                    .map(|_| t.pin_spacing),
                TriggerRole::Snap => None,
            })
            .sum()
    }

    fn total_pin_spacing(&self) -> f64 {
        self.triggers
            .values()
            .filter(|t| t.pin)
            .map(|t| t.pin_spacing)
            .sum()
    }

    fn next(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

impl ScrollHost for HeadlessHost {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn is_layout_stable(&self) -> bool {
        self.layout_stable
    }

    fn measure_anchor(&self, anchor: &AnchorId) -> Option<AnchorGeometry> {
        let base = self.anchors.get(anchor)?;
        Some(AnchorGeometry {
            top: base.top + self.pin_spacing_above(base.top),
            height: base.height,
        })
    }

    fn has_target(&self, target: &TargetId) -> bool {
        self.targets.contains_key(target)
    }

    fn max_scroll(&self) -> f64 {
        (self.content_height + self.total_pin_spacing() - self.viewport.height).max(0.0)
    }

    fn attach_trigger(&mut self, spec: &TriggerSpec) -> anyhow::Result<TriggerId> {
        if let Some(limit) = self.attach_limit
            && self.triggers.len() >= limit
        {
            bail!("headless host refuses more than {limit} live triggers");
        }
        let id = TriggerId(self.next());
        self.triggers.insert(id, spec.clone());
        self.attached_total += 1;
        Ok(id)
    }

    fn detach_trigger(&mut self, id: TriggerId) {
        self.triggers.remove(&id);
    }

    fn apply_state(&mut self, target: &TargetId, state: &VisualState) {
        if let Some(slot) = self.targets.get_mut(target) {
            *slot = Some(*state);
        }
    }

    fn animate_scroll(&mut self, to: f64, duration_secs: f64, ease: Ease) -> ScrollAnimationId {
        let id = ScrollAnimationId(self.next());
        self.animations.insert(
            id,
            ScrollAnimation {
                to,
                duration_secs,
                ease,
            },
        );
        id
    }

    fn cancel_scroll_animation(&mut self, id: ScrollAnimationId) {
        self.animations.remove(&id);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/headless.rs"]
mod tests;
