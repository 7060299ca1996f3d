//! Global snapping across pinned regions.
//!
//! Positions are normalized by the page's total scroll distance. A released gesture that ends
//! inside (or within `tolerance` of) any pinned range is pulled to the nearest pinned center;
//! anywhere else the page stays where the user left it.

use crate::{
    animation::ease::Ease,
    choreo::registry::Registry,
    config::{ChoreoConfig, SnapDuration},
    foundation::core::ScrollRange,
    foundation::error::{ChoreoError, ChoreoResult},
    scroll::{
        host::ScrollHost,
        trigger::{TriggerId, TriggerRole, TriggerSpec},
    },
};

/// One pinned region in normalized page coordinates.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PinnedRange {
    /// Normalized start.
    pub start: f64,
    /// Normalized end.
    pub end: f64,
    /// Snap target of this range.
    pub center: f64,
}

impl PinnedRange {
    /// Range over `[start, end]` snapping to its midpoint.
    pub fn new(start: f64, end: f64) -> Self {
        Self {
            start,
            end,
            center: start + (end - start) * 0.5,
        }
    }

    /// Normalize a pixel range by the total scroll distance; `None` if `max_scroll <= 0`.
    pub fn from_scroll_range(range: ScrollRange, max_scroll: f64) -> Option<Self> {
        if !(max_scroll.is_finite() && max_scroll > 0.0) {
            return None;
        }
        Some(Self {
            start: range.start / max_scroll,
            end: range.end / max_scroll,
            center: (range.start + range.len() * 0.5) / max_scroll,
        })
    }

    fn near(&self, v: f64, tolerance: f64) -> bool {
        v >= self.start - tolerance && v <= self.end + tolerance
    }

    fn half_span(&self) -> f64 {
        (self.end - self.start) * 0.5
    }
}

/// Scroll animation that settles a released gesture.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct SnapPlan {
    /// Target scroll offset in pixels.
    pub to: f64,
    /// Animation length, longer for releases farther from the target.
    pub duration_secs: f64,
    /// Animation curve.
    pub ease: Ease,
}

/// The single snapping policy shared by every pinned region of a page.
#[derive(Debug)]
pub struct SnapCoordinator {
    ranges: Vec<PinnedRange>,
    tolerance: f64,
    max_scroll: f64,
    duration: SnapDuration,
    ease: Ease,
    epsilon: f64,
    trigger: Option<TriggerId>,
}

impl SnapCoordinator {
    /// Coordinator over already normalized ranges, planning in normalized offsets
    /// (`max_scroll == 1`) with default animation settings.
    pub fn new(ranges: Vec<PinnedRange>, tolerance: f64) -> Self {
        let config = ChoreoConfig::default();
        Self::with_ranges(ranges, 1.0, tolerance, &config)
    }

    /// Coordinator over the active pinned regions of `registry`.
    pub fn from_registry(registry: &Registry, max_scroll: f64, config: &ChoreoConfig) -> Self {
        let ranges = registry
            .pinned()
            .filter_map(|r| PinnedRange::from_scroll_range(r.region().scroll_range, max_scroll))
            .collect();
        Self::with_ranges(ranges, max_scroll, config.snap_tolerance, config)
    }

    fn with_ranges(
        mut ranges: Vec<PinnedRange>,
        max_scroll: f64,
        tolerance: f64,
        config: &ChoreoConfig,
    ) -> Self {
        ranges.sort_by(|a, b| a.start.total_cmp(&b.start));
        Self {
            ranges,
            tolerance,
            max_scroll,
            duration: config.snap_duration,
            ease: config.snap_ease,
            epsilon: config.snap_epsilon,
            trigger: None,
        }
    }

    /// Ranges sorted by start.
    pub fn ranges(&self) -> &[PinnedRange] {
        &self.ranges
    }

    /// Total scroll distance used to normalize offsets.
    pub fn max_scroll(&self) -> f64 {
        self.max_scroll
    }

    /// Host trigger while attached.
    pub fn trigger(&self) -> Option<TriggerId> {
        self.trigger
    }

    /// No pinned ranges or nothing to scroll: every position is its own snap target.
    pub fn is_inert(&self) -> bool {
        self.ranges.is_empty() || !(self.max_scroll > 0.0)
    }

    /// Snap target for normalized position `v`.
    pub fn snap_target(&self, v: f64) -> f64 {
        self.chosen(v).map_or(v, |r| r.center)
    }

    fn chosen(&self, v: f64) -> Option<&PinnedRange> {
        if self.is_inert() || !self.ranges.iter().any(|r| r.near(v, self.tolerance)) {
            return None;
        }
        let mut best = self.ranges.first()?;
        for r in &self.ranges[1..] {
            if (r.center - v).abs() < (best.center - v).abs() {
                best = r;
            }
        }
        Some(best)
    }

    /// Plan the scroll animation for a gesture released at `current_offset` pixels.
    pub fn plan(&self, current_offset: f64) -> Option<SnapPlan> {
        if self.is_inert() || !current_offset.is_finite() {
            return None;
        }
        let v = current_offset / self.max_scroll;
        let range = self.chosen(v)?;
        let dist = (range.center - v).abs();
        if dist <= self.epsilon {
            tracing::trace!(v, target = range.center, "already at snap target");
            return None;
        }

        let half = range.half_span();
        let ratio = if half > 0.0 { (dist / half).min(1.0) } else { 1.0 };
        let duration_secs = self.duration.min + (self.duration.max - self.duration.min) * ratio;
        tracing::trace!(v, target = range.center, duration_secs, "snap planned");
        Some(SnapPlan {
            to: range.center * self.max_scroll,
            duration_secs,
            ease: self.ease,
        })
    }

    /// Attach the page-wide snap trigger. Inert coordinators attach nothing.
    pub fn attach<H: ScrollHost + ?Sized>(&mut self, host: &mut H) -> ChoreoResult<()> {
        if self.is_inert() || self.trigger.is_some() {
            return Ok(());
        }
        let spec = TriggerSpec {
            role: TriggerRole::Snap,
            range: ScrollRange::new(0.0, self.max_scroll)?,
            pin: false,
            pin_spacing: 0.0,
        };
        let id = host
            .attach_trigger(&spec)
            .map_err(|e| ChoreoError::host(e.context("attach snap trigger")))?;
        self.trigger = Some(id);
        Ok(())
    }

    /// Detach the snap trigger. Safe to call repeatedly.
    pub fn detach<H: ScrollHost + ?Sized>(&mut self, host: &mut H) {
        if let Some(id) = self.trigger.take() {
            host.detach_trigger(id);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/choreo/snap.rs"]
mod tests;
