use crate::foundation::core::{AnchorGeometry, AnchorId, Length, RegionId, ScrollRange, Viewport};
use crate::foundation::error::{ChoreoError, ChoreoResult};

/// Host-assigned handle of an attached trigger.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct TriggerId(pub u64);

/// Host-assigned handle of a running scroll animation.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct ScrollAnimationId(pub u64);

/// A point where an anchor edge meets a viewport line.
///
/// `anchor` is a fraction of the anchor's height measured from its top, `viewport` a fraction of
/// the viewport height measured from its top. "Anchor top hits viewport top" is
/// [`TriggerEdge::TOP_TOP`]; "anchor top hits 80% down the viewport" is `at(0.0, 0.8)`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TriggerEdge {
    /// Fraction of the anchor's height from its top.
    pub anchor: f64,
    /// Fraction of the viewport height from its top.
    pub viewport: f64,
}

impl TriggerEdge {
    /// Anchor top at viewport top.
    pub const TOP_TOP: Self = Self {
        anchor: 0.0,
        viewport: 0.0,
    };

    /// Edge from an anchor fraction and a viewport fraction.
    pub fn at(anchor: f64, viewport: f64) -> Self {
        Self { anchor, viewport }
    }

    /// Scroll offset at which this edge is reached.
    pub fn resolve(self, geometry: AnchorGeometry, viewport: Viewport) -> f64 {
        geometry.top + self.anchor * geometry.height - self.viewport * viewport.height
    }
}

/// Where a trigger's active range ends.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum TriggerEnd {
    /// Where another anchor edge meets a viewport line.
    Edge(TriggerEdge),
    /// Fixed distance past the start.
    Distance(Length),
    /// The configured reserved distance for pinned regions.
    PinDistance,
}

/// Start and end of a region's active scroll range.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TriggerBounds {
    /// Progress 0.
    pub start: TriggerEdge,
    /// Progress 1.
    pub end: TriggerEnd,
}

impl TriggerBounds {
    /// Pinned from the moment the anchor reaches the viewport top, for the reserved distance.
    pub const PINNED: Self = Self {
        start: TriggerEdge::TOP_TOP,
        end: TriggerEnd::PinDistance,
    };

    /// Bounds between two edges.
    pub fn between(start: TriggerEdge, end: TriggerEdge) -> Self {
        Self {
            start,
            end: TriggerEnd::Edge(end),
        }
    }

    /// Absolute range for an anchor measured at `geometry`.
    pub fn resolve(
        self,
        geometry: AnchorGeometry,
        viewport: Viewport,
        pin_distance: Length,
    ) -> ChoreoResult<ScrollRange> {
        let start = self.start.resolve(geometry, viewport);
        let end = match self.end {
            TriggerEnd::Edge(edge) => edge.resolve(geometry, viewport),
            TriggerEnd::Distance(len) => start + len.resolve(viewport),
            TriggerEnd::PinDistance => start + pin_distance.resolve(viewport),
        };
        if end < start {
            return Err(ChoreoError::measurement(format!(
                "trigger ends at {end} before it starts at {start}"
            )));
        }
        ScrollRange::new(start, end)
    }
}

/// How shown progress follows scroll progress.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Scrub {
    /// Shown progress equals scroll progress.
    Instant,
    /// Shown progress catches up with scroll progress over roughly `secs` seconds.
    Smooth {
        /// Catch-up time.
        secs: f64,
    },
}

/// Who owns an attached trigger.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum TriggerRole {
    /// The trigger of one section.
    Region {
        /// Section id.
        id: RegionId,
        /// Measured anchor.
        anchor: AnchorId,
    },
    /// The page-wide snap trigger.
    Snap,
}

/// Everything a host needs to attach a trigger.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TriggerSpec {
    /// Owner of the trigger.
    pub role: TriggerRole,
    /// Absolute range the trigger reports progress over.
    pub range: ScrollRange,
    /// Hold the anchor in place across the range.
    pub pin: bool,
    /// Extra scroll distance the host inserts after the anchor while it is pinned.
    pub pin_spacing: f64,
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/trigger.rs"]
mod tests;
