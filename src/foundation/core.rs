use crate::foundation::error::{ChoreoError, ChoreoResult};

pub use kurbo::{Affine, Vec2};

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            /// Borrow the underlying identifier.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(
    /// Stable identifier of one page region (section).
    RegionId
);
string_id!(
    /// Handle of the layout element whose position defines a region's scroll range.
    AnchorId
);
string_id!(
    /// Handle of one visual element animated by a phase.
    TargetId
);

/// Size of the scroll container's visible area in pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    /// Visible width.
    pub width: f64,
    /// Visible height.
    pub height: f64,
}

impl Viewport {
    /// Reject empty or non-finite sizes.
    pub fn new(width: f64, height: f64) -> ChoreoResult<Self> {
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            return Err(ChoreoError::validation(
                "Viewport width and height must be finite and > 0",
            ));
        }
        Ok(Self { width, height })
    }
}

/// A distance expressed in pixels or relative to the viewport.
///
/// `Vw(60.0)` is 60% of the viewport width, `Vh(130.0)` is 130% of its height.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Length {
    /// Absolute pixels.
    Px(f64),
    /// Percent of the viewport width.
    Vw(f64),
    /// Percent of the viewport height.
    Vh(f64),
}

impl Length {
    /// Zero pixels.
    pub const ZERO: Self = Self::Px(0.0);

    /// Absolute pixels.
    pub fn px(v: f64) -> Self {
        Self::Px(v)
    }

    /// Percent of the viewport width.
    pub fn vw(percent: f64) -> Self {
        Self::Vw(percent)
    }

    /// Percent of the viewport height.
    pub fn vh(percent: f64) -> Self {
        Self::Vh(percent)
    }

    /// Resolve to pixels against `viewport`.
    pub fn resolve(self, viewport: Viewport) -> f64 {
        match self {
            Self::Px(v) => v,
            Self::Vw(p) => viewport.width * p / 100.0,
            Self::Vh(p) => viewport.height * p / 100.0,
        }
    }

    pub(crate) fn raw(self) -> f64 {
        match self {
            Self::Px(v) | Self::Vw(v) | Self::Vh(v) => v,
        }
    }
}

/// Absolute scroll-offset bounds `[start, end]` in pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScrollRange {
    /// Offset at which progress is 0.
    pub start: f64,
    /// Offset at which progress is 1.
    pub end: f64,
}

impl ScrollRange {
    /// Create a validated range with finite bounds and `start <= end`.
    ///
    /// Equal bounds are accepted; such a range is degenerate and maps to no progress.
    pub fn new(start: f64, end: f64) -> ChoreoResult<Self> {
        if !(start.is_finite() && end.is_finite()) {
            return Err(ChoreoError::measurement("ScrollRange bounds must be finite"));
        }
        if start > end {
            return Err(ChoreoError::measurement("ScrollRange start must be <= end"));
        }
        Ok(Self { start, end })
    }

    /// Distance between the bounds.
    pub fn len(self) -> f64 {
        self.end - self.start
    }

    /// `true` when the range cannot produce progress (`end <= start`).
    pub fn is_degenerate(self) -> bool {
        !(self.end > self.start)
    }

    /// Return `true` when `offset` is inside `[start, end]`.
    pub fn contains(self, offset: f64) -> bool {
        self.start <= offset && offset <= self.end
    }
}

/// Measured position of an anchor in absolute scroll coordinates.
///
/// Hosts report the position after any pin spacers inserted by already attached triggers.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AnchorGeometry {
    /// Offset of the anchor's top edge from the top of the scrollable content.
    pub top: f64,
    /// Height of the anchor.
    pub height: f64,
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
