use crate::foundation::core::{Affine, Length, Vec2, Viewport};

/// Animatable properties of one visual target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
pub enum Property {
    /// Horizontal offset in pixels.
    X,
    /// Vertical offset in pixels.
    Y,
    /// Opacity in `[0, 1]`.
    Opacity,
    /// Uniform scale factor.
    Scale,
    /// Rotation in degrees.
    Rotate,
}

impl Property {
    /// Every property, in channel order.
    pub const ALL: [Self; 5] = [Self::X, Self::Y, Self::Opacity, Self::Scale, Self::Rotate];
}

/// Fully resolved property state of one target.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct VisualState {
    /// Offset from the target's layout position, in pixels.
    pub translate: Vec2,
    /// `0.0` is invisible, `1.0` fully opaque.
    pub opacity: f64,
    /// Uniform scale around the target's origin.
    pub scale: f64,
    /// Clockwise rotation in degrees.
    pub rotation_deg: f64,
}

impl Default for VisualState {
    fn default() -> Self {
        Self::RESTING
    }
}

impl VisualState {
    /// Layout position, fully opaque, unscaled, unrotated.
    pub const RESTING: Self = Self {
        translate: Vec2::ZERO,
        opacity: 1.0,
        scale: 1.0,
        rotation_deg: 0.0,
    };

    /// Read one property.
    pub fn get(&self, prop: Property) -> f64 {
        match prop {
            Property::X => self.translate.x,
            Property::Y => self.translate.y,
            Property::Opacity => self.opacity,
            Property::Scale => self.scale,
            Property::Rotate => self.rotation_deg,
        }
    }

    /// Overwrite one property.
    pub fn set(&mut self, prop: Property, value: f64) {
        match prop {
            Property::X => self.translate.x = value,
            Property::Y => self.translate.y = value,
            Property::Opacity => self.opacity = value,
            Property::Scale => self.scale = value,
            Property::Rotate => self.rotation_deg = value,
        }
    }

    /// Transform around the target's local origin: `T(translate) * R(rotation) * S(scale)`.
    pub fn to_affine(self) -> Affine {
        Affine::translate(self.translate)
            * Affine::rotate(self.rotation_deg.to_radians())
            * Affine::scale(self.scale)
    }
}

/// A property snapshot naming only the properties a phase animates.
///
/// Translation components are [`Length`]s so keyframes can be authored relative to the viewport
/// (`x: -60vw`) and resolved once per layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PartialState {
    /// Horizontal offset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<Length>,
    /// Vertical offset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<Length>,
    /// Opacity in `[0, 1]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    /// Uniform scale factor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
    /// Rotation in degrees.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotate: Option<f64>,
}

impl PartialState {
    /// An empty snapshot naming no property.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the horizontal offset.
    pub fn x(mut self, v: Length) -> Self {
        self.x = Some(v);
        self
    }

    /// Set the vertical offset.
    pub fn y(mut self, v: Length) -> Self {
        self.y = Some(v);
        self
    }

    /// Set the opacity.
    pub fn opacity(mut self, v: f64) -> Self {
        self.opacity = Some(v);
        self
    }

    /// Set the scale factor.
    pub fn scale(mut self, v: f64) -> Self {
        self.scale = Some(v);
        self
    }

    /// Rotation in degrees.
    pub fn rotate(mut self, deg: f64) -> Self {
        self.rotate = Some(deg);
        self
    }

    /// Resolve `prop` to a plain number, `None` when this snapshot does not name it.
    pub fn resolve(&self, prop: Property, viewport: Viewport) -> Option<f64> {
        match prop {
            Property::X => self.x.map(|l| l.resolve(viewport)),
            Property::Y => self.y.map(|l| l.resolve(viewport)),
            Property::Opacity => self.opacity,
            Property::Scale => self.scale,
            Property::Rotate => self.rotate,
        }
    }

    /// `true` when this snapshot carries a value for `prop`.
    pub fn names(&self, prop: Property) -> bool {
        match prop {
            Property::X => self.x.is_some(),
            Property::Y => self.y.is_some(),
            Property::Opacity => self.opacity.is_some(),
            Property::Scale => self.scale.is_some(),
            Property::Rotate => self.rotate.is_some(),
        }
    }

    pub(crate) fn all_finite(&self) -> bool {
        [self.x, self.y].into_iter().flatten().all(|l| l.raw().is_finite())
            && [self.opacity, self.scale, self.rotate]
                .into_iter()
                .flatten()
                .all(f64::is_finite)
    }
}

/// Interpolate from `a` to `b`; `t <= 0` yields `a` and `t >= 1` yields `b` bit-for-bit.
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    if t <= 0.0 {
        a
    } else if t >= 1.0 {
        b
    } else {
        a + (b - a) * t
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/state.rs"]
mod tests;
