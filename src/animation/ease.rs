/// Easing curves used to map normalized phase progress.
///
/// The polynomial families line up with the "power" naming common in web animation tooling:
/// `power1` is quadratic, `power2` cubic, `power3` quartic.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Ease {
    /// Linear interpolation (`none`).
    #[default]
    Linear,
    /// Quadratic ease-in (`power1.in`).
    InQuad,
    /// Quadratic ease-out (`power1.out`).
    OutQuad,
    /// Quadratic ease-in/out.
    InOutQuad,
    /// Cubic ease-in (`power2.in`), the accelerating exit curve.
    InCubic,
    /// Cubic ease-out (`power2.out`), the decelerating entrance curve.
    OutCubic,
    /// Cubic ease-in/out.
    InOutCubic,
    /// Quartic ease-in (`power3.in`).
    InQuart,
    /// Quartic ease-out (`power3.out`).
    OutQuart,
}

impl Ease {
    /// Default curve for exit phases: sharp dismissal.
    pub const EXIT: Self = Self::InCubic;
    /// Default curve for entrance phases: fast reveal that settles softly.
    pub const ENTRANCE: Self = Self::OutCubic;

    /// Apply this easing function to normalized progress `t`, clamped to `[0, 1]`.
    ///
    /// Endpoints are exact: `apply(0.0) == 0.0` and `apply(1.0) == 1.0` for every curve.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InQuad => ease_in(t, 2),
            Self::OutQuad => ease_out(t, 2),
            Self::InOutQuad => ease_in_out(t, 2),
            Self::InCubic => ease_in(t, 3),
            Self::OutCubic => ease_out(t, 3),
            Self::InOutCubic => ease_in_out(t, 3),
            Self::InQuart => ease_in(t, 4),
            Self::OutQuart => ease_out(t, 4),
        }
    }

    /// `true` for curves that start slow and finish fast.
    pub fn is_accelerating(self) -> bool {
        matches!(self, Self::InQuad | Self::InCubic | Self::InQuart)
    }

    /// `true` for curves that start fast and finish slow.
    pub fn is_decelerating(self) -> bool {
        matches!(self, Self::OutQuad | Self::OutCubic | Self::OutQuart)
    }
}

fn ease_in(t: f64, power: i32) -> f64 {
    t.powi(power)
}

fn ease_out(t: f64, power: i32) -> f64 {
    1.0 - (1.0 - t).powi(power)
}

fn ease_in_out(t: f64, power: i32) -> f64 {
    if t < 0.5 {
        2f64.powi(power - 1) * t.powi(power)
    } else {
        1.0 - (-2.0 * t + 2.0).powi(power) / 2.0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
