use crate::{
    animation::ease::Ease,
    foundation::core::Length,
    foundation::error::{ChoreoError, ChoreoResult},
    scroll::trigger::Scrub,
};

/// Bounds of the snap animation, in seconds.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SnapDuration {
    /// Duration for a release right next to the target.
    pub min: f64,
    /// Duration for a release half a range or more away.
    pub max: f64,
}

impl Default for SnapDuration {
    fn default() -> Self {
        Self {
            min: 0.15,
            max: 0.35,
        }
    }
}

/// Tuning knobs of the engine.
///
/// None of these are correctness requirements; the defaults reproduce the landing page's feel.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChoreoConfig {
    /// Scroll distance reserved by a pinned region.
    pub pin_distance: Length,
    /// Fraction of total scroll within which a released gesture still snaps into a pinned range.
    pub snap_tolerance: f64,
    /// Snap animation length bounds.
    pub snap_duration: SnapDuration,
    /// Snap animation curve.
    pub snap_ease: Ease,
    /// Normalized distance below which no snap animation is started.
    pub snap_epsilon: f64,
    /// Scrub mode for sections that do not set their own.
    pub scrub: Scrub,
}

impl Default for ChoreoConfig {
    fn default() -> Self {
        Self {
            pin_distance: Length::Vh(130.0),
            snap_tolerance: 0.02,
            snap_duration: SnapDuration::default(),
            snap_ease: Ease::OutCubic,
            snap_epsilon: 1e-4,
            scrub: Scrub::Smooth { secs: 0.6 },
        }
    }
}

impl ChoreoConfig {
    /// Parse and validate a JSON document; omitted fields keep their defaults.
    pub fn from_json(text: &str) -> ChoreoResult<Self> {
        let config: Self =
            serde_json::from_str(text).map_err(|e| ChoreoError::serde(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject non-finite or out-of-range values.
    pub fn validate(&self) -> ChoreoResult<()> {
        let pin = self.pin_distance.raw();
        if !(pin.is_finite() && pin >= 0.0) {
            return Err(ChoreoError::validation("pin_distance must be finite and >= 0"));
        }
        if !(self.snap_tolerance.is_finite() && (0.0..0.5).contains(&self.snap_tolerance)) {
            return Err(ChoreoError::validation("snap_tolerance must be in [0, 0.5)"));
        }
        let d = self.snap_duration;
        if !(d.min.is_finite() && d.max.is_finite() && 0.0 <= d.min && d.min <= d.max) {
            return Err(ChoreoError::validation(
                "snap_duration must satisfy 0 <= min <= max",
            ));
        }
        if !(self.snap_epsilon.is_finite() && self.snap_epsilon >= 0.0) {
            return Err(ChoreoError::validation("snap_epsilon must be finite and >= 0"));
        }
        validate_scrub(self.scrub)
    }
}

pub(crate) fn validate_secs(secs: f64, what: &str) -> ChoreoResult<()> {
    if secs.is_finite() && secs >= 0.0 {
        Ok(())
    } else {
        Err(ChoreoError::validation(format!("{what} must be finite and >= 0")))
    }
}

pub(crate) fn validate_scrub(scrub: Scrub) -> ChoreoResult<()> {
    match scrub {
        Scrub::Instant => Ok(()),
        Scrub::Smooth { secs } if secs.is_finite() && secs > 0.0 => Ok(()),
        Scrub::Smooth { .. } => Err(ChoreoError::validation(
            "smooth scrub needs a finite duration > 0",
        )),
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
