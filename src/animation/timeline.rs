//! Declarative phases and the sequencing builder that produces them.
//!
//! Sections author their animation arc on a time axis, the way a tween timeline is written:
//! each tween is placed at an absolute position or relative to the current end of the timeline
//! and lasts [`DEFAULT_TWEEN_DURATION`] unless told otherwise. [`TimelineBuilder::build`]
//! normalizes that axis to `[0, 1]` so every tween becomes a [`Phase`] keyed to a progress
//! window. For scroll-driven regions the progress comes from the scroll position; for intros it
//! comes from wall-clock time divided by [`Timeline::duration`].

use crate::{
    animation::{ease::Ease, state::PartialState},
    foundation::core::TargetId,
    foundation::error::{ChoreoError, ChoreoResult},
};

/// Duration of a tween that does not set one, in timeline units.
pub const DEFAULT_TWEEN_DURATION: f64 = 0.5;

/// Normalized progress sub-range `[from, to]` during which a phase is live.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Window {
    /// Progress at which the phase starts.
    pub from: f64,
    /// Progress at which the phase has reached its end state.
    pub to: f64,
}

impl Window {
    /// The whole arc.
    pub const FULL: Self = Self { from: 0.0, to: 1.0 };

    /// Create a validated window.
    pub fn new(from: f64, to: f64) -> ChoreoResult<Self> {
        let w = Self { from, to };
        w.validate()?;
        Ok(w)
    }

    /// Check `0 <= from <= to <= 1` with finite bounds.
    pub fn validate(self) -> ChoreoResult<()> {
        if !(self.from.is_finite() && self.to.is_finite()) {
            return Err(ChoreoError::validation("Window bounds must be finite"));
        }
        if !(0.0 <= self.from && self.from <= self.to && self.to <= 1.0) {
            return Err(ChoreoError::validation(
                "Window must satisfy 0 <= from <= to <= 1",
            ));
        }
        Ok(())
    }

    /// Inclusive on both edges.
    pub fn contains(self, p: f64) -> bool {
        self.from <= p && p <= self.to
    }

    /// Width of the window in progress units.
    pub fn len(self) -> f64 {
        self.to - self.from
    }
}

/// Where a phase sits in the region's arc.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum PhaseKind {
    /// Reveals targets on the way in.
    Entrance,
    /// Keeps targets in place between entrance and exit.
    Hold,
    /// Dismisses targets on the way out.
    Exit,
}

/// One keyframe-interpolated sub-animation of a region.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Phase {
    /// Position in the arc.
    pub kind: PhaseKind,
    /// Targets in stagger order.
    pub targets: Vec<TargetId>,
    /// Progress range the whole group animates in.
    pub window: Window,
    /// State at `window.from`.
    pub from: PartialState,
    /// State at `window.to`.
    pub to: PartialState,
    /// Curve applied to each member's local progress.
    pub ease: Ease,
    /// Delay between consecutive targets, in progress units.
    pub stagger: f64,
}

impl Phase {
    fn with_kind(kind: PhaseKind, targets: Vec<TargetId>, window: Window, ease: Ease) -> Self {
        Self {
            kind,
            targets,
            window,
            from: PartialState::default(),
            to: PartialState::default(),
            ease,
            stagger: 0.0,
        }
    }

    /// Entrance phase with the decelerating default curve.
    pub fn entrance(targets: impl IntoIterator<Item = TargetId>, window: Window) -> Self {
        Self::with_kind(
            PhaseKind::Entrance,
            targets.into_iter().collect(),
            window,
            Ease::ENTRANCE,
        )
    }

    /// Linear hold phase.
    pub fn hold(targets: impl IntoIterator<Item = TargetId>, window: Window) -> Self {
        Self::with_kind(
            PhaseKind::Hold,
            targets.into_iter().collect(),
            window,
            Ease::Linear,
        )
    }

    /// Exit phase with the accelerating default curve.
    pub fn exit(targets: impl IntoIterator<Item = TargetId>, window: Window) -> Self {
        Self::with_kind(
            PhaseKind::Exit,
            targets.into_iter().collect(),
            window,
            Ease::EXIT,
        )
    }

    /// Set the start state.
    pub fn from_state(mut self, state: PartialState) -> Self {
        self.from = state;
        self
    }

    /// Set the end state.
    pub fn to_state(mut self, state: PartialState) -> Self {
        self.to = state;
        self
    }

    /// Override the curve.
    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    /// Set the delay between consecutive targets, in progress units.
    pub fn stagger(mut self, stagger: f64) -> Self {
        self.stagger = stagger;
        self
    }

    /// Window of the `i`-th of `n` targets once the stagger is applied.
    ///
    /// Every target keeps the same length; the first starts at `window.from` and the last ends at
    /// `window.to`.
    pub fn member_window(&self, i: usize, n: usize) -> Window {
        if n <= 1 {
            return self.window;
        }
        let lead = self.stagger * i as f64;
        let tail = self.stagger * (n - 1 - i) as f64;
        Window {
            from: self.window.from + lead,
            to: self.window.to - tail,
        }
    }

    /// Reject bad windows, staggers that overflow the window and one-sided properties.
    pub fn validate(&self) -> ChoreoResult<()> {
        self.window.validate()?;
        if !(self.stagger.is_finite() && self.stagger >= 0.0) {
            return Err(ChoreoError::validation("Phase stagger must be finite and >= 0"));
        }
        let n = self.targets.len();
        let gaps = n.saturating_sub(1) as f64;
        if n > 1 && self.window.len() - self.stagger * gaps < -1e-12 {
            return Err(ChoreoError::validation(format!(
                "Phase stagger {} over {n} targets does not fit its window",
                self.stagger
            )));
        }
        if !(self.from.all_finite() && self.to.all_finite()) {
            return Err(ChoreoError::validation("Phase states must be finite"));
        }
        for prop in crate::animation::state::Property::ALL {
            if self.from.names(prop) != self.to.names(prop) {
                return Err(ChoreoError::validation(format!(
                    "Phase animates {prop:?} without both a start and an end value"
                )));
            }
        }
        Ok(())
    }
}

/// Boundaries of the settled stretch of a region's arc.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct PhaseMarks {
    /// Progress at which every entrance phase has finished (0 without entrances).
    pub entrance_end: f64,
    /// Progress at which the first exit phase starts (1 without exits).
    pub exit_start: f64,
}

/// An ordered list of phases on a normalized axis plus the length of the authoring axis.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Timeline {
    /// Phases in declaration order.
    pub phases: Vec<Phase>,
    /// Length of the axis the tweens were authored on; seconds when played as an intro.
    pub duration: f64,
}

impl Timeline {
    /// Wrap phases whose windows were authored directly in progress units.
    pub fn from_phases(phases: Vec<Phase>) -> Self {
        Self {
            phases,
            duration: 1.0,
        }
    }

    /// `true` without phases.
    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    /// Where entrances end and exits begin.
    pub fn marks(&self) -> PhaseMarks {
        let entrance_end = self
            .phases
            .iter()
            .filter(|p| p.kind == PhaseKind::Entrance)
            .map(|p| p.window.to)
            .fold(0.0, f64::max);
        let exit_start = self
            .phases
            .iter()
            .filter(|p| p.kind == PhaseKind::Exit)
            .map(|p| p.window.from)
            .fold(1.0, f64::min);
        PhaseMarks {
            entrance_end,
            exit_start,
        }
    }

    /// Validate every phase plus the entrance → hold → exit ordering.
    pub fn validate(&self) -> ChoreoResult<()> {
        if !(self.duration.is_finite() && self.duration >= 0.0) {
            return Err(ChoreoError::validation("Timeline duration must be finite and >= 0"));
        }
        for phase in &self.phases {
            phase.validate()?;
        }

        let starts = |kind: PhaseKind| {
            self.phases
                .iter()
                .filter(move |p| p.kind == kind)
                .map(|p| p.window.from)
        };
        let latest = |kind| starts(kind).fold(f64::NEG_INFINITY, f64::max);
        let earliest = |kind| starts(kind).fold(f64::INFINITY, f64::min);

        if latest(PhaseKind::Entrance) > earliest(PhaseKind::Hold)
            || latest(PhaseKind::Hold) > earliest(PhaseKind::Exit)
            || latest(PhaseKind::Entrance) > earliest(PhaseKind::Exit)
        {
            return Err(ChoreoError::validation(
                "Phases must start in entrance, hold, exit order",
            ));
        }
        let marks = self.marks();
        if marks.entrance_end > marks.exit_start {
            return Err(ChoreoError::validation(format!(
                "entrance phases end at {} after the first exit starts at {}",
                marks.entrance_end, marks.exit_start
            )));
        }
        Ok(())
    }
}

/// Placement of a tween on the timeline axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Position {
    /// Absolute time.
    At(f64),
    /// Relative to the current end of the timeline; `FromEnd(-0.7)` overlaps the previous tail.
    FromEnd(f64),
}

impl Position {
    /// Right after everything placed so far.
    pub const END: Self = Self::FromEnd(0.0);
}

/// One property transition on the authoring axis.
#[derive(Clone, Debug, PartialEq)]
pub struct Tween {
    kind: PhaseKind,
    targets: Vec<TargetId>,
    from: PartialState,
    to: PartialState,
    ease: Ease,
    duration: f64,
    stagger: f64,
}

impl Tween {
    fn with_kind(kind: PhaseKind, targets: Vec<TargetId>, ease: Ease) -> Self {
        Self {
            kind,
            targets,
            from: PartialState::default(),
            to: PartialState::default(),
            ease,
            duration: DEFAULT_TWEEN_DURATION,
            stagger: 0.0,
        }
    }

    /// Entrance tween with the decelerating default curve.
    pub fn entrance(targets: impl IntoIterator<Item = TargetId>) -> Self {
        Self::with_kind(
            PhaseKind::Entrance,
            targets.into_iter().collect(),
            Ease::ENTRANCE,
        )
    }

    /// Linear hold tween.
    pub fn hold(targets: impl IntoIterator<Item = TargetId>) -> Self {
        Self::with_kind(PhaseKind::Hold, targets.into_iter().collect(), Ease::Linear)
    }

    /// Exit tween with the accelerating default curve.
    pub fn exit(targets: impl IntoIterator<Item = TargetId>) -> Self {
        Self::with_kind(PhaseKind::Exit, targets.into_iter().collect(), Ease::EXIT)
    }

    /// Set the start state.
    pub fn from(mut self, state: PartialState) -> Self {
        self.from = state;
        self
    }

    /// Set the end state.
    pub fn to(mut self, state: PartialState) -> Self {
        self.to = state;
        self
    }

    /// Override the curve.
    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    /// Per-target duration on the authoring axis.
    pub fn duration(mut self, duration: f64) -> Self {
        self.duration = duration;
        self
    }

    /// Per-target delay; the tween spans `duration + (n - 1) * stagger`.
    pub fn stagger(mut self, stagger: f64) -> Self {
        self.stagger = stagger;
        self
    }

    fn span(&self) -> f64 {
        let extra = self.targets.len().saturating_sub(1) as f64;
        self.duration + self.stagger * extra
    }
}

/// Sequences tweens on a time axis and normalizes them into a [`Timeline`].
#[derive(Debug, Default)]
pub struct TimelineBuilder {
    placed: Vec<(f64, Tween)>,
    end: f64,
}

impl TimelineBuilder {
    /// An empty timeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Place `tween` at `position`. Negative resolved start times clamp to 0.
    pub fn add(mut self, tween: Tween, position: Position) -> Self {
        let start = match position {
            Position::At(t) => t,
            Position::FromEnd(offset) => self.end + offset,
        }
        .max(0.0);
        self.end = self.end.max(start + tween.span());
        self.placed.push((start, tween));
        self
    }

    /// Normalize every placed tween by the total length and validate the result.
    pub fn build(self) -> ChoreoResult<Timeline> {
        for (start, tween) in &self.placed {
            if !(start.is_finite() && tween.duration.is_finite() && tween.duration >= 0.0) {
                return Err(ChoreoError::validation(
                    "Tween position and duration must be finite and >= 0",
                ));
            }
            if !(tween.stagger.is_finite() && tween.stagger >= 0.0) {
                return Err(ChoreoError::validation("Tween stagger must be finite and >= 0"));
            }
        }

        let duration = self.end;
        let norm = |t: f64| {
            if duration > 0.0 {
                (t / duration).clamp(0.0, 1.0)
            } else {
                0.0
            }
        };

        let phases = self
            .placed
            .into_iter()
            .map(|(start, tween)| {
                let end = start + tween.span();
                Phase {
                    kind: tween.kind,
                    window: Window {
                        from: norm(start),
                        to: norm(end),
                    },
                    targets: tween.targets,
                    from: tween.from,
                    to: tween.to,
                    ease: tween.ease,
                    stagger: if duration > 0.0 {
                        tween.stagger / duration
                    } else {
                        0.0
                    },
                }
            })
            .collect();

        let timeline = Timeline { phases, duration };
        timeline.validate()?;
        Ok(timeline)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/timeline.rs"]
mod tests;
