//! Per-region arc state machine.
//!
//! ```text
//!            p > 0               p >= entrance_end        p >= exit_start
//!  Before ─────────▶ Entering ─────────────────▶ Settled ─────────────────▶ Exiting
//!    ▲                                                                         │
//!    └──────────────── LeaveBack (scrolling backward to p == 0) ◀──────────────┘
//! ```
//!
//! Every backward arrival at `Before` from a later state is the `LeaveBack` edge. Regions that
//! reset on leave-back answer it by switching their pose to [`Pose::Settled`]: the region is back
//! before its range, but its targets show the fully revealed state rather than the hidden one.

use crate::{animation::timeline::PhaseMarks, scroll::progress::ScrollDirection};

/// Where scroll progress sits in a region's arc.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, serde::Serialize)]
pub enum RegionState {
    /// At or above the start of the range.
    #[default]
    Before,
    /// Entrance phases are still running.
    Entering,
    /// Between the end of the entrances and the first exit.
    Settled,
    /// Exit phases have started.
    Exiting,
}

impl RegionState {
    /// The state progress `p` falls in, independent of history.
    pub fn classify(p: f64, marks: PhaseMarks) -> Self {
        if p <= 0.0 {
            Self::Before
        } else if p < marks.entrance_end {
            Self::Entering
        } else if p < marks.exit_start {
            Self::Settled
        } else {
            Self::Exiting
        }
    }
}

/// Named transitions emitted by [`RegionState::step`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum Edge {
    /// Progress left zero going forward.
    Enter,
    /// Entrances finished.
    Settle,
    /// The first exit started.
    BeginExit,
    /// Scrolled backward out of the top of the range after having progressed into it.
    LeaveBack,
    /// Any other change, e.g. scrolling back from `Exiting` into `Settled`.
    Rewind,
}

impl RegionState {
    /// Advance to the state for progress `p`, reporting the edge taken if the state changed.
    pub fn step(self, p: f64, direction: ScrollDirection, marks: PhaseMarks) -> (Self, Option<Edge>) {
        let next = Self::classify(p, marks);
        if next == self {
            return (self, None);
        }
        let edge = match (next, direction) {
            (Self::Before, ScrollDirection::Backward) => Edge::LeaveBack,
            (Self::Entering, _) if self == Self::Before => Edge::Enter,
            (Self::Settled, _) if self < Self::Settled => Edge::Settle,
            (Self::Exiting, _) => Edge::BeginExit,
            _ => Edge::Rewind,
        };
        (next, Some(edge))
    }
}

/// What a region's targets display.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub enum Pose {
    /// Follow the phase timeline at the shown progress.
    #[default]
    Scrubbed,
    /// Hold the fully revealed resting state until progress becomes positive again.
    Settled,
}

#[cfg(test)]
#[path = "../../tests/unit/choreo/state.rs"]
mod tests;
