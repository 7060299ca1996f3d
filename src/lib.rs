//! Scroll choreography engine.
//!
//! Binds page sections to the scroll position of a container and drives their property
//! animations from it:
//!
//! 1. **Measure**: each section's anchor is measured through a [`ScrollHost`] and turned into an
//!    absolute [`ScrollRange`]; pinned sections reserve extra scroll distance while they play.
//! 2. **Map**: every scroll sample becomes a normalized progress per region ([`map_progress`]).
//! 3. **Evaluate**: a region's entrance, hold and exit phases are flattened into per-property
//!    channels ([`PhaseTimeline`]) and sampled at that progress.
//! 4. **Snap**: once layout is stable, all pinned ranges feed one [`SnapCoordinator`] that settles
//!    released gestures on the nearest pinned center.
//!
//! [`Choreography::setup`] runs the whole mount sequence and returns the handle whose
//! [`teardown`](Choreography::teardown) (or drop) undoes it.
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **No I/O**: everything outside the engine goes through the host trait.
//! - **Allocation-free frames**: per-frame evaluation writes into buffers sized at registration.
#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![allow(missing_docs_in_private_items)]

mod animation;
mod choreo;
mod config;
mod foundation;
mod scroll;

/// Declarations of complete pages built on the engine.
pub mod presets;

pub use animation::ease::Ease;
pub use animation::state::{PartialState, Property, VisualState, lerp};
pub use animation::timeline::{
    DEFAULT_TWEEN_DURATION, Phase, PhaseKind, PhaseMarks, Position, Timeline, TimelineBuilder,
    Tween, Window,
};
pub use choreo::lifecycle::{Choreography, PageSpec};
pub use choreo::phase::PhaseTimeline;
pub use choreo::region::{Intro, IntroClock, Region, RegionController, SectionSpec};
pub use choreo::registry::Registry;
pub use choreo::snap::{PinnedRange, SnapCoordinator, SnapPlan};
pub use choreo::state::{Edge, Pose, RegionState};
pub use config::{ChoreoConfig, SnapDuration};
pub use foundation::core::{
    Affine, AnchorGeometry, AnchorId, Length, RegionId, ScrollRange, TargetId, Vec2, Viewport,
};
pub use foundation::error::{ChoreoError, ChoreoResult};
pub use scroll::headless::{HeadlessHost, ScrollAnimation};
pub use scroll::host::ScrollHost;
pub use scroll::progress::{ScrollDirection, map_progress};
pub use scroll::trigger::{
    ScrollAnimationId, Scrub, TriggerBounds, TriggerEdge, TriggerEnd, TriggerId, TriggerRole,
    TriggerSpec,
};
