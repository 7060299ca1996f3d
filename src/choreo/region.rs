use crate::{
    animation::{
        state::VisualState,
        timeline::{Phase, PhaseMarks, Timeline},
    },
    choreo::{
        phase::PhaseTimeline,
        state::{Edge, Pose, RegionState},
    },
    config::{ChoreoConfig, validate_secs, validate_scrub},
    foundation::core::{AnchorId, RegionId, ScrollRange, TargetId},
    foundation::error::{ChoreoError, ChoreoResult},
    scroll::{
        host::ScrollHost,
        progress::{ScrollDirection, map_progress},
        trigger::{Scrub, TriggerBounds, TriggerId, TriggerRole, TriggerSpec},
    },
};

/// Time-driven timeline played once when the page mounts.
#[derive(Clone, Debug, PartialEq)]
pub struct Intro {
    /// Played over `timeline.duration` seconds.
    pub timeline: Timeline,
    /// Wait before the first frame moves.
    pub delay_secs: f64,
}

/// Declaration of one page section.
#[derive(Clone, Debug, PartialEq)]
pub struct SectionSpec {
    /// Unique within a page.
    pub id: RegionId,
    /// Layout element the range is measured from.
    pub anchor: AnchorId,
    /// Where the active range starts and ends.
    pub bounds: TriggerBounds,
    /// Hold the anchor in place while the range plays.
    pub pinned: bool,
    /// Overrides [`ChoreoConfig::scrub`].
    pub scrub: Option<Scrub>,
    /// Scroll-driven phases.
    pub timeline: Timeline,
    /// Time-driven timeline played on mount.
    pub intro: Option<Intro>,
    /// Show the fully revealed state after scrolling back above the region's start.
    pub reset_on_leave_back: bool,
}

impl SectionSpec {
    /// A section pinned from "anchor top at viewport top" for the reserved distance.
    pub fn pinned(id: impl Into<RegionId>, anchor: impl Into<AnchorId>, timeline: Timeline) -> Self {
        Self {
            id: id.into(),
            anchor: anchor.into(),
            bounds: TriggerBounds::PINNED,
            pinned: true,
            scrub: None,
            timeline,
            intro: None,
            reset_on_leave_back: false,
        }
    }

    /// An unpinned section that scrubs while the page scrolls through `bounds`.
    pub fn flowing(
        id: impl Into<RegionId>,
        anchor: impl Into<AnchorId>,
        bounds: TriggerBounds,
        timeline: Timeline,
    ) -> Self {
        Self {
            id: id.into(),
            anchor: anchor.into(),
            bounds,
            pinned: false,
            scrub: None,
            timeline,
            intro: None,
            reset_on_leave_back: false,
        }
    }

    /// Use `scrub` instead of the configured default.
    pub fn with_scrub(mut self, scrub: Scrub) -> Self {
        self.scrub = Some(scrub);
        self
    }

    /// Play `timeline` once on mount after `delay_secs`.
    pub fn with_intro(mut self, timeline: Timeline, delay_secs: f64) -> Self {
        self.intro = Some(Intro {
            timeline,
            delay_secs,
        });
        self
    }

    /// Show the resting state after scrolling back above the range.
    pub fn reset_on_leave_back(mut self) -> Self {
        self.reset_on_leave_back = true;
        self
    }

    /// Validate both timelines, the intro delay and the scrub override.
    pub fn validate(&self) -> ChoreoResult<()> {
        self.timeline.validate()?;
        if let Some(intro) = &self.intro {
            intro.timeline.validate()?;
            validate_secs(intro.delay_secs, "intro delay")?;
        }
        if let Some(scrub) = self.scrub {
            validate_scrub(scrub)?;
        }
        Ok(())
    }
}

/// One scroll-bound region with its measured range and the phases that survived target lookup.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Region {
    /// Section id.
    pub id: RegionId,
    /// Measured anchor.
    pub anchor: AnchorId,
    /// Absolute range measured at registration.
    pub scroll_range: ScrollRange,
    /// Whether the host pins the anchor.
    pub pinned: bool,
    /// Phases with at least one rendered target.
    pub phases: Vec<Phase>,
}

#[derive(Clone, Debug)]
struct IntroPlayback {
    timeline: PhaseTimeline,
    delay: f64,
    duration: f64,
    elapsed: f64,
    finished: bool,
}

impl IntroPlayback {
    fn progress(&self) -> f64 {
        if self.elapsed < self.delay {
            0.0
        } else if self.duration > 0.0 {
            ((self.elapsed - self.delay) / self.duration).clamp(0.0, 1.0)
        } else {
            1.0
        }
    }
}

/// How far a region's intro has played.
///
/// A [`Choreography`](crate::Choreography) carries these across rebuilds so an intro plays once
/// per mount, however often the page is re-measured.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IntroClock {
    /// Seconds since mount, including the delay.
    pub elapsed: f64,
    /// Played to its end or overtaken by scrolling.
    pub finished: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct FrameKey {
    shown: f64,
    pose: Pose,
    intro: Option<f64>,
}

/// Time for a smoothed scrub to cover 99% of the gap, per second of `Scrub::Smooth::secs`.
const SMOOTH_RATE: f64 = 4.605_170_185_988_091;
const SMOOTH_SETTLE: f64 = 1e-4;

/// Owns one region's compiled timeline, its trigger and its arc state.
#[derive(Debug)]
pub struct RegionController {
    region: Region,
    scrub: Scrub,
    marks: PhaseMarks,
    timeline: PhaseTimeline,
    targets: Vec<TargetId>,
    reset_on_leave_back: bool,
    state: RegionState,
    pose: Pose,
    scroll_progress: f64,
    shown_progress: f64,
    out: Vec<VisualState>,
    rest: Vec<VisualState>,
    intro: Option<IntroPlayback>,
    last_frame: Option<FrameKey>,
    trigger: Option<TriggerId>,
}

impl RegionController {
    /// Measure, compile and attach one section.
    ///
    /// Returns `Ok(None)` when the anchor cannot be measured into a range; such a section is
    /// left out and the rest of the page keeps animating. A degenerate range yields an inactive
    /// controller with no trigger.
    #[tracing::instrument(skip_all, fields(region = %section.id))]
    pub fn register<H: ScrollHost + ?Sized>(
        host: &mut H,
        section: &SectionSpec,
        config: &ChoreoConfig,
    ) -> ChoreoResult<Option<Self>> {
        section.validate()?;

        let viewport = host.viewport();
        let Some(geometry) = host.measure_anchor(&section.anchor) else {
            tracing::warn!(anchor = %section.anchor, "anchor is not laid out; section skipped");
            return Ok(None);
        };
        let scroll_range = match section.bounds.resolve(geometry, viewport, config.pin_distance) {
            Ok(range) => range,
            Err(err) => {
                tracing::warn!(%err, "unusable trigger bounds; section skipped");
                return Ok(None);
            }
        };

        let phases = present_phases(host, &section.id, &section.timeline.phases);
        let intro_phases = section
            .intro
            .as_ref()
            .map(|intro| present_phases(host, &section.id, &intro.timeline.phases));

        let mut targets: Vec<TargetId> = Vec::new();
        for phase in phases.iter().chain(intro_phases.iter().flatten()) {
            for t in &phase.targets {
                if host.has_target(t) && !targets.contains(t) {
                    targets.push(t.clone());
                }
            }
        }

        let timeline = PhaseTimeline::compile(&phases, &targets, viewport);
        let marks = Timeline::from_phases(phases.clone()).marks();

        let mut rest = vec![VisualState::RESTING; targets.len()];
        timeline.evaluate(marks.entrance_end, &mut rest);

        let intro = match (&section.intro, intro_phases) {
            (Some(intro), Some(phases)) if !phases.is_empty() => Some(IntroPlayback {
                timeline: PhaseTimeline::compile(&phases, &targets, viewport),
                delay: intro.delay_secs,
                duration: intro.timeline.duration,
                elapsed: 0.0,
                finished: false,
            }),
            _ => None,
        };

        let mut controller = Self {
            region: Region {
                id: section.id.clone(),
                anchor: section.anchor.clone(),
                scroll_range,
                pinned: section.pinned,
                phases,
            },
            scrub: section.scrub.unwrap_or(config.scrub),
            marks,
            timeline,
            out: vec![VisualState::RESTING; targets.len()],
            rest,
            targets,
            reset_on_leave_back: section.reset_on_leave_back,
            state: RegionState::Before,
            pose: Pose::Scrubbed,
            scroll_progress: 0.0,
            shown_progress: 0.0,
            intro,
            last_frame: None,
            trigger: None,
        };

        if scroll_range.is_degenerate() {
            tracing::debug!(start = scroll_range.start, "degenerate range; region stays inactive");
            return Ok(Some(controller));
        }

        let spec = TriggerSpec {
            role: TriggerRole::Region {
                id: section.id.clone(),
                anchor: section.anchor.clone(),
            },
            range: scroll_range,
            pin: section.pinned,
            pin_spacing: if section.pinned { scroll_range.len() } else { 0.0 },
        };
        let id = host.attach_trigger(&spec).map_err(|e| {
            ChoreoError::host(e.context(format!("attach trigger for region `{}`", section.id)))
        })?;
        controller.trigger = Some(id);
        tracing::debug!(
            start = scroll_range.start,
            end = scroll_range.end,
            pinned = section.pinned,
            "region registered"
        );
        Ok(Some(controller))
    }

    /// Section id.
    pub fn id(&self) -> &RegionId {
        &self.region.id
    }

    /// The measured region.
    pub fn region(&self) -> &Region {
        &self.region
    }

    /// Rendered targets in first-use order.
    pub fn targets(&self) -> &[TargetId] {
        &self.targets
    }

    /// Host trigger, `None` once detached or for inactive regions.
    pub fn trigger(&self) -> Option<TriggerId> {
        self.trigger
    }

    /// `false` for degenerate regions, which never animate.
    pub fn is_active(&self) -> bool {
        !self.region.scroll_range.is_degenerate()
    }

    /// Current arc state.
    pub fn state(&self) -> RegionState {
        self.state
    }

    /// What the targets currently display.
    pub fn pose(&self) -> Pose {
        self.pose
    }

    /// Arc boundaries of the surviving phases.
    pub fn marks(&self) -> PhaseMarks {
        self.marks
    }

    /// Progress of the last scroll sample.
    pub fn scroll_progress(&self) -> f64 {
        self.scroll_progress
    }

    /// Progress the timeline is rendered at; trails scroll progress under smooth scrub.
    pub fn shown_progress(&self) -> f64 {
        self.shown_progress
    }

    /// `true` while an intro is still playing.
    pub fn intro_running(&self) -> bool {
        self.intro.as_ref().is_some_and(|i| !i.finished)
    }

    /// `None` for regions without an intro.
    pub fn intro_clock(&self) -> Option<IntroClock> {
        self.intro.as_ref().map(|i| IntroClock {
            elapsed: i.elapsed,
            finished: i.finished,
        })
    }

    /// Continue the intro from `clock` instead of from the start.
    pub fn resume_intro(&mut self, clock: IntroClock) {
        if let Some(intro) = self.intro.as_mut() {
            intro.elapsed = clock.elapsed;
            intro.finished = clock.finished || intro.progress() >= 1.0;
            self.last_frame = None;
        }
    }

    /// States written by the last render, in [`targets`](Self::targets) order.
    pub fn current_states(&self) -> &[VisualState] {
        &self.out
    }

    /// Last rendered state of one target.
    pub fn state_of(&self, target: &TargetId) -> Option<VisualState> {
        let idx = self.targets.iter().position(|t| t == target)?;
        self.out.get(idx).copied()
    }

    /// Fully revealed state of every target, in [`targets`](Self::targets) order.
    pub fn resting_states(&self) -> &[VisualState] {
        &self.rest
    }

    /// Evaluate the scroll timeline at `p` into `out` without touching controller state.
    pub fn evaluate_at(&self, p: f64, out: &mut [VisualState]) {
        self.timeline.evaluate(p, out);
    }

    /// Feed a new scroll offset. `prime` snaps shown progress to it, ignoring scrub smoothing.
    pub fn update_scroll(&mut self, offset: f64, direction: ScrollDirection, prime: bool) {
        let Some(p) = map_progress(offset, self.region.scroll_range) else {
            return;
        };

        let (next, edge) = self.state.step(p, direction, self.marks);
        self.state = next;
        match edge {
            Some(Edge::LeaveBack) if self.reset_on_leave_back => {
                tracing::debug!(region = %self.region.id, "left back; showing settled state");
                self.pose = Pose::Settled;
                // Scrubbing resumes from the region's start, not from the arc it left.
                self.shown_progress = p;
            }
            _ if p > 0.0 => self.pose = Pose::Scrubbed,
            _ => {}
        }

        if p > 0.0
            && let Some(intro) = self.intro.as_mut()
        {
            intro.finished = true;
        }

        self.scroll_progress = p;
        if prime || self.scrub == Scrub::Instant {
            self.shown_progress = p;
        }
    }

    /// Advance scrub smoothing and the intro clock by `dt` seconds.
    pub fn tick(&mut self, dt: f64) {
        if !(dt.is_finite() && dt > 0.0) {
            return;
        }
        if let Scrub::Smooth { secs } = self.scrub {
            let gap = self.scroll_progress - self.shown_progress;
            if gap.abs() <= SMOOTH_SETTLE {
                self.shown_progress = self.scroll_progress;
            } else {
                let k = 1.0 - (-dt * SMOOTH_RATE / secs).exp();
                self.shown_progress += gap * k;
            }
        }
        if let Some(intro) = self.intro.as_mut()
            && !intro.finished
        {
            intro.elapsed += dt;
            if intro.progress() >= 1.0 {
                intro.finished = true;
            }
        }
    }

    /// Push the current frame to the host. Unchanged frames are skipped unless `force` is set.
    pub fn render<H: ScrollHost + ?Sized>(&mut self, host: &mut H, force: bool) {
        if !self.is_active() && self.intro.is_none() {
            return;
        }
        let intro = self
            .intro
            .as_ref()
            .filter(|i| !i.finished)
            .map(IntroPlayback::progress);
        let key = FrameKey {
            shown: self.shown_progress,
            pose: self.pose,
            intro,
        };
        if !force && self.last_frame == Some(key) {
            return;
        }

        match self.pose {
            Pose::Settled => self.out.copy_from_slice(&self.rest),
            Pose::Scrubbed => self.timeline.evaluate(self.shown_progress, &mut self.out),
        }
        if let (Some(p), Some(playback)) = (intro, self.intro.as_ref()) {
            playback.timeline.overlay(p, &mut self.out);
        }
        for (target, state) in self.targets.iter().zip(&self.out) {
            host.apply_state(target, state);
        }
        self.last_frame = Some(key);
    }

    /// Detach the trigger. Safe to call repeatedly.
    pub fn detach<H: ScrollHost + ?Sized>(&mut self, host: &mut H) {
        if let Some(id) = self.trigger.take() {
            host.detach_trigger(id);
        }
    }
}

/// Keep only phases with at least one rendered target.
///
/// Surviving phases keep their declared members so stagger offsets stay those of the full group;
/// absent members are left out of the target table and never receive a channel.
fn present_phases<H: ScrollHost + ?Sized>(
    host: &H,
    region: &RegionId,
    phases: &[Phase],
) -> Vec<Phase> {
    phases
        .iter()
        .filter(|phase| {
            let any = phase.targets.iter().any(|t| host.has_target(t));
            if !any {
                tracing::debug!(%region, kind = ?phase.kind, "no rendered targets; phase skipped");
            }
            any
        })
        .cloned()
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/choreo/region.rs"]
mod tests;
