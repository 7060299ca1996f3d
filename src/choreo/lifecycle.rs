use std::collections::BTreeMap;

use crate::{
    choreo::{
        region::{IntroClock, SectionSpec},
        registry::Registry,
        snap::{SnapCoordinator, SnapPlan},
    },
    config::ChoreoConfig,
    foundation::{core::RegionId, error::ChoreoResult},
    scroll::{host::ScrollHost, progress::ScrollDirection, trigger::ScrollAnimationId},
};

/// The sections of one page, top to bottom.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PageSpec {
    /// Registered in this order.
    pub sections: Vec<SectionSpec>,
}

impl PageSpec {
    /// A page made of `sections`.
    pub fn new(sections: Vec<SectionSpec>) -> Self {
        Self { sections }
    }

    /// Append one section below the others.
    pub fn section(mut self, section: SectionSpec) -> Self {
        self.sections.push(section);
        self
    }
}

/// A mounted page: the registry, the snap coordinator and the host they are attached to.
///
/// Holding the host's exclusive borrow keeps a second choreography from attaching to the same
/// scroll container while this one is alive. Dropping the handle tears everything down.
pub struct Choreography<'h, H: ScrollHost + ?Sized> {
    host: &'h mut H,
    page: PageSpec,
    config: ChoreoConfig,
    registry: Registry,
    snap: Option<SnapCoordinator>,
    snap_animation: Option<ScrollAnimationId>,
    last_offset: f64,
    intro_clocks: BTreeMap<RegionId, IntroClock>,
}

impl<'h, H: ScrollHost + ?Sized> Choreography<'h, H> {
    /// Mount `page` on `host`.
    ///
    /// The snap coordinator is only built once the host reports a stable layout; until then
    /// [`on_layout_stable`](Self::on_layout_stable) is expected to follow.
    #[tracing::instrument(skip_all, fields(sections = page.sections.len()))]
    pub fn setup(host: &'h mut H, page: PageSpec, config: ChoreoConfig) -> ChoreoResult<Self> {
        config.validate()?;
        let mut choreo = Self {
            host,
            page,
            config,
            registry: Registry::default(),
            snap: None,
            snap_animation: None,
            last_offset: 0.0,
            intro_clocks: BTreeMap::new(),
        };
        choreo.build()?;
        Ok(choreo)
    }

    fn build(&mut self) -> ChoreoResult<()> {
        self.teardown();

        self.registry = Registry::build_all(&mut *self.host, &self.page.sections, &self.config)?;
        for region in self.registry.regions_mut() {
            if let Some(clock) = self.intro_clocks.get(region.id()) {
                region.resume_intro(*clock);
            }
        }

        if self.host.is_layout_stable() {
            let mut snap = SnapCoordinator::from_registry(
                &self.registry,
                self.host.max_scroll(),
                &self.config,
            );
            if let Err(err) = snap.attach(&mut *self.host) {
                self.registry.teardown_all(&mut *self.host);
                return Err(err);
            }
            self.snap = Some(snap);
        } else {
            tracing::debug!("layout not stable yet; snapping deferred");
        }

        let offset = self.last_offset;
        for region in self.registry.regions_mut() {
            region.update_scroll(offset, ScrollDirection::Still, true);
            region.render(&mut *self.host, true);
        }
        Ok(())
    }

    /// Tear down and build again against fresh measurements, e.g. after a resize.
    ///
    /// Intros keep their playback position; one that already finished does not play again.
    #[tracing::instrument(skip_all)]
    pub fn rebuild(&mut self) -> ChoreoResult<()> {
        self.build()
    }

    /// Layout settled: rebuild so snap ranges come from final measurements.
    pub fn on_layout_stable(&mut self) -> ChoreoResult<()> {
        self.rebuild()
    }

    /// Cancel any snap in flight, detach the snap trigger, then detach regions bottom-up.
    ///
    /// Idempotent; also runs on drop.
    #[tracing::instrument(skip_all)]
    pub fn teardown(&mut self) {
        if let Some(id) = self.snap_animation.take() {
            self.host.cancel_scroll_animation(id);
        }
        if let Some(mut snap) = self.snap.take() {
            snap.detach(&mut *self.host);
        }
        for region in self.registry.regions() {
            if let Some(clock) = region.intro_clock() {
                self.intro_clocks.insert(region.id().clone(), clock);
            }
        }
        self.registry.teardown_all(&mut *self.host);
    }

    /// Feed a scroll sample from the host.
    pub fn on_scroll(&mut self, offset: f64) {
        if !offset.is_finite() {
            return;
        }
        let direction = ScrollDirection::between(self.last_offset, offset);
        self.last_offset = offset;
        for region in self.registry.regions_mut() {
            region.update_scroll(offset, direction, false);
            region.render(&mut *self.host, false);
        }
    }

    /// A new gesture takes over from any snap animation in flight.
    pub fn on_gesture_start(&mut self) {
        if let Some(id) = self.snap_animation.take() {
            self.host.cancel_scroll_animation(id);
        }
    }

    /// The gesture was released at `offset`: start the snap animation, if any.
    pub fn on_gesture_end(&mut self, offset: f64) -> Option<SnapPlan> {
        self.on_scroll(offset);
        let plan = self.snap.as_ref()?.plan(offset)?;
        if let Some(id) = self.snap_animation.take() {
            self.host.cancel_scroll_animation(id);
        }
        self.snap_animation = Some(
            self.host
                .animate_scroll(plan.to, plan.duration_secs, plan.ease),
        );
        Some(plan)
    }

    /// Advance scrub smoothing and intros by `dt` seconds and render what changed.
    pub fn tick(&mut self, dt: f64) {
        for region in self.registry.regions_mut() {
            region.tick(dt);
            region.render(&mut *self.host, false);
        }
    }

    /// The host this page is mounted on.
    pub fn host(&self) -> &H {
        &*self.host
    }

    /// Mutable access to the host, e.g. to resize it before a [`rebuild`](Self::rebuild).
    pub fn host_mut(&mut self) -> &mut H {
        &mut *self.host
    }

    /// Live region controllers.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// `None` until the layout has been reported stable.
    pub fn snap(&self) -> Option<&SnapCoordinator> {
        self.snap.as_ref()
    }

    /// Configuration the page was mounted with.
    pub fn config(&self) -> &ChoreoConfig {
        &self.config
    }

    /// Most recent finite scroll offset.
    pub fn last_offset(&self) -> f64 {
        self.last_offset
    }

    /// Snap animation currently in flight.
    pub fn snap_animation(&self) -> Option<ScrollAnimationId> {
        self.snap_animation
    }
}

impl<H: ScrollHost + ?Sized> Drop for Choreography<'_, H> {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/choreo/lifecycle.rs"]
mod tests;
