use std::collections::BTreeSet;

use crate::{
    choreo::region::{RegionController, SectionSpec},
    config::ChoreoConfig,
    foundation::core::RegionId,
    foundation::error::{ChoreoError, ChoreoResult},
    scroll::host::ScrollHost,
};

/// The live region controllers of one page, in declared top-to-bottom order.
///
/// Declared order is load-bearing: hosts measure later anchors after earlier pin spacers exist,
/// and snap ties resolve toward the earlier region.
#[derive(Debug, Default)]
pub struct Registry {
    regions: Vec<RegionController>,
}

impl Registry {
    /// Register every section in order.
    ///
    /// Sections whose anchor cannot be measured are skipped. On error, the regions already attached
    /// are detached before the error is returned.
    #[tracing::instrument(skip_all, fields(sections = sections.len()))]
    pub fn build_all<H: ScrollHost + ?Sized>(
        host: &mut H,
        sections: &[SectionSpec],
        config: &ChoreoConfig,
    ) -> ChoreoResult<Self> {
        let mut seen = BTreeSet::new();
        for section in sections {
            if !seen.insert(&section.id) {
                return Err(ChoreoError::validation(format!(
                    "duplicate region id `{}`",
                    section.id
                )));
            }
        }

        let mut registry = Self::default();
        for section in sections {
            match RegionController::register(host, section, config) {
                Ok(Some(controller)) => registry.regions.push(controller),
                Ok(None) => {}
                Err(err) => {
                    registry.teardown_all(host);
                    return Err(err);
                }
            }
        }
        tracing::debug!(
            regions = registry.regions.len(),
            live = registry.live_trigger_count(),
            "registry built"
        );
        Ok(registry)
    }

    /// Detach every region in reverse declared order. A second call is a no-op.
    #[tracing::instrument(skip_all, fields(regions = self.regions.len()))]
    pub fn teardown_all<H: ScrollHost + ?Sized>(&mut self, host: &mut H) {
        for controller in self.regions.iter_mut().rev() {
            controller.detach(host);
        }
        self.regions.clear();
    }

    /// Controllers in declared order.
    pub fn regions(&self) -> &[RegionController] {
        &self.regions
    }

    /// Mutable controllers in declared order.
    pub fn regions_mut(&mut self) -> &mut [RegionController] {
        &mut self.regions
    }

    /// Look a controller up by section id.
    pub fn get(&self, id: &RegionId) -> Option<&RegionController> {
        self.regions.iter().find(|r| r.id() == id)
    }

    /// Active pinned regions, in declared order.
    pub fn pinned(&self) -> impl Iterator<Item = &RegionController> {
        self.regions
            .iter()
            .filter(|r| r.region().pinned && r.is_active())
    }

    /// Number of registered regions, inactive ones included.
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// `true` when no section registered.
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Number of regions currently holding a host trigger.
    pub fn live_trigger_count(&self) -> usize {
        self.regions.iter().filter(|r| r.trigger().is_some()).count()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/choreo/registry.rs"]
mod tests;
