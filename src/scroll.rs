//! Scroll-side plumbing: progress mapping, trigger descriptions and the host seam.

pub(crate) mod headless;
pub(crate) mod host;
pub(crate) mod progress;
pub(crate) mod trigger;
