pub(crate) mod lifecycle;
pub(crate) mod phase;
pub(crate) mod region;
pub(crate) mod registry;
pub(crate) mod snap;
pub(crate) mod state;
