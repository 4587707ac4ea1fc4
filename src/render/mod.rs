//! CPU raster primitives used by the card pipelines.

pub(crate) mod blur;
/// Owned RGBA canvas and background construction.
pub mod canvas;
pub(crate) mod composite;
/// Background-derived text color selection.
pub mod contrast;
/// Seeded gradient backgrounds.
pub mod gradient;
