//! Font resolution, measurement and line wrapping.
//!
//! Outline fonts are shaped with parley and rasterized with vello_cpu. When no outline font can
//! be loaded, everything falls back to a built-in 8x16 bitmap font, so text always renders.

pub(crate) mod builtin;
/// Font specs, the fallback chain and the shared font cache.
pub mod font;
/// Per-line width/height measurement and coverage rasterization.
pub mod metrics;
/// Greedy pixel-width wrapping.
pub mod wrap;
