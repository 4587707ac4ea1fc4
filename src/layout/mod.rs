//! Placement and drawing of text blocks.

/// Centered multi-line blocks inside pixel boxes.
pub mod block;
pub mod brand;
