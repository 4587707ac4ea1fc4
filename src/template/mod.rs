//! Text placement over frames of an external design document.
//!
//! Node geometry arrives in document units and is mapped into the pixel space of the rendered
//! frame. Background areas of the frame can be matted out before text is drawn.

pub mod bounds;
pub mod compose;
pub mod document;
pub mod matte;
/// Collaborator traits for fetching geometry and frame rasters.
pub mod source;
