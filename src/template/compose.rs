use std::collections::BTreeMap;

use crate::foundation::core::{Rgb, RgbaImage};
use crate::foundation::error::{CardError, CardResult};
use crate::layout::block::{BlockLayoutEngine, TextBlock};
use crate::render::canvas::Canvas;
use crate::template::bounds::{NodeBounds, TemplateLayout, scale_for_width};
use crate::template::document::{DocumentNode, SlotLocator};
use crate::template::matte::MattePolicy;
use crate::template::source::{FrameRasterSource, GeometrySource};
use crate::text::font::FontSpec;

/// What to fetch for one template frame.
#[derive(Clone, Debug, PartialEq)]
pub struct TemplateRequest {
    pub frame_id: String,
    pub slots: BTreeMap<String, SlotLocator>,
    /// Nodes whose area is cleared from the rendered frame.
    pub backgrounds: Vec<SlotLocator>,
    /// Requested raster scale.
    pub scale: f64,
    /// Tolerance for corner-color matting when no background nodes are listed.
    pub uniform_fallback: Option<u8>,
}

impl TemplateRequest {
    pub fn new(frame_id: impl Into<String>) -> Self {
        Self {
            frame_id: frame_id.into(),
            slots: BTreeMap::new(),
            backgrounds: Vec::new(),
            scale: 1.0,
            uniform_fallback: None,
        }
    }

    pub fn with_slot(mut self, slot: impl Into<String>, locator: SlotLocator) -> Self {
        self.slots.insert(slot.into(), locator);
        self
    }

    pub fn with_background(mut self, locator: SlotLocator) -> Self {
        self.backgrounds.push(locator);
        self
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_uniform_fallback(mut self, tolerance: u8) -> Self {
        self.uniform_fallback = Some(tolerance);
        self
    }
}

/// Text destined for a named slot of a template.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlotText {
    pub slot: String,
    pub text: String,
    pub font: FontSpec,
    pub fill: Option<Rgb<u8>>,
}

impl SlotText {
    pub fn new(slot: impl Into<String>, text: impl Into<String>, font: FontSpec) -> Self {
        Self {
            slot: slot.into(),
            text: text.into(),
            font,
            fill: None,
        }
    }
}

fn locate(
    source: &dyn GeometrySource,
    frame: &DocumentNode,
    locator: &SlotLocator,
    include_frame: bool,
) -> CardResult<NodeBounds> {
    match locator {
        SlotLocator::ById(id) => source.node(id)?.bounds(),
        SlotLocator::ByName(name) => frame
            .find_by_name(name, include_frame)
            .ok_or_else(|| {
                CardError::layout(format!("no layer named '{name}' in frame {}", frame.id))
            })?
            .bounds(),
    }
}

/// Resolve frame, slot and background geometry into a [`TemplateLayout`] at the requested scale.
#[tracing::instrument(skip(source), fields(frame = %request.frame_id))]
pub fn resolve_template(
    source: &dyn GeometrySource,
    request: &TemplateRequest,
) -> CardResult<TemplateLayout> {
    let frame = source.node(&request.frame_id)?;
    let frame_bounds = frame.bounds()?;

    let mut slots = BTreeMap::new();
    for (slot, locator) in &request.slots {
        let bounds = locate(source, &frame, locator, false)
            .map_err(|err| CardError::layout(format!("slot '{slot}': {err}")))?;
        slots.insert(slot.clone(), bounds);
    }
    let backgrounds = request
        .backgrounds
        .iter()
        .map(|locator| locate(source, &frame, locator, true))
        .collect::<CardResult<Vec<_>>>()?;

    TemplateLayout::new(frame_bounds, slots, backgrounds, request.scale)
}

/// Matte for a rendered frame: background nodes when listed, else the uniform fallback.
pub fn matte_for(layout: &TemplateLayout, request: &TemplateRequest) -> MattePolicy {
    if !layout.backgrounds().is_empty() {
        return MattePolicy::Regions(layout.background_boxes());
    }
    match request.uniform_fallback {
        Some(tolerance) => MattePolicy::UniformColor { tolerance },
        None => MattePolicy::None,
    }
}

/// Render the frame, clear its background and draw slot texts over it.
///
/// Geometry is mapped with the scale implied by the raster's actual width, so rounding done by
/// the rasterizer does not shift the text boxes.
#[tracing::instrument(skip_all, fields(frame = %request.frame_id, texts = texts.len()))]
pub fn compose_template(
    geometry: &dyn GeometrySource,
    raster: &dyn FrameRasterSource,
    engine: &mut BlockLayoutEngine,
    request: &TemplateRequest,
    texts: &[SlotText],
    shadow: bool,
) -> CardResult<RgbaImage> {
    let layout = resolve_template(geometry, request)?;
    let mut frame = raster.render_frame(&request.frame_id, request.scale)?;
    if frame.width() == 0 || frame.height() == 0 {
        return Err(CardError::image("rendered frame is empty"));
    }
    let scale = scale_for_width(layout.frame(), f64::from(frame.width()))?;
    let layout = layout.with_scale(scale)?;

    matte_for(&layout, request).apply(&mut frame);

    let blocks = texts
        .iter()
        .map(|t| {
            let bounds = layout.require_box(&t.slot)?;
            Ok(TextBlock {
                fill: t.fill,
                ..TextBlock::new(t.text.clone(), t.font.clone(), bounds)
            })
        })
        .collect::<CardResult<Vec<_>>>()?;

    let mut canvas = Canvas::from(frame);
    engine.layout_and_draw(&mut canvas, &blocks, shadow, None);
    Ok(canvas.into_rgba())
}

#[cfg(test)]
#[path = "../../tests/unit/template/compose.rs"]
mod tests;
