use std::collections::BTreeMap;

use crate::foundation::core::PixelBox;
use crate::foundation::error::{CardError, CardResult};

/// Rectangle of a document node in document units.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct NodeBounds {
    pub id: String,
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl NodeBounds {
    /// Pixel rectangle relative to `origin`, scaled by `scale`.
    ///
    /// The far edges are computed from the unrounded near edges, so a box's size can differ by
    /// one pixel from `round(width * scale)`.
    pub fn to_pixel_box(&self, scale: f64, origin: (f64, f64)) -> PixelBox {
        let x0 = (self.x - origin.0) * scale;
        let y0 = (self.y - origin.1) * scale;
        let x1 = x0 + self.width * scale;
        let y1 = y0 + self.height * scale;
        PixelBox::new(round(x0), round(y0), round(x1), round(y1))
    }

    fn has_area(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

fn round(v: f64) -> i32 {
    v.round() as i32
}

/// Scale mapping the frame's document width onto `render_width` pixels.
pub fn scale_for_width(frame: &NodeBounds, render_width: f64) -> CardResult<f64> {
    if frame.width.is_nan() || frame.width <= 0.0 {
        return Err(CardError::layout(format!(
            "frame '{}' has non-positive width {}",
            frame.id, frame.width
        )));
    }
    let scale = render_width / frame.width;
    if !scale.is_finite() || scale <= 0.0 {
        return Err(CardError::validation(format!(
            "render width {render_width} gives invalid scale {scale}"
        )));
    }
    Ok(scale)
}

/// Slot and background geometry of one template frame, ready to map into pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct TemplateLayout {
    frame: NodeBounds,
    slots: BTreeMap<String, NodeBounds>,
    backgrounds: Vec<NodeBounds>,
    scale: f64,
}

impl TemplateLayout {
    pub fn new(
        frame: NodeBounds,
        slots: BTreeMap<String, NodeBounds>,
        backgrounds: Vec<NodeBounds>,
        scale: f64,
    ) -> CardResult<Self> {
        if !frame.has_area() {
            return Err(CardError::layout(format!(
                "frame '{}' has zero area ({} x {})",
                frame.id, frame.width, frame.height
            )));
        }
        check_scale(scale)?;
        Ok(Self {
            frame,
            slots,
            backgrounds,
            scale,
        })
    }

    /// Same geometry mapped with a different scale.
    pub fn with_scale(mut self, scale: f64) -> CardResult<Self> {
        check_scale(scale)?;
        self.scale = scale;
        Ok(self)
    }

    pub fn frame(&self) -> &NodeBounds {
        &self.frame
    }

    pub fn slots(&self) -> &BTreeMap<String, NodeBounds> {
        &self.slots
    }

    pub fn backgrounds(&self) -> &[NodeBounds] {
        &self.backgrounds
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    fn origin(&self) -> (f64, f64) {
        (self.frame.x, self.frame.y)
    }

    /// The frame itself in pixels; always anchored at `(0, 0)`.
    pub fn frame_box(&self) -> PixelBox {
        self.frame.to_pixel_box(self.scale, self.origin())
    }

    pub fn box_for(&self, slot: &str) -> Option<PixelBox> {
        self.slots
            .get(slot)
            .map(|node| node.to_pixel_box(self.scale, self.origin()))
    }

    pub fn require_box(&self, slot: &str) -> CardResult<PixelBox> {
        self.box_for(slot)
            .ok_or_else(|| CardError::layout(format!("no geometry for slot '{slot}'")))
    }

    pub fn background_boxes(&self) -> Vec<PixelBox> {
        self.backgrounds
            .iter()
            .map(|node| node.to_pixel_box(self.scale, self.origin()))
            .collect()
    }
}

fn check_scale(scale: f64) -> CardResult<()> {
    if !scale.is_finite() || scale <= 0.0 {
        return Err(CardError::validation(format!(
            "template scale must be > 0, got {scale}"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/template/bounds.rs"]
mod tests;
