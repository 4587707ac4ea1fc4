use crate::foundation::error::{CardError, CardResult};

pub use image::{Rgb, Rgba, RgbImage, RgbaImage};

/// Axis-aligned integer rectangle in canvas pixels, `x1`/`y1` exclusive.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct PixelBox {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl PixelBox {
    pub const fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    pub fn width(self) -> i32 {
        self.x1 - self.x0
    }

    pub fn height(self) -> i32 {
        self.y1 - self.y0
    }

    /// True unless the box has positive extent on both axes.
    pub fn is_empty(self) -> bool {
        self.x1 <= self.x0 || self.y1 <= self.y0
    }

    /// Intersect with a `width x height` image, returning unsigned pixel ranges.
    pub fn clamp_to(self, width: u32, height: u32) -> Option<(u32, u32, u32, u32)> {
        let clamp_x = |v: i32| v.clamp(0, width as i32) as u32;
        let clamp_y = |v: i32| v.clamp(0, height as i32) as u32;
        let (x0, x1) = (clamp_x(self.x0), clamp_x(self.x1));
        let (y0, y1) = (clamp_y(self.y0), clamp_y(self.y1));
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some((x0, y0, x1, y1))
    }
}

/// Output size and the two optional rendering passes of a card render.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RenderOptions {
    pub width: u32,
    pub height: u32,
    pub overlay: bool,
    pub shadow: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 1080,
            height: 1080,
            overlay: true,
            shadow: true,
        }
    }
}

impl RenderOptions {
    pub fn new(width: u32, height: u32, overlay: bool, shadow: bool) -> CardResult<Self> {
        if width == 0 || height == 0 {
            return Err(CardError::validation(format!(
                "render size must be positive, got {width}x{height}"
            )));
        }
        Ok(Self {
            width,
            height,
            overlay,
            shadow,
        })
    }

    /// Edge of the square canvas the card pipelines render into.
    pub fn square_edge(self) -> u32 {
        self.width.min(self.height)
    }

    /// Parse a `WIDTHxHEIGHT` size string (case-insensitive separator).
    pub fn parse_size(s: &str) -> CardResult<(u32, u32)> {
        let lower = s.trim().to_ascii_lowercase();
        let (w, h) = lower
            .split_once('x')
            .ok_or_else(|| CardError::validation(format!("size '{s}' must be WIDTHxHEIGHT")))?;
        let parse = |part: &str| {
            part.trim()
                .parse::<u32>()
                .map_err(|_| CardError::validation(format!("size '{s}' must be WIDTHxHEIGHT")))
        };
        Ok((parse(w)?, parse(h)?))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
