use crate::foundation::core::{PixelBox, Rgb, Rgba};
use crate::render::{canvas::Canvas, composite, contrast};
use crate::text::{
    font::{FontResolver, FontResource, FontSpec},
    metrics::GlyphMetrics,
    wrap::wrap_text,
};

/// Horizontal space (both sides combined) kept free when wrapping a block.
pub const BLOCK_HORIZONTAL_MARGIN: i32 = 80;
/// Vertical gap between consecutive lines of a block.
pub const LINE_SPACING: i32 = 12;
/// Down-right displacement of the drop shadow.
pub const SHADOW_OFFSET: i32 = 2;
/// Amount subtracted from each fill channel for the shadow color.
pub const SHADOW_DARKEN: u8 = 120;
pub const SHADOW_ALPHA: u8 = 180;

/// Text to lay out inside a pixel box.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextBlock {
    pub text: String,
    pub font: FontSpec,
    pub bounds: PixelBox,
    /// Explicit color; otherwise the engine's default or a contrast pick is used.
    pub fill: Option<Rgb<u8>>,
}

impl TextBlock {
    pub fn new(text: impl Into<String>, font: FontSpec, bounds: PixelBox) -> Self {
        Self {
            text: text.into(),
            font,
            bounds,
            fill: None,
        }
    }

    pub fn with_fill(mut self, fill: Rgb<u8>) -> Self {
        self.fill = Some(fill);
        self
    }
}

/// A wrapped line with its measured size.
#[derive(Clone, Debug, PartialEq)]
pub struct MeasuredLine {
    pub text: String,
    pub width: f32,
    pub height: u32,
}

/// A line with its top-left drawing origin.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedLine {
    pub text: String,
    pub x: i32,
    pub y: i32,
}

/// Center `lines` in `bounds`: vertically as a stack, horizontally one line at a time.
///
/// Content taller than the box starts at its top edge and overflows downward.
pub fn plan_block(bounds: PixelBox, lines: &[MeasuredLine], spacing: i32) -> Vec<PlacedLine> {
    if lines.is_empty() {
        return Vec::new();
    }
    let heights: i32 = lines.iter().map(|l| l.height as i32).sum();
    let total = heights + spacing * (lines.len() as i32 - 1);
    let start_y = bounds.y0 + ((bounds.height() - total) / 2).max(0);

    let mut y = start_y;
    lines
        .iter()
        .map(|line| {
            let x = bounds.x0 + ((bounds.width() as f32 - line.width) / 2.0).floor() as i32;
            let placed = PlacedLine {
                text: line.text.clone(),
                x,
                y,
            };
            y += line.height as i32 + spacing;
            placed
        })
        .collect()
}

/// Shadow paint derived from a text fill.
pub fn shadow_color(fill: Rgb<u8>) -> Rgba<u8> {
    let [r, g, b] = fill.0;
    Rgba([
        r.saturating_sub(SHADOW_DARKEN),
        g.saturating_sub(SHADOW_DARKEN),
        b.saturating_sub(SHADOW_DARKEN),
        SHADOW_ALPHA,
    ])
}

/// Wraps, measures, places and draws text blocks onto a canvas.
///
/// Owns parley contexts through [`GlyphMetrics`], so one engine serves one render call. Fonts
/// come from a [`FontResolver`] whose cache may be shared across engines.
#[derive(Debug, Default)]
pub struct BlockLayoutEngine {
    resolver: FontResolver,
    metrics: GlyphMetrics,
}

impl BlockLayoutEngine {
    pub fn new(resolver: FontResolver) -> Self {
        Self {
            resolver,
            metrics: GlyphMetrics::new(),
        }
    }

    pub fn resolver(&self) -> &FontResolver {
        &self.resolver
    }

    pub fn metrics_mut(&mut self) -> &mut GlyphMetrics {
        &mut self.metrics
    }

    /// Wrap `text` and measure each resulting line.
    pub fn measure_wrapped(
        &mut self,
        font: &FontResource,
        text: &str,
        max_width: f32,
    ) -> Vec<MeasuredLine> {
        wrap_text(&mut self.metrics, font, text, max_width)
            .into_iter()
            .map(|line| MeasuredLine {
                width: self.metrics.width(font, &line),
                height: self.metrics.height(font, &line),
                text: line,
            })
            .collect()
    }

    /// Line placement for `block` without drawing. Empty text or an empty box yields nothing.
    pub fn layout_block(&mut self, block: &TextBlock) -> Vec<PlacedLine> {
        if block.text.is_empty() || block.bounds.is_empty() {
            return Vec::new();
        }
        let font = self.resolver.resolve(&block.font);
        self.layout_with_font(&font, block)
    }

    fn layout_with_font(&mut self, font: &FontResource, block: &TextBlock) -> Vec<PlacedLine> {
        let max_width = (block.bounds.width() - BLOCK_HORIZONTAL_MARGIN) as f32;
        let lines = self.measure_wrapped(font, &block.text, max_width);
        plan_block(block.bounds, &lines, LINE_SPACING)
    }

    /// Draw every block in order.
    ///
    /// Fill precedence is the block's own color, then `default_fill`, then a contrast pick made
    /// once from the canvas as it looks when the first block needs it.
    #[tracing::instrument(skip_all, fields(blocks = blocks.len(), shadow = shadow))]
    pub fn layout_and_draw(
        &mut self,
        canvas: &mut Canvas,
        blocks: &[TextBlock],
        shadow: bool,
        default_fill: Option<Rgb<u8>>,
    ) {
        let mut picked: Option<Rgb<u8>> = None;
        for block in blocks {
            if block.text.is_empty() || block.bounds.is_empty() {
                tracing::debug!(bounds = ?block.bounds, "skipping empty block");
                continue;
            }
            let fill = match block.fill.or(default_fill) {
                Some(fill) => fill,
                None => *picked.get_or_insert_with(|| contrast::pick_text_color(canvas.image())),
            };
            let font = self.resolver.resolve(&block.font);
            let lines = self.layout_with_font(&font, block);
            self.draw_lines(canvas, &font, &lines, fill, shadow);
        }
    }

    /// Draw already placed lines, each preceded by its shadow when enabled.
    pub fn draw_lines(
        &mut self,
        canvas: &mut Canvas,
        font: &FontResource,
        lines: &[PlacedLine],
        fill: Rgb<u8>,
        shadow: bool,
    ) {
        let [r, g, b] = fill.0;
        let paint = Rgba([r, g, b, 255]);
        for line in lines {
            let mask = self.metrics.line_mask(font, &line.text);
            if shadow {
                composite::fill_mask(
                    canvas.image_mut(),
                    &mask,
                    line.x + SHADOW_OFFSET,
                    line.y + SHADOW_OFFSET,
                    shadow_color(fill),
                );
            }
            composite::fill_mask(canvas.image_mut(), &mask, line.x, line.y, paint);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/block.rs"]
mod tests;
