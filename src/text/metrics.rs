use std::{borrow::Cow, collections::HashMap, path::PathBuf};

use crate::text::{
    builtin,
    font::{FontResource, OutlineFont},
};

/// Single-channel coverage of one rendered line.
///
/// `offset_x`/`offset_y` place the mask relative to the line's top-left layout origin; outline
/// glyphs may overhang their advance box, so masks carry padding.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CoverageMask {
    pub width: u32,
    pub height: u32,
    pub offset_x: i32,
    pub offset_y: i32,
    pub coverage: Vec<u8>,
}

impl CoverageMask {
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Measures and rasterizes single lines of text.
///
/// Outline fonts go through parley for shaping and vello_cpu for glyph coverage; the built-in
/// bitmap font is measured from its fixed cell size. Holds parley contexts, so one instance
/// belongs to one render call.
pub struct GlyphMetrics {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<()>,
    faces: HashMap<PathBuf, Option<RegisteredFace>>,
}

/// Query attributes that select exactly one registered face within its family.
#[derive(Clone, Debug)]
struct RegisteredFace {
    family: String,
    weight: parley::style::FontWeight,
    style: parley::style::FontStyle,
    width: parley::style::FontWidth,
}

impl Default for GlyphMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for GlyphMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlyphMetrics")
            .field("registered_faces", &self.faces.len())
            .finish()
    }
}

impl GlyphMetrics {
    /// Construct with fresh parley contexts.
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            faces: HashMap::new(),
        }
    }

    /// Advance width of `text` in pixels.
    pub fn width(&mut self, font: &FontResource, text: &str) -> f32 {
        if text.is_empty() {
            return 0.0;
        }
        match font {
            FontResource::Outline(f) => match self.layout_line(f, text) {
                Some(layout) => layout.width(),
                None => builtin::text_width(text) as f32,
            },
            FontResource::Builtin => builtin::text_width(text) as f32,
        }
    }

    /// Line height of `text` in whole pixels.
    pub fn height(&mut self, font: &FontResource, text: &str) -> u32 {
        if text.is_empty() {
            return 0;
        }
        match font {
            FontResource::Outline(f) => match self.layout_line(f, text) {
                Some(layout) => layout.height().ceil().max(0.0) as u32,
                None => builtin::CELL_HEIGHT,
            },
            FontResource::Builtin => builtin::CELL_HEIGHT,
        }
    }

    /// Rasterize `text` as one line into a coverage mask.
    pub fn line_mask(&mut self, font: &FontResource, text: &str) -> CoverageMask {
        if text.is_empty() {
            return CoverageMask::default();
        }
        let outline = match font {
            FontResource::Outline(f) => f,
            FontResource::Builtin => return builtin_mask(text),
        };
        let Some(layout) = self.layout_line(outline, text) else {
            return builtin_mask(text);
        };

        let pad = (outline.size_px / 4.0).ceil().max(1.0) as u32;
        let width = layout.width().ceil().max(0.0) as u32 + 2 * pad;
        let height = layout.height().ceil().max(0.0) as u32 + 2 * pad;
        let (Ok(w16), Ok(h16)) = (u16::try_from(width), u16::try_from(height)) else {
            tracing::warn!(width, height, "line too large to rasterize");
            return CoverageMask::default();
        };

        let mut ctx = vello_cpu::RenderContext::new(w16, h16);
        ctx.set_transform(vello_cpu::kurbo::Affine::translate((
            f64::from(pad),
            f64::from(pad),
        )));
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(255, 255, 255, 255));
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(run.run().font())
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(w16, h16);
        ctx.render_to_pixmap(&mut pixmap);

        let coverage = pixmap
            .data_as_u8_slice()
            .chunks_exact(4)
            .map(|px| px[3])
            .collect();
        CoverageMask {
            width,
            height,
            offset_x: -(pad as i32),
            offset_y: -(pad as i32),
            coverage,
        }
    }

    fn face_for(&mut self, font: &OutlineFont) -> Option<RegisteredFace> {
        if let Some(known) = self.faces.get(&font.source) {
            return known.clone();
        }
        let families = self.font_ctx.collection.register_fonts(
            parley::fontique::Blob::from(font.bytes.as_ref().clone()),
            None,
        );
        let face = families.first().and_then(|(id, infos)| {
            let family = self.font_ctx.collection.family_name(*id)?.to_string();
            let info = infos.iter().find(|i| i.index() == 0).or(infos.first())?;
            Some(RegisteredFace {
                family,
                weight: info.weight(),
                style: info.style(),
                width: info.width(),
            })
        });
        if face.is_none() {
            tracing::warn!(source = %font.source.display(), "font bytes registered no family");
        }
        self.faces.insert(font.source.clone(), face.clone());
        face
    }

    fn layout_line(&mut self, font: &OutlineFont, text: &str) -> Option<parley::Layout<()>> {
        // Faces of one family share a name; the attributes pin the query to this file's face.
        let face = self.face_for(font)?;
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(face.family)),
        ));
        builder.push_default(parley::style::StyleProperty::FontWeight(face.weight));
        builder.push_default(parley::style::StyleProperty::FontStyle(face.style));
        builder.push_default(parley::style::StyleProperty::FontWidth(face.width));
        builder.push_default(parley::style::StyleProperty::FontSize(font.size_px));
        let mut layout: parley::Layout<()> = builder.build(text);
        layout.break_all_lines(None);
        Some(layout)
    }
}

fn builtin_mask(text: &str) -> CoverageMask {
    let (width, height, coverage) = builtin::rasterize_line(text);
    CoverageMask {
        width,
        height,
        offset_x: 0,
        offset_y: 0,
        coverage,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/metrics.rs"]
mod tests;
