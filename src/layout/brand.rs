//! Four-slot brand card layout.
//!
//! The brand mark is anchored top-right. Footer, subtitle and title stack upward from the bottom
//! margin: footer right-aligned, title and subtitle left-aligned. Every margin and gap scales
//! with the card edge, and the gap next to an empty slot collapses.

use std::sync::Arc;

use crate::foundation::core::Rgb;
use crate::layout::block::{BlockLayoutEngine, MeasuredLine, PlacedLine};
use crate::render::canvas::Canvas;
use crate::text::font::{FontResource, FontSpec};

/// Margins and gaps for a card of a given edge length.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BrandSpacing {
    pub margin: i32,
    pub gap_footer: i32,
    pub gap_title_subtitle: i32,
    pub title_line_spacing: i32,
    pub subtitle_line_spacing: i32,
}

impl BrandSpacing {
    pub fn for_size(size: u32) -> Self {
        let s = size as i32;
        Self {
            margin: (s / 12).max(24),
            gap_footer: (s / 18).max(16),
            gap_title_subtitle: (s / 26).max(14),
            title_line_spacing: (s / 36).max(10),
            subtitle_line_spacing: (s / 40).max(8),
        }
    }
}

/// Font per slot.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BrandFonts {
    pub brand: FontSpec,
    pub title: FontSpec,
    pub subtitle: FontSpec,
    pub footer: FontSpec,
}

impl BrandFonts {
    /// Path-less specs sized proportionally to the card edge.
    pub fn for_size(size: u32) -> Self {
        let sized = |divisor: u32, floor: u32| FontSpec {
            path: None,
            size: (size / divisor).max(floor),
        };
        Self {
            brand: sized(24, 18),
            title: sized(9, 36),
            subtitle: sized(16, 20),
            footer: sized(20, 18),
        }
    }

    /// Replace the slots that have an override.
    pub fn with_overrides(mut self, overrides: &BrandFontOverrides) -> Self {
        let slots = [
            (&mut self.brand, &overrides.brand),
            (&mut self.title, &overrides.title),
            (&mut self.subtitle, &overrides.subtitle),
            (&mut self.footer, &overrides.footer),
        ];
        for (slot, replacement) in slots {
            if let Some(spec) = replacement {
                *slot = spec.clone();
            }
        }
        self
    }
}

/// Optional per-slot font replacements, as found in configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BrandFontOverrides {
    pub brand: Option<FontSpec>,
    pub title: Option<FontSpec>,
    pub subtitle: Option<FontSpec>,
    pub footer: Option<FontSpec>,
}

/// Text for each slot; empty strings leave the slot out.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BrandCardText {
    pub brand: String,
    pub title: String,
    pub subtitle: String,
    pub footer: String,
}

/// Stacked block heights fed into [`plan_brand_card`]. Zero means the slot is empty.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SlotHeights {
    pub title: i32,
    pub subtitle: i32,
    pub footer: i32,
}

/// Top edges of the stacked slots.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BrandPlan {
    pub title_top: i32,
    pub subtitle_top: i32,
    pub footer_top: i32,
}

/// Stack footer, subtitle and title upward from `size - margin`.
pub fn plan_brand_card(size: u32, spacing: &BrandSpacing, heights: SlotHeights) -> BrandPlan {
    let footer_bottom = size as i32 - spacing.margin;
    let footer_top = footer_bottom - heights.footer;
    let subtitle_bottom = if heights.footer > 0 {
        footer_top - spacing.gap_footer
    } else {
        footer_bottom
    };
    let subtitle_top = subtitle_bottom - heights.subtitle;
    let title_bottom = if heights.subtitle > 0 {
        subtitle_top - spacing.gap_title_subtitle
    } else {
        subtitle_bottom
    };
    BrandPlan {
        title_top: title_bottom - heights.title,
        subtitle_top,
        footer_top,
    }
}

/// Resolved slot placements, in drawing order (brand, title, subtitle, footer).
#[derive(Clone, Debug)]
pub struct BrandLayout {
    pub slots: Vec<(Arc<FontResource>, Vec<PlacedLine>)>,
}

impl BrandLayout {
    pub fn lines(&self) -> impl Iterator<Item = &PlacedLine> {
        self.slots.iter().flat_map(|(_, lines)| lines.iter())
    }
}

impl BlockLayoutEngine {
    /// Place all non-empty slots for a `size x size` card.
    pub fn layout_brand_card(
        &mut self,
        size: u32,
        text: &BrandCardText,
        fonts: &BrandFonts,
    ) -> BrandLayout {
        let spacing = BrandSpacing::for_size(size);
        let right = size as i32 - spacing.margin;
        let text_width = (size as i32 - 2 * spacing.margin) as f32;

        let title_font = self.resolver().resolve(&fonts.title);
        let subtitle_font = self.resolver().resolve(&fonts.subtitle);
        let title = self.measure_wrapped(&title_font, &text.title, text_width);
        let subtitle = self.measure_wrapped(&subtitle_font, &text.subtitle, text_width);

        let footer_font = self.resolver().resolve(&fonts.footer);
        let footer_height = if text.footer.is_empty() {
            0
        } else {
            self.metrics_mut().height(&footer_font, &text.footer) as i32
        };
        let plan = plan_brand_card(
            size,
            &spacing,
            SlotHeights {
                title: stack_height(&title, spacing.title_line_spacing),
                subtitle: stack_height(&subtitle, spacing.subtitle_line_spacing),
                footer: footer_height,
            },
        );

        let mut slots = Vec::with_capacity(4);
        if !text.brand.is_empty() {
            let font = self.resolver().resolve(&fonts.brand);
            let line = self.right_aligned(&font, &text.brand, right, spacing.margin);
            slots.push((font, vec![line]));
        }
        if !title.is_empty() {
            let lines = left_aligned(
                &title,
                spacing.margin,
                plan.title_top,
                spacing.title_line_spacing,
            );
            slots.push((title_font, lines));
        }
        if !subtitle.is_empty() {
            let lines = left_aligned(
                &subtitle,
                spacing.margin,
                plan.subtitle_top,
                spacing.subtitle_line_spacing,
            );
            slots.push((subtitle_font, lines));
        }
        if !text.footer.is_empty() {
            let line = self.right_aligned(&footer_font, &text.footer, right, plan.footer_top);
            slots.push((footer_font, vec![line]));
        }
        BrandLayout { slots }
    }

    /// Lay out and draw a brand card onto `canvas` in a single color.
    #[tracing::instrument(skip(self, canvas, text, fonts))]
    pub fn draw_brand_card(
        &mut self,
        canvas: &mut Canvas,
        text: &BrandCardText,
        fonts: &BrandFonts,
        fill: Rgb<u8>,
        shadow: bool,
    ) {
        let layout = self.layout_brand_card(canvas.width(), text, fonts);
        for (font, lines) in &layout.slots {
            self.draw_lines(canvas, font, lines, fill, shadow);
        }
    }

    fn right_aligned(&mut self, font: &FontResource, text: &str, right: i32, y: i32) -> PlacedLine {
        let width = self.metrics_mut().width(font, text);
        PlacedLine {
            text: text.to_string(),
            x: (right as f32 - width).floor() as i32,
            y,
        }
    }
}

fn stack_height(lines: &[MeasuredLine], spacing: i32) -> i32 {
    if lines.is_empty() {
        return 0;
    }
    lines.iter().map(|l| l.height as i32).sum::<i32>() + spacing * (lines.len() as i32 - 1)
}

fn left_aligned(
    lines: &[MeasuredLine],
    x: i32,
    top: i32,
    spacing: i32,
) -> Vec<PlacedLine> {
    let mut y = top;
    lines
        .iter()
        .map(|line| {
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

#[cfg(test)]
#[path = "../../tests/unit/layout/brand.rs"]
mod tests;
