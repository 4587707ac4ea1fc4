//! Card pipelines: the title/subtitle card, the brand card and batch rendering.

use std::path::Path;

use image::DynamicImage;
use rayon::prelude::*;

use crate::foundation::core::{PixelBox, RenderOptions, Rgb, RgbImage, Rgba};
use crate::foundation::error::{CardError, CardResult};
use crate::layout::block::{BlockLayoutEngine, TextBlock};
use crate::layout::brand::{BrandCardText, BrandFonts};
use crate::render::{canvas::Background, canvas::Canvas, contrast};
use crate::text::font::{FontResolver, FontSpec};

/// Darkening layer laid over title/subtitle card backgrounds.
pub const CARD_OVERLAY: Rgba<u8> = Rgba([0, 0, 0, 96]);
/// Brand card background when no image is supplied.
pub const BRAND_BACKGROUND: Rgb<u8> = Rgb([236, 236, 236]);
/// Default brand card overlay.
pub const BRAND_OVERLAY: Rgba<u8> = Rgba([255, 255, 255, 48]);

/// Fonts of the title/subtitle card.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CardFonts {
    pub title: FontSpec,
    pub subtitle: FontSpec,
}

/// One card as described in a batch or brand-card input file.
///
/// Every field is optional; absent text renders nothing for that slot.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CardInput {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub image_prompt: Option<String>,
    #[serde(alias = "background")]
    pub background_path: Option<String>,
    pub output: Option<String>,
    #[serde(alias = "brand_text")]
    pub brand: Option<String>,
    #[serde(alias = "footer_text")]
    pub footer: Option<String>,
}

#[derive(serde::Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    Many(Vec<CardInput>),
    One(CardInput),
}

impl CardInput {
    pub fn from_json(json: &str) -> CardResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse either a JSON array of cards or a single card object.
    pub fn list_from_json(json: &str) -> CardResult<Vec<Self>> {
        match serde_json::from_str::<OneOrMany>(json) {
            Ok(OneOrMany::Many(cards)) => Ok(cards),
            Ok(OneOrMany::One(card)) => Ok(vec![card]),
            Err(err) => Err(CardError::serde(format!(
                "card input must be an object or an array of objects: {err}"
            ))),
        }
    }

    /// Background for a title/subtitle card: the image file, else the prompt gradient.
    pub fn background(&self) -> Background<'_> {
        match self.background_path.as_deref().filter(|p| !p.is_empty()) {
            Some(path) => Background::Path(Path::new(path)),
            None => Background::Gradient(self.image_prompt.as_deref()),
        }
    }

    pub fn brand_text(&self) -> BrandCardText {
        let text = |field: &Option<String>| field.clone().unwrap_or_default();
        BrandCardText {
            brand: text(&self.brand),
            title: text(&self.title),
            subtitle: text(&self.subtitle),
            footer: text(&self.footer),
        }
    }

    /// Output file name for the card at zero-based `index` in a batch.
    pub fn output_name(&self, index: usize) -> String {
        match self.output.as_deref().filter(|o| !o.is_empty()) {
            Some(name) => name.to_string(),
            None => format!("card_{:02}.jpg", index + 1),
        }
    }
}

fn scaled(edge: u32, fraction: f64) -> i32 {
    (f64::from(edge) * fraction) as i32
}

/// Render a square title/subtitle card of `min(width, height)`.
///
/// The title sits in the top 40% and the subtitle in the band from 38% to 75%, both centered.
/// Text color comes from the contrast of the background after the overlay.
#[tracing::instrument(skip_all, fields(width = options.width, height = options.height))]
pub fn create_card(
    engine: &mut BlockLayoutEngine,
    title: &str,
    subtitle: &str,
    background: Background<'_>,
    fonts: &CardFonts,
    options: &RenderOptions,
) -> CardResult<RgbImage> {
    let edge = options.square_edge();
    let mut canvas = Canvas::from_background(background, edge)?;
    if options.overlay {
        canvas.overlay(CARD_OVERLAY);
    }
    let fill = contrast::pick_text_color(canvas.image());
    let w = edge as i32;
    let blocks = [
        TextBlock::new(title, fonts.title.clone(), PixelBox::new(0, 0, w, scaled(edge, 0.40))),
        TextBlock::new(
            subtitle,
            fonts.subtitle.clone(),
            PixelBox::new(0, scaled(edge, 0.38), w, scaled(edge, 0.75)),
        ),
    ];
    engine.layout_and_draw(&mut canvas, &blocks, options.shadow, Some(fill));
    Ok(canvas.into_rgb())
}

/// Brand card inputs other than its text.
#[derive(Clone, Debug)]
pub struct BrandCardOptions {
    pub size: u32,
    /// Per-slot fonts; `None` scales the defaults with `size`.
    pub fonts: Option<BrandFonts>,
    pub overlay: Option<Rgba<u8>>,
    pub shadow: bool,
}

impl Default for BrandCardOptions {
    fn default() -> Self {
        Self {
            size: 512,
            fonts: None,
            overlay: Some(BRAND_OVERLAY),
            shadow: false,
        }
    }
}

/// Render a `size x size` brand card.
///
/// `background` of `None` paints [`BRAND_BACKGROUND`]; gradients are accepted too.
#[tracing::instrument(skip_all, fields(size = options.size))]
pub fn create_brand_card(
    engine: &mut BlockLayoutEngine,
    background: Option<Background<'_>>,
    text: &BrandCardText,
    options: &BrandCardOptions,
) -> CardResult<RgbImage> {
    if options.size == 0 {
        return Err(CardError::validation("brand card size must be > 0"));
    }
    let background = background.unwrap_or(Background::Solid(BRAND_BACKGROUND));
    let mut canvas = Canvas::from_background(background, options.size)?;
    if let Some(color) = options.overlay {
        canvas.overlay(color);
    }
    let fonts = options
        .fonts
        .clone()
        .unwrap_or_else(|| BrandFonts::for_size(options.size));
    let fill = contrast::pick_text_color(canvas.image());
    engine.draw_brand_card(&mut canvas, text, &fonts, fill, options.shadow);
    Ok(canvas.into_rgb())
}

/// Convenience wrapper for an already decoded background.
pub fn create_brand_card_from_image(
    engine: &mut BlockLayoutEngine,
    image: &DynamicImage,
    text: &BrandCardText,
    options: &BrandCardOptions,
) -> CardResult<RgbImage> {
    create_brand_card(engine, Some(Background::Image(image)), text, options)
}

/// Render title/subtitle cards in parallel.
///
/// Each worker owns its own [`BlockLayoutEngine`]; all of them share `resolver`'s font cache.
/// Results keep the input order, and one failing card does not stop the others.
#[tracing::instrument(skip_all, fields(cards = inputs.len()))]
pub fn render_batch(
    inputs: &[CardInput],
    resolver: &FontResolver,
    fonts: &CardFonts,
    options: &RenderOptions,
    threads: Option<usize>,
) -> CardResult<Vec<CardResult<RgbImage>>> {
    let pool = build_thread_pool(threads)?;
    let rendered = pool.install(|| {
        inputs
            .par_iter()
            .map_init(
                || BlockLayoutEngine::new(resolver.clone()),
                |engine, input| {
                    create_card(
                        engine,
                        input.title.as_deref().unwrap_or_default(),
                        input.subtitle.as_deref().unwrap_or_default(),
                        input.background(),
                        fonts,
                        options,
                    )
                },
            )
            .collect()
    });
    Ok(rendered)
}

fn build_thread_pool(threads: Option<usize>) -> CardResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(CardError::validation("batch 'threads' must be >= 1 when set"));
    }
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| CardError::Other(anyhow::anyhow!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../tests/unit/card.rs"]
mod tests;
