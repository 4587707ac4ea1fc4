//! Typed configuration for the card pipelines and the CLI.
//!
//! Every key is optional in the JSON file; missing keys take the defaults below. Values are
//! checked once in [`CardConfig::validate`] so the render code never sees a zero size.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::card::{BrandCardOptions, CardFonts};
use crate::foundation::core::{RenderOptions, Rgba};
use crate::foundation::error::{CardError, CardResult};
use crate::layout::brand::{BrandFontOverrides, BrandFonts};
use crate::template::compose::TemplateRequest;
use crate::template::document::SlotLocator;
use crate::text::font::FontSpec;

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CardConfig {
    pub fonts: FontsConfig,
    pub image: ImageConfig,
    pub brand_card: BrandCardConfig,
    pub template: TemplateConfig,
}

/// Fonts for the title/subtitle card and the business line.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FontsConfig {
    pub title: FontSpec,
    pub subtitle: FontSpec,
    pub business: FontSpec,
}

impl Default for FontsConfig {
    fn default() -> Self {
        let spec = |path: &str, size| FontSpec {
            path: Some(PathBuf::from(path)),
            size,
        };
        Self {
            title: spec("Pretendard-Bold.otf", 72),
            subtitle: spec("Pretendard-Regular.otf", 42),
            business: spec("Pretendard-Regular.otf", 36),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ImageConfig {
    pub width: u32,
    pub height: u32,
    pub overlay: bool,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            width: 1080,
            height: 1080,
            overlay: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BrandCardConfig {
    pub size: u32,
    pub overlay: bool,
    pub overlay_alpha: u8,
    pub shadow: bool,
    pub fonts: BrandFontOverrides,
}

impl Default for BrandCardConfig {
    fn default() -> Self {
        Self {
            size: 512,
            overlay: true,
            overlay_alpha: 48,
            shadow: false,
            fonts: BrandFontOverrides::default(),
        }
    }
}

impl BrandCardConfig {
    /// White translucent layer for the card background, unless disabled here or by the caller.
    pub fn overlay_color(&self, no_overlay: bool) -> Option<Rgba<u8>> {
        (self.overlay && !no_overlay).then_some(Rgba([255, 255, 255, self.overlay_alpha]))
    }

    /// Options for a brand card, with `size` overriding the configured edge.
    pub fn options(&self, size: Option<u32>, no_overlay: bool) -> BrandCardOptions {
        let size = size.unwrap_or(self.size);
        BrandCardOptions {
            size,
            fonts: Some(BrandFonts::for_size(size).with_overrides(&self.fonts)),
            overlay: self.overlay_color(no_overlay),
            shadow: self.shadow,
        }
    }
}

/// Where a document template lives and which nodes hold the text slots.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    pub frame_id: String,
    /// Slot name to node id; empty ids are ignored.
    pub nodes: BTreeMap<String, String>,
    pub scale: f64,
    /// Image format the frame raster is exported in, by extension (`png`, `jpg`).
    pub format: String,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        let nodes = ["title", "subtitle", "business"]
            .into_iter()
            .map(|slot| (slot.to_string(), String::new()))
            .collect();
        Self {
            frame_id: String::new(),
            nodes,
            scale: 1.0,
            format: "png".to_string(),
        }
    }
}

impl TemplateConfig {
    /// Template request for the configured frame, or `None` when no frame is set.
    pub fn request(&self) -> Option<TemplateRequest> {
        if self.frame_id.is_empty() {
            return None;
        }
        let request = self
            .nodes
            .iter()
            .filter(|(_, id)| !id.is_empty())
            .fold(TemplateRequest::new(&self.frame_id), |req, (slot, id)| {
                req.with_slot(slot.clone(), SlotLocator::ById(id.clone()))
            });
        Some(request.with_scale(self.scale))
    }

    /// Decoder format of the exported frame.
    pub fn frame_format(&self) -> CardResult<image::ImageFormat> {
        image::ImageFormat::from_extension(self.format.trim()).ok_or_else(|| {
            CardError::validation(format!(
                "template.format '{}' is not an image format",
                self.format
            ))
        })
    }
}

impl CardConfig {
    /// Parse and validate a JSON configuration document.
    pub fn from_json(json: &str) -> CardResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> CardResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))
            .map_err(CardError::from)?;
        Self::from_json(&text)
    }

    /// `path` when given, otherwise the defaults.
    pub fn load_or_default(path: Option<&Path>) -> CardResult<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> CardResult<()> {
        let fonts = [
            ("fonts.title", &self.fonts.title),
            ("fonts.subtitle", &self.fonts.subtitle),
            ("fonts.business", &self.fonts.business),
        ];
        let overrides = [
            ("brand_card.fonts.brand", &self.brand_card.fonts.brand),
            ("brand_card.fonts.title", &self.brand_card.fonts.title),
            ("brand_card.fonts.subtitle", &self.brand_card.fonts.subtitle),
            ("brand_card.fonts.footer", &self.brand_card.fonts.footer),
        ];
        let all_fonts = fonts
            .into_iter()
            .chain(overrides.into_iter().filter_map(|(k, v)| v.as_ref().map(|v| (k, v))));
        for (key, spec) in all_fonts {
            if spec.size == 0 {
                return Err(CardError::validation(format!("{key}.size must be > 0")));
            }
        }
        if self.image.width == 0 || self.image.height == 0 {
            return Err(CardError::validation(format!(
                "image size must be positive, got {}x{}",
                self.image.width, self.image.height
            )));
        }
        if self.brand_card.size == 0 {
            return Err(CardError::validation("brand_card.size must be > 0"));
        }
        if !self.template.scale.is_finite() || self.template.scale <= 0.0 {
            return Err(CardError::validation(format!(
                "template.scale must be > 0, got {}",
                self.template.scale
            )));
        }
        self.template.frame_format()?;
        Ok(())
    }

    /// Render options from the image section, an optional `WIDTHxHEIGHT` override and the CLI
    /// switches.
    pub fn render_options(
        &self,
        size: Option<&str>,
        no_overlay: bool,
        no_shadow: bool,
    ) -> CardResult<RenderOptions> {
        let (width, height) = match size {
            Some(s) => RenderOptions::parse_size(s)?,
            None => (self.image.width, self.image.height),
        };
        RenderOptions::new(width, height, self.image.overlay && !no_overlay, !no_shadow)
    }

    /// Title and subtitle fonts of the standard card.
    pub fn card_fonts(&self) -> CardFonts {
        CardFonts {
            title: self.fonts.title.clone(),
            subtitle: self.fonts.subtitle.clone(),
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
