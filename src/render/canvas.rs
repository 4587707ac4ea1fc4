use std::path::Path;

use image::{DynamicImage, imageops::FilterType};

use crate::foundation::core::{Rgb, RgbImage, Rgba, RgbaImage};
use crate::foundation::error::{CardError, CardResult};
use crate::render::{composite, gradient};

/// Where a card's background comes from, in the order the pipelines prefer them.
#[derive(Clone, Copy, Debug)]
pub enum Background<'a> {
    /// Already decoded raster; center-cropped to a square and resampled.
    Image(&'a DynamicImage),
    /// Image file on disk; treated like [`Background::Image`] once decoded.
    Path(&'a Path),
    /// Seeded gradient; `None` or empty uses the default seed.
    Gradient(Option<&'a str>),
    Solid(Rgb<u8>),
}

/// Straight-alpha RGBA pixel buffer owned by a single render call.
#[derive(Clone, Debug, PartialEq)]
pub struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    pub fn solid(width: u32, height: u32, color: Rgb<u8>) -> CardResult<Self> {
        check_size(width, height)?;
        let [r, g, b] = color.0;
        Ok(Self {
            image: RgbaImage::from_pixel(width, height, Rgba([r, g, b, 255])),
        })
    }

    /// Center-crop `img` to a square and resample it to `edge x edge` with Lanczos3.
    pub fn from_image(img: &DynamicImage, edge: u32) -> CardResult<Self> {
        check_size(edge, edge)?;
        if img.width() == 0 || img.height() == 0 {
            return Err(CardError::image("background image has no pixels"));
        }
        let square = ensure_square(img);
        let resized = square.resize_exact(edge, edge, FilterType::Lanczos3);
        Ok(Self {
            image: resized.to_rgba8(),
        })
    }

    /// Square canvas of `edge` built from the first applicable background source.
    #[tracing::instrument(level = "debug", skip(background))]
    pub fn from_background(background: Background<'_>, edge: u32) -> CardResult<Self> {
        match background {
            Background::Image(img) => Self::from_image(img, edge),
            Background::Path(path) => load_background(path, edge),
            Background::Gradient(seed) => {
                gradient::generate_prompt_gradient(seed, edge, edge).map(Self::from)
            }
            Background::Solid(color) => Self::solid(edge, edge, color),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn image_mut(&mut self) -> &mut RgbaImage {
        &mut self.image
    }

    /// Composite a uniform translucent layer over the whole canvas.
    pub fn overlay(&mut self, color: Rgba<u8>) {
        composite::overlay_color(&mut self.image, color);
    }

    pub fn into_rgba(self) -> RgbaImage {
        self.image
    }

    /// Drop the alpha channel.
    pub fn into_rgb(self) -> RgbImage {
        DynamicImage::ImageRgba8(self.image).to_rgb8()
    }
}

impl From<RgbaImage> for Canvas {
    fn from(image: RgbaImage) -> Self {
        Self { image }
    }
}

impl From<RgbImage> for Canvas {
    fn from(image: RgbImage) -> Self {
        Self {
            image: DynamicImage::ImageRgb8(image).to_rgba8(),
        }
    }
}

/// Largest centered square of `img`.
pub fn ensure_square(img: &DynamicImage) -> DynamicImage {
    let (w, h) = (img.width(), img.height());
    if w == h {
        return img.clone();
    }
    let edge = w.min(h);
    img.crop_imm((w - edge) / 2, (h - edge) / 2, edge, edge)
}

/// Decode the image at `path` into a square canvas of `edge`.
pub fn load_background(path: &Path, edge: u32) -> CardResult<Canvas> {
    let img = image::open(path).map_err(|err| {
        CardError::image(format!("open background '{}': {err}", path.display()))
    })?;
    Canvas::from_image(&DynamicImage::ImageRgb8(img.to_rgb8()), edge)
}

fn check_size(width: u32, height: u32) -> CardResult<()> {
    if width == 0 || height == 0 {
        return Err(CardError::validation(format!(
            "canvas size must be positive, got {width}x{height}"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/canvas.rs"]
mod tests;
