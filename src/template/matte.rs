use image::GrayImage;

use crate::foundation::core::{PixelBox, Rgb, RgbaImage};
use crate::foundation::math::mul_div255_u8;

/// Per-channel distance from the reference color still treated as background.
pub const UNIFORM_MATTE_TOLERANCE: u8 = 8;

/// How to clear background pixels of a rendered template frame.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum MattePolicy {
    #[default]
    None,
    /// Clear everything inside these pixel rectangles.
    Regions(Vec<PixelBox>),
    /// Clear pixels close to the dominant corner color.
    UniformColor { tolerance: u8 },
}

impl MattePolicy {
    pub fn uniform() -> Self {
        Self::UniformColor {
            tolerance: UNIFORM_MATTE_TOLERANCE,
        }
    }

    #[tracing::instrument(skip(img))]
    pub fn apply(&self, img: &mut RgbaImage) {
        match self {
            Self::None => {}
            Self::Regions(regions) => clear_regions(img, regions),
            Self::UniformColor { tolerance } => {
                clear_uniform_background(img, *tolerance);
            }
        }
    }
}

/// Make every pixel inside any of `regions` fully transparent.
///
/// Rectangles are clamped to the image. An empty list, or one that covers no pixel, leaves the
/// image untouched.
pub fn clear_regions(img: &mut RgbaImage, regions: &[PixelBox]) {
    let (w, h) = img.dimensions();
    let mut mask = GrayImage::new(w, h);
    let mut marked = false;
    for region in regions {
        let Some((x0, y0, x1, y1)) = region.clamp_to(w, h) else {
            continue;
        };
        for y in y0..y1 {
            for x in x0..x1 {
                mask.put_pixel(x, y, image::Luma([255]));
            }
        }
        marked = true;
    }
    if !marked {
        return;
    }
    image::imageops::invert(&mut mask);
    for (px, keep) in img.pixels_mut().zip(mask.pixels()) {
        px[3] = mul_div255_u8(u16::from(px[3]), u16::from(keep[0]));
    }
}

/// Most frequent color among the four corners; ties go to the earliest of top-left, top-right,
/// bottom-left, bottom-right.
pub fn dominant_corner(img: &RgbaImage) -> Option<Rgb<u8>> {
    let (w, h) = img.dimensions();
    if w == 0 || h == 0 {
        return None;
    }
    let corners = [(0, 0), (w - 1, 0), (0, h - 1), (w - 1, h - 1)].map(|(x, y)| {
        let p = img.get_pixel(x, y);
        Rgb([p[0], p[1], p[2]])
    });
    let mut best = corners[0];
    let mut best_count = 0;
    for candidate in corners {
        let count = corners.iter().filter(|&&c| c == candidate).count();
        if count > best_count {
            best = candidate;
            best_count = count;
        }
    }
    Some(best)
}

/// Clear every pixel within `tolerance` of the dominant corner color, wherever it sits.
///
/// Returns the reference color, or `None` for an empty image.
pub fn clear_uniform_background(img: &mut RgbaImage, tolerance: u8) -> Option<Rgb<u8>> {
    let reference = dominant_corner(img)?;
    let near = |a: u8, b: u8| a.abs_diff(b) <= tolerance;
    let mut cleared = 0usize;
    for px in img.pixels_mut() {
        if near(px[0], reference[0]) && near(px[1], reference[1]) && near(px[2], reference[2]) {
            px[3] = 0;
            cleared += 1;
        }
    }
    tracing::debug!(?reference, cleared, "cleared uniform background");
    Some(reference)
}

#[cfg(test)]
#[path = "../../tests/unit/template/matte.rs"]
mod tests;
