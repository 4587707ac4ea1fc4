use crate::foundation::core::{Rgba, RgbaImage};
use crate::foundation::math::mul_div255_u8;
use crate::text::metrics::CoverageMask;

pub type PremulRgba8 = [u8; 4];

pub fn over(dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 || src[3] == 0 {
        return dst;
    }

    let op = ((opacity * 255.0).round() as i32).clamp(0, 255) as u16;
    let sa = mul_div255_u8(u16::from(src[3]), op);
    if sa == 0 {
        return dst;
    }

    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = sa.saturating_add(mul_div255_u8(u16::from(dst[3]), inv));

    for i in 0..3 {
        let sc = mul_div255_u8(u16::from(src[i]), op);
        let dc = mul_div255_u8(u16::from(dst[i]), inv);
        out[i] = sc.saturating_add(dc);
    }
    out
}

pub fn premultiply(px: Rgba<u8>) -> PremulRgba8 {
    let [r, g, b, a] = px.0;
    if a == 0 {
        return [0, 0, 0, 0];
    }
    let a16 = u16::from(a);
    [
        mul_div255_u8(u16::from(r), a16),
        mul_div255_u8(u16::from(g), a16),
        mul_div255_u8(u16::from(b), a16),
        a,
    ]
}

pub fn unpremultiply(px: PremulRgba8) -> Rgba<u8> {
    let a = px[3];
    if a == 0 {
        return Rgba([0, 0, 0, 0]);
    }
    if a == 255 {
        return Rgba(px);
    }
    let un = |c: u8| ((u32::from(c) * 255 + u32::from(a) / 2) / u32::from(a)).min(255) as u8;
    Rgba([un(px[0]), un(px[1]), un(px[2]), a])
}

/// Straight-alpha "over" of a single pixel.
pub fn blend_pixel(dst: &mut Rgba<u8>, src: Rgba<u8>) {
    if src[3] == 0 {
        return;
    }
    let out = over(premultiply(*dst), premultiply(src), 1.0);
    *dst = unpremultiply(out);
}

/// Composite a uniform translucent color over the whole image.
pub fn overlay_color(img: &mut RgbaImage, color: Rgba<u8>) {
    if color[3] == 0 {
        return;
    }
    for px in img.pixels_mut() {
        blend_pixel(px, color);
    }
}

/// Paint `color` through `mask` with the mask's layout origin at `(x, y)`.
///
/// Mask pixels falling outside the image are skipped.
pub fn fill_mask(img: &mut RgbaImage, mask: &CoverageMask, x: i32, y: i32, color: Rgba<u8>) {
    if mask.is_empty() || color[3] == 0 {
        return;
    }
    let (w, h) = (img.width() as i64, img.height() as i64);
    let ox = i64::from(x) + i64::from(mask.offset_x);
    let oy = i64::from(y) + i64::from(mask.offset_y);
    for my in 0..mask.height {
        let py = oy + i64::from(my);
        if py < 0 || py >= h {
            continue;
        }
        let row = (my * mask.width) as usize;
        for mx in 0..mask.width {
            let cov = mask.coverage[row + mx as usize];
            if cov == 0 {
                continue;
            }
            let px = ox + i64::from(mx);
            if px < 0 || px >= w {
                continue;
            }
            let alpha = mul_div255_u8(u16::from(color[3]), u16::from(cov));
            let src = Rgba([color[0], color[1], color[2], alpha]);
            blend_pixel(img.get_pixel_mut(px as u32, py as u32), src);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
