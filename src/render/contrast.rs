use crate::foundation::core::{Rgb, RgbaImage};
use crate::foundation::math::luma_u8;

/// Text color used over bright backgrounds.
pub const DARK_TEXT: Rgb<u8> = Rgb([20, 20, 20]);
/// Text color used over dark or mid-tone backgrounds.
pub const LIGHT_TEXT: Rgb<u8> = Rgb([240, 240, 240]);
/// Average luminance above which dark text is chosen.
pub const LUMINANCE_THRESHOLD: f64 = 160.0;

const SAMPLE_GRID: u32 = 10;

/// Mean luminance of a 10x10 box-filtered thumbnail of `img`. Alpha is ignored.
pub fn average_luminance(img: &RgbaImage) -> f64 {
    let (w, h) = img.dimensions();
    if w == 0 || h == 0 {
        return 0.0;
    }
    let mut total = 0u64;
    for gy in 0..SAMPLE_GRID {
        let (y0, y1) = cell_span(gy, h);
        for gx in 0..SAMPLE_GRID {
            let (x0, x1) = cell_span(gx, w);
            let mut sum = 0u64;
            for y in y0..y1 {
                for x in x0..x1 {
                    let px = img.get_pixel(x, y);
                    sum += u64::from(luma_u8(px[0], px[1], px[2]));
                }
            }
            let count = u64::from((x1 - x0) * (y1 - y0));
            total += (sum + count / 2) / count;
        }
    }
    total as f64 / f64::from(SAMPLE_GRID * SAMPLE_GRID)
}

/// Readable foreground for text drawn over `img`.
///
/// Exactly [`LUMINANCE_THRESHOLD`] still picks light text.
pub fn pick_text_color(img: &RgbaImage) -> Rgb<u8> {
    let avg = average_luminance(img);
    let color = if avg > LUMINANCE_THRESHOLD {
        DARK_TEXT
    } else {
        LIGHT_TEXT
    };
    tracing::debug!(avg, ?color, "picked text color");
    color
}

/// Source range covered by thumbnail cell `i` along an axis of `len` pixels; never empty.
fn cell_span(i: u32, len: u32) -> (u32, u32) {
    let start = (u64::from(i) * u64::from(len) / u64::from(SAMPLE_GRID)) as u32;
    let end = (u64::from(i + 1) * u64::from(len) / u64::from(SAMPLE_GRID)) as u32;
    let start = start.min(len - 1);
    (start, end.max(start + 1))
}

#[cfg(test)]
#[path = "../../tests/unit/render/contrast.rs"]
mod tests;
