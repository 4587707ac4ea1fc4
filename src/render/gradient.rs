//! Deterministic gradient backgrounds derived from a seed string.
//!
//! The seed is hashed with SHA-256 and the first three digest bytes pick colors from a fixed
//! palette. The first and last picks form a vertical base gradient; with three stops a softened
//! band gradient through all of them is mixed in at 40%.

use sha2::{Digest, Sha256};

use crate::foundation::core::{Rgb, RgbImage};
use crate::foundation::error::{CardError, CardResult};
use crate::foundation::math::lerp_channel;
use crate::render::blur;

/// Colors a seed can pick from.
pub const GRADIENT_PALETTE: [[u8; 3]; 8] = [
    [255, 92, 87],
    [255, 149, 0],
    [255, 204, 0],
    [76, 217, 100],
    [90, 200, 250],
    [88, 86, 214],
    [255, 45, 85],
    [142, 142, 147],
];

/// Seed used when no prompt is given.
pub const DEFAULT_GRADIENT_SEED: &str = "default gradient";

/// Weight of the band overlay when mixed into the base gradient.
pub const BAND_MIX: f64 = 0.4;

const PICKS: usize = 3;

/// Ordered color stops of a vertical gradient, top to bottom.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Gradient {
    stops: Vec<Rgb<u8>>,
}

impl Gradient {
    pub fn new(stops: Vec<Rgb<u8>>) -> CardResult<Self> {
        if stops.len() < 2 {
            return Err(CardError::validation(format!(
                "gradient needs at least 2 stops, got {}",
                stops.len()
            )));
        }
        Ok(Self { stops })
    }

    /// Three palette picks (repeats allowed) chosen by the seed's SHA-256 digest.
    pub fn from_seed(seed: &str) -> Self {
        let digest = Sha256::digest(seed.as_bytes());
        let stops = digest
            .iter()
            .take(PICKS)
            .map(|&b| Rgb(GRADIENT_PALETTE[usize::from(b) % GRADIENT_PALETTE.len()]))
            .collect();
        Self { stops }
    }

    pub fn stops(&self) -> &[Rgb<u8>] {
        &self.stops
    }
}

/// Render `gradient` vertically into a `width x height` image.
#[tracing::instrument(level = "debug", skip(gradient), fields(stops = gradient.stops.len()))]
pub fn linear_gradient(width: u32, height: u32, gradient: &Gradient) -> CardResult<RgbImage> {
    if width == 0 || height == 0 {
        return Err(CardError::validation(format!(
            "gradient size must be positive, got {width}x{height}"
        )));
    }
    let stops = gradient.stops();
    let (top, bottom) = (stops[0], stops[stops.len() - 1]);
    let denom = f64::from(height.saturating_sub(1).max(1));
    let mut column: Vec<Rgb<u8>> = (0..height)
        .map(|y| mix(top, bottom, f64::from(y) / denom))
        .collect();

    if stops.len() > 2 {
        let bands = band_column(height, stops);
        let (radius, sigma) = blur::kernel_params(height as f32 / 12.0);
        let raw: Vec<u8> = bands.iter().flat_map(|px| px.0).collect();
        let blurred = blur::gaussian_blur(&raw, 1, height, 3, radius, sigma)?;
        for (base, soft) in column.iter_mut().zip(blurred.chunks_exact(3)) {
            *base = mix(*base, Rgb([soft[0], soft[1], soft[2]]), BAND_MIX);
        }
    }

    // Every row is a single color, so the image is the column broadcast across the width.
    Ok(RgbImage::from_fn(width, height, |_, y| column[y as usize]))
}

/// Gradient image for `seed` at `width x height`; identical seeds give identical bytes.
pub fn generate_gradient(seed: &str, width: u32, height: u32) -> CardResult<RgbImage> {
    linear_gradient(width, height, &Gradient::from_seed(seed))
}

/// Like [`generate_gradient`], with an absent or empty prompt using [`DEFAULT_GRADIENT_SEED`].
pub fn generate_prompt_gradient(
    prompt: Option<&str>,
    width: u32,
    height: u32,
) -> CardResult<RgbImage> {
    let seed = match prompt {
        Some(p) if !p.is_empty() => p,
        _ => DEFAULT_GRADIENT_SEED,
    };
    generate_gradient(seed, width, height)
}

/// Piecewise interpolation through all stops in equal-height bands.
fn band_column(height: u32, stops: &[Rgb<u8>]) -> Vec<Rgb<u8>> {
    let mut column = vec![Rgb([0, 0, 0]); height as usize];
    let steps = (stops.len() - 1) as u64;
    let h = u64::from(height);
    for (index, pair) in stops.windows(2).enumerate() {
        let y0 = h * index as u64 / steps;
        let y1 = h * (index as u64 + 1) / steps;
        let span = (y1 - y0).max(1) as f64;
        for y in y0..y1 {
            column[y as usize] = mix(pair[0], pair[1], (y - y0) as f64 / span);
        }
    }
    column
}

fn mix(a: Rgb<u8>, b: Rgb<u8>, t: f64) -> Rgb<u8> {
    Rgb([
        lerp_channel(a[0], b[0], t),
        lerp_channel(a[1], b[1], t),
        lerp_channel(a[2], b[2], t),
    ])
}

#[cfg(test)]
#[path = "../../tests/unit/render/gradient.rs"]
mod tests;
