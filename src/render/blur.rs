use crate::foundation::error::{CardError, CardResult};

/// Kernel radius and sigma for a Gaussian blur of nominal `radius` pixels.
pub fn kernel_params(radius: f32) -> (u32, f32) {
    if !radius.is_finite() || radius <= 0.0 {
        return (0, 0.0);
    }
    (radius.ceil() as u32, radius / 2.0)
}

/// Separable Gaussian blur over an interleaved 8-bit buffer with `channels` per pixel.
///
/// Edges are clamped. Weights are Q16 fixed point and sum to exactly 1.0, so a constant image
/// comes back unchanged.
pub fn gaussian_blur(
    src: &[u8],
    width: u32,
    height: u32,
    channels: usize,
    radius: u32,
    sigma: f32,
) -> CardResult<Vec<u8>> {
    let expected_len = (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(channels))
        .ok_or_else(|| CardError::image("blur buffer size overflow"))?;
    if channels == 0 || src.len() != expected_len {
        return Err(CardError::image(format!(
            "blur expects {width}x{height}x{channels} bytes, got {}",
            src.len()
        )));
    }
    if radius == 0 || expected_len == 0 {
        return Ok(src.to_vec());
    }

    let kernel = gaussian_kernel_q16(radius, sigma)?;
    let mut tmp = vec![0u8; expected_len];
    let mut out = vec![0u8; expected_len];

    let dims = Dims {
        width: width as i64,
        height: height as i64,
        channels,
    };
    horizontal_pass(src, &mut tmp, dims, &kernel);
    vertical_pass(&tmp, &mut out, dims, &kernel);
    Ok(out)
}

#[derive(Clone, Copy)]
struct Dims {
    width: i64,
    height: i64,
    channels: usize,
}

fn gaussian_kernel_q16(radius: u32, sigma: f32) -> CardResult<Vec<u32>> {
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(CardError::validation("blur sigma must be > 0"));
    }

    let r = i64::from(radius);
    let sigma = f64::from(sigma);
    let denom = 2.0 * sigma * sigma;
    let weights_f: Vec<f64> = (-r..=r)
        .map(|i| {
            let x = i as f64;
            (-x * x / denom).exp()
        })
        .collect();
    let sum: f64 = weights_f.iter().sum();
    if sum <= 0.0 {
        return Err(CardError::image("gaussian kernel sum is zero"));
    }

    let mut weights = Vec::<u32>::with_capacity(weights_f.len());
    let mut acc: i64 = 0;
    for &wf in &weights_f {
        let q = (((wf / sum) * 65536.0).round() as i64).clamp(0, 65536);
        weights.push(q as u32);
        acc += q;
    }
    let delta = 65536 - acc;
    if delta != 0 {
        let mid = weights.len() / 2;
        weights[mid] = (i64::from(weights[mid]) + delta).clamp(0, 65536) as u32;
    }

    Ok(weights)
}

fn horizontal_pass(src: &[u8], dst: &mut [u8], d: Dims, k: &[u32]) {
    let radius = (k.len() / 2) as i64;
    let mut acc = vec![0u64; d.channels];
    for y in 0..d.height {
        for x in 0..d.width {
            acc.fill(0);
            for (ki, &kw) in k.iter().enumerate() {
                let sx = (x + ki as i64 - radius).clamp(0, d.width - 1);
                let idx = ((y * d.width + sx) as usize) * d.channels;
                for (c, a) in acc.iter_mut().enumerate() {
                    *a += u64::from(kw) * u64::from(src[idx + c]);
                }
            }
            let out_idx = ((y * d.width + x) as usize) * d.channels;
            for (c, &a) in acc.iter().enumerate() {
                dst[out_idx + c] = q16_to_u8(a);
            }
        }
    }
}

fn vertical_pass(src: &[u8], dst: &mut [u8], d: Dims, k: &[u32]) {
    let radius = (k.len() / 2) as i64;
    let mut acc = vec![0u64; d.channels];
    for y in 0..d.height {
        for x in 0..d.width {
            acc.fill(0);
            for (ki, &kw) in k.iter().enumerate() {
                let sy = (y + ki as i64 - radius).clamp(0, d.height - 1);
                let idx = ((sy * d.width + x) as usize) * d.channels;
                for (c, a) in acc.iter_mut().enumerate() {
                    *a += u64::from(kw) * u64::from(src[idx + c]);
                }
            }
            let out_idx = ((y * d.width + x) as usize) * d.channels;
            for (c, &a) in acc.iter().enumerate() {
                dst[out_idx + c] = q16_to_u8(a);
            }
        }
    }
}

fn q16_to_u8(acc: u64) -> u8 {
    ((acc + 32768) >> 16).min(255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/render/blur.rs"]
mod tests;
