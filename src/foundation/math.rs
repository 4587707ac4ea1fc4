pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

pub(crate) fn mul_div255_u8(x: u16, y: u16) -> u8 {
    mul_div255_u16(x, y) as u8
}

/// Linear interpolation between two channel values, truncated toward zero.
pub(crate) fn lerp_channel(a: u8, b: u8, t: f64) -> u8 {
    let v = f64::from(a) * (1.0 - t) + f64::from(b) * t;
    v.clamp(0.0, 255.0) as u8
}

/// ITU-R 601 luma of an RGB triple, truncated like an 8-bit grayscale conversion.
pub(crate) fn luma_u8(r: u8, g: u8, b: u8) -> u8 {
    let l = u32::from(r) * 299 + u32::from(g) * 587 + u32::from(b) * 114;
    (l / 1000) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
