//! Built-in 8x16 bitmap font used as the terminal entry of the font fallback chain.
//!
//! Covers printable ASCII. Any other character renders as a hollow box of the same cell size, so
//! measurement stays one cell per character regardless of script.

/// Horizontal advance of every glyph, in pixels.
pub const CELL_WIDTH: u32 = 8;
/// Line height of the built-in font, in pixels.
pub const CELL_HEIGHT: u32 = 16;

const FIRST: u32 = 0x20;

const MISSING: [u8; 16] = [
    0, 0, 0x7E, 0x42, 0x42, 0x42, 0x42, 0x42, 0x42, 0x42, 0x42, 0x7E, 0, 0, 0, 0,
];

#[rustfmt::skip]
const GLYPHS: [[u8; 16]; 95] = [
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0], // space
    [0, 0, 0x18, 0x18, 0x18, 0x18, 0x18, 0x18, 0x18, 0, 0x18, 0x18, 0, 0, 0, 0], // !
    [0, 0x66, 0x66, 0x66, 0x24, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0], // "
    [0, 0, 0x6C, 0x6C, 0xFE, 0x6C, 0x6C, 0x6C, 0xFE, 0x6C, 0x6C, 0, 0, 0, 0, 0], // #
    [0x18, 0x18, 0x7C, 0xC6, 0xC0, 0x78, 0x3C, 0x06, 0xC6, 0x7C, 0x18, 0x18, 0, 0, 0, 0], // $
    [0, 0, 0xC6, 0xCC, 0x18, 0x30, 0x60, 0xCC, 0x86, 0, 0, 0, 0, 0, 0, 0], // %
    [0, 0, 0x38, 0x6C, 0x38, 0x76, 0xDC, 0xCC, 0xCC, 0x76, 0, 0, 0, 0, 0, 0], // &
    [0, 0x18, 0x18, 0x18, 0x30, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0], // \'
    [0, 0, 0x0C, 0x18, 0x30, 0x30, 0x30, 0x30, 0x30, 0x18, 0x0C, 0, 0, 0, 0, 0], // (
    [0, 0, 0x30, 0x18, 0x0C, 0x0C, 0x0C, 0x0C, 0x0C, 0x18, 0x30, 0, 0, 0, 0, 0], // )
    [0, 0, 0, 0x66, 0x3C, 0xFF, 0x3C, 0x66, 0, 0, 0, 0, 0, 0, 0, 0], // *
    [0, 0, 0, 0x18, 0x18, 0x7E, 0x18, 0x18, 0, 0, 0, 0, 0, 0, 0, 0], // +
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0x18, 0x18, 0x30, 0, 0, 0, 0], // ,
    [0, 0, 0, 0, 0, 0x7E, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0], // -
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0x18, 0x18, 0, 0, 0, 0, 0], // .
    [0, 0, 0x06, 0x0C, 0x18, 0x30, 0x60, 0xC0, 0x80, 0, 0, 0, 0, 0, 0, 0], // /
    [0, 0, 0x7C, 0xC6, 0xCE, 0xDE, 0xF6, 0xE6, 0xC6, 0x7C, 0, 0, 0, 0, 0, 0], // 0
    [0, 0, 0x18, 0x38, 0x78, 0x18, 0x18, 0x18, 0x18, 0x7E, 0, 0, 0, 0, 0, 0], // 1
    [0, 0, 0x7C, 0xC6, 0x06, 0x0C, 0x18, 0x30, 0x60, 0xFE, 0, 0, 0, 0, 0, 0], // 2
    [0, 0, 0x7C, 0xC6, 0x06, 0x3C, 0x06, 0x06, 0xC6, 0x7C, 0, 0, 0, 0, 0, 0], // 3
    [0, 0, 0x0C, 0x1C, 0x3C, 0x6C, 0xCC, 0xFE, 0x0C, 0x0C, 0, 0, 0, 0, 0, 0], // 4
    [0, 0, 0xFE, 0xC0, 0xC0, 0xFC, 0x06, 0x06, 0xC6, 0x7C, 0, 0, 0, 0, 0, 0], // 5
    [0, 0, 0x38, 0x60, 0xC0, 0xFC, 0xC6, 0xC6, 0xC6, 0x7C, 0, 0, 0, 0, 0, 0], // 6
    [0, 0, 0xFE, 0x06, 0x0C, 0x18, 0x30, 0x30, 0x30, 0x30, 0, 0, 0, 0, 0, 0], // 7
    [0, 0, 0x7C, 0xC6, 0xC6, 0x7C, 0xC6, 0xC6, 0xC6, 0x7C, 0, 0, 0, 0, 0, 0], // 8
    [0, 0, 0x7C, 0xC6, 0xC6, 0x7E, 0x06, 0x06, 0x0C, 0x78, 0, 0, 0, 0, 0, 0], // 9
    [0, 0, 0, 0, 0x18, 0x18, 0, 0, 0x18, 0x18, 0, 0, 0, 0, 0, 0], // :
    [0, 0, 0, 0, 0x18, 0x18, 0, 0, 0x18, 0x18, 0x30, 0, 0, 0, 0, 0], // ;
    [0, 0, 0x06, 0x0C, 0x18, 0x30, 0x60, 0x30, 0x18, 0x0C, 0x06, 0, 0, 0, 0, 0], // <
    [0, 0, 0, 0, 0x7E, 0, 0x7E, 0, 0, 0, 0, 0, 0, 0, 0, 0], // =
    [0, 0, 0x60, 0x30, 0x18, 0x0C, 0x06, 0x0C, 0x18, 0x30, 0x60, 0, 0, 0, 0, 0], // >
    [0, 0, 0x7C, 0xC6, 0x06, 0x0C, 0x18, 0x18, 0, 0x18, 0x18, 0, 0, 0, 0, 0], // ?
    [0, 0, 0x7C, 0xC6, 0xC6, 0xDE, 0xDE, 0xDE, 0xC0, 0x7E, 0, 0, 0, 0, 0, 0], // @
    [0, 0, 0x10, 0x38, 0x6C, 0xC6, 0xC6, 0xFE, 0xC6, 0xC6, 0, 0, 0, 0, 0, 0], // A
    [0, 0, 0xFC, 0x66, 0x66, 0x7C, 0x66, 0x66, 0x66, 0xFC, 0, 0, 0, 0, 0, 0], // B
    [0, 0, 0x3C, 0x66, 0xC0, 0xC0, 0xC0, 0xC0, 0x66, 0x3C, 0, 0, 0, 0, 0, 0], // C
    [0, 0, 0xF8, 0x6C, 0x66, 0x66, 0x66, 0x66, 0x6C, 0xF8, 0, 0, 0, 0, 0, 0], // D
    [0, 0, 0xFE, 0x62, 0x68, 0x78, 0x68, 0x60, 0x62, 0xFE, 0, 0, 0, 0, 0, 0], // E
    [0, 0, 0xFE, 0x62, 0x68, 0x78, 0x68, 0x60, 0x60, 0xF0, 0, 0, 0, 0, 0, 0], // F
    [0, 0, 0x3C, 0x66, 0xC0, 0xC0, 0xCE, 0xC6, 0x66, 0x3E, 0, 0, 0, 0, 0, 0], // G
    [0, 0, 0xC6, 0xC6, 0xC6, 0xFE, 0xC6, 0xC6, 0xC6, 0xC6, 0, 0, 0, 0, 0, 0], // H
    [0, 0, 0x3C, 0x18, 0x18, 0x18, 0x18, 0x18, 0x18, 0x3C, 0, 0, 0, 0, 0, 0], // I
    [0, 0, 0x1E, 0x0C, 0x0C, 0x0C, 0x0C, 0xCC, 0xCC, 0x78, 0, 0, 0, 0, 0, 0], // J
    [0, 0, 0xE6, 0x66, 0x6C, 0x78, 0x78, 0x6C, 0x66, 0xE6, 0, 0, 0, 0, 0, 0], // K
    [0, 0, 0xF0, 0x60, 0x60, 0x60, 0x60, 0x60, 0x62, 0xFE, 0, 0, 0, 0, 0, 0], // L
    [0, 0, 0xC6, 0xEE, 0xFE, 0xD6, 0xC6, 0xC6, 0xC6, 0xC6, 0, 0, 0, 0, 0, 0], // M
    [0, 0, 0xC6, 0xE6, 0xF6, 0xDE, 0xCE, 0xC6, 0xC6, 0xC6, 0, 0, 0, 0, 0, 0], // N
    [0, 0, 0x7C, 0xC6, 0xC6, 0xC6, 0xC6, 0xC6, 0xC6, 0x7C, 0, 0, 0, 0, 0, 0], // O
    [0, 0, 0xFC, 0x66, 0x66, 0x7C, 0x60, 0x60, 0x60, 0xF0, 0, 0, 0, 0, 0, 0], // P
    [0, 0, 0x7C, 0xC6, 0xC6, 0xC6, 0xC6, 0xD6, 0xDE, 0x7C, 0x0E, 0, 0, 0, 0, 0], // Q
    [0, 0, 0xFC, 0x66, 0x66, 0x7C, 0x6C, 0x66, 0x66, 0xE6, 0, 0, 0, 0, 0, 0], // R
    [0, 0, 0x7C, 0xC6, 0x60, 0x38, 0x0C, 0x06, 0xC6, 0x7C, 0, 0, 0, 0, 0, 0], // S
    [0, 0, 0x7E, 0x5A, 0x18, 0x18, 0x18, 0x18, 0x18, 0x3C, 0, 0, 0, 0, 0, 0], // T
    [0, 0, 0xC6, 0xC6, 0xC6, 0xC6, 0xC6, 0xC6, 0xC6, 0x7C, 0, 0, 0, 0, 0, 0], // U
    [0, 0, 0xC6, 0xC6, 0xC6, 0xC6, 0xC6, 0x6C, 0x38, 0x10, 0, 0, 0, 0, 0, 0], // V
    [0, 0, 0xC6, 0xC6, 0xC6, 0xD6, 0xFE, 0xEE, 0xC6, 0x82, 0, 0, 0, 0, 0, 0], // W
    [0, 0, 0xC6, 0xC6, 0x6C, 0x38, 0x38, 0x6C, 0xC6, 0xC6, 0, 0, 0, 0, 0, 0], // X
    [0, 0, 0x66, 0x66, 0x66, 0x3C, 0x18, 0x18, 0x18, 0x3C, 0, 0, 0, 0, 0, 0], // Y
    [0, 0, 0xFE, 0xC6, 0x0C, 0x18, 0x30, 0x60, 0xC6, 0xFE, 0, 0, 0, 0, 0, 0], // Z
    [0, 0, 0x3C, 0x30, 0x30, 0x30, 0x30, 0x30, 0x30, 0x3C, 0, 0, 0, 0, 0, 0], // [
    [0, 0, 0xC0, 0x60, 0x30, 0x18, 0x0C, 0x06, 0x02, 0, 0, 0, 0, 0, 0, 0], // \\
    [0, 0, 0x3C, 0x0C, 0x0C, 0x0C, 0x0C, 0x0C, 0x0C, 0x3C, 0, 0, 0, 0, 0, 0], // ]
    [0x10, 0x38, 0x6C, 0xC6, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0], // ^
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0xFF, 0, 0, 0, 0, 0], // _
    [0x30, 0x18, 0x0C, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0], // `
    [0, 0, 0, 0, 0x78, 0x0C, 0x7C, 0xCC, 0xCC, 0x76, 0, 0, 0, 0, 0, 0], // a
    [0, 0, 0xE0, 0x60, 0x7C, 0x66, 0x66, 0x66, 0x66, 0xDC, 0, 0, 0, 0, 0, 0], // b
    [0, 0, 0, 0, 0x7C, 0xC6, 0xC0, 0xC0, 0xC6, 0x7C, 0, 0, 0, 0, 0, 0], // c
    [0, 0, 0x1C, 0x0C, 0x7C, 0xCC, 0xCC, 0xCC, 0xCC, 0x76, 0, 0, 0, 0, 0, 0], // d
    [0, 0, 0, 0, 0x7C, 0xC6, 0xFE, 0xC0, 0xC6, 0x7C, 0, 0, 0, 0, 0, 0], // e
    [0, 0, 0x1C, 0x36, 0x30, 0x78, 0x30, 0x30, 0x30, 0x78, 0, 0, 0, 0, 0, 0], // f
    [0, 0, 0, 0, 0x76, 0xCC, 0xCC, 0xCC, 0x7C, 0x0C, 0xCC, 0x78, 0, 0, 0, 0], // g
    [0, 0, 0xE0, 0x60, 0x6C, 0x76, 0x66, 0x66, 0x66, 0xE6, 0, 0, 0, 0, 0, 0], // h
    [0, 0, 0x18, 0, 0x38, 0x18, 0x18, 0x18, 0x18, 0x3C, 0, 0, 0, 0, 0, 0], // i
    [0, 0, 0x06, 0, 0x0E, 0x06, 0x06, 0x06, 0x06, 0x66, 0x66, 0x3C, 0, 0, 0, 0], // j
    [0, 0, 0xE0, 0x60, 0x66, 0x6C, 0x78, 0x6C, 0x66, 0xE6, 0, 0, 0, 0, 0, 0], // k
    [0, 0, 0x38, 0x18, 0x18, 0x18, 0x18, 0x18, 0x18, 0x3C, 0, 0, 0, 0, 0, 0], // l
    [0, 0, 0, 0, 0xEC, 0xFE, 0xD6, 0xD6, 0xC6, 0xC6, 0, 0, 0, 0, 0, 0], // m
    [0, 0, 0, 0, 0xDC, 0x66, 0x66, 0x66, 0x66, 0x66, 0, 0, 0, 0, 0, 0], // n
    [0, 0, 0, 0, 0x7C, 0xC6, 0xC6, 0xC6, 0xC6, 0x7C, 0, 0, 0, 0, 0, 0], // o
    [0, 0, 0, 0, 0xDC, 0x66, 0x66, 0x66, 0x7C, 0x60, 0x60, 0xF0, 0, 0, 0, 0], // p
    [0, 0, 0, 0, 0x76, 0xCC, 0xCC, 0xCC, 0x7C, 0x0C, 0x0C, 0x1E, 0, 0, 0, 0], // q
    [0, 0, 0, 0, 0xDC, 0x76, 0x66, 0x60, 0x60, 0xF0, 0, 0, 0, 0, 0, 0], // r
    [0, 0, 0, 0, 0x7C, 0xC6, 0x70, 0x1C, 0xC6, 0x7C, 0, 0, 0, 0, 0, 0], // s
    [0, 0, 0x10, 0x30, 0xFC, 0x30, 0x30, 0x30, 0x34, 0x18, 0, 0, 0, 0, 0, 0], // t
    [0, 0, 0, 0, 0xCC, 0xCC, 0xCC, 0xCC, 0xCC, 0x76, 0, 0, 0, 0, 0, 0], // u
    [0, 0, 0, 0, 0xC6, 0xC6, 0xC6, 0x6C, 0x38, 0x10, 0, 0, 0, 0, 0, 0], // v
    [0, 0, 0, 0, 0xC6, 0xC6, 0xD6, 0xFE, 0xEE, 0x6C, 0, 0, 0, 0, 0, 0], // w
    [0, 0, 0, 0, 0xC6, 0x6C, 0x38, 0x38, 0x6C, 0xC6, 0, 0, 0, 0, 0, 0], // x
    [0, 0, 0, 0, 0xC6, 0xC6, 0xC6, 0xC6, 0x7E, 0x06, 0x0C, 0xF8, 0, 0, 0, 0], // y
    [0, 0, 0, 0, 0xFE, 0x8C, 0x18, 0x30, 0x62, 0xFE, 0, 0, 0, 0, 0, 0], // z
    [0, 0, 0x0E, 0x18, 0x18, 0x70, 0x18, 0x18, 0x18, 0x0E, 0, 0, 0, 0, 0, 0], // {
    [0, 0, 0x18, 0x18, 0x18, 0, 0x18, 0x18, 0x18, 0, 0, 0, 0, 0, 0, 0], // |
    [0, 0, 0x70, 0x18, 0x18, 0x0E, 0x18, 0x18, 0x18, 0x70, 0, 0, 0, 0, 0, 0], // }
    [0, 0, 0x76, 0xDC, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0], // ~
];

/// Row bitmaps for `ch`; bit 7 of each row is the leftmost pixel.
pub fn glyph_rows(ch: char) -> &'static [u8; 16] {
    let code = u32::from(ch);
    if (FIRST..FIRST + GLYPHS.len() as u32).contains(&code) {
        &GLYPHS[(code - FIRST) as usize]
    } else {
        &MISSING
    }
}

/// Width in pixels of `text` set in the built-in font.
pub fn text_width(text: &str) -> u32 {
    text.chars().count() as u32 * CELL_WIDTH
}

/// Coverage mask (0 or 255 per pixel) for a single line, `text_width(text) x CELL_HEIGHT`.
pub fn rasterize_line(text: &str) -> (u32, u32, Vec<u8>) {
    let width = text_width(text);
    let mut coverage = vec![0u8; (width * CELL_HEIGHT) as usize];
    for (i, ch) in text.chars().enumerate() {
        let origin_x = i as u32 * CELL_WIDTH;
        for (row_idx, &row) in glyph_rows(ch).iter().enumerate() {
            for bit in 0..CELL_WIDTH {
                if (row >> (7 - bit)) & 1 == 0 {
                    continue;
                }
                let idx = row_idx as u32 * width + origin_x + bit;
                coverage[idx as usize] = 255;
            }
        }
    }
    (width, CELL_HEIGHT, coverage)
}

#[cfg(test)]
#[path = "../../tests/unit/text/builtin.rs"]
mod tests;
