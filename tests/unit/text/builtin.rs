use super::*;

#[test]
fn width_is_one_cell_per_char() {
    assert_eq!(text_width(""), 0);
    assert_eq!(text_width("hello"), 5 * CELL_WIDTH);
    assert_eq!(text_width("한글"), 2 * CELL_WIDTH);
}

#[test]
fn unknown_chars_use_box_glyph() {
    assert_eq!(glyph_rows('한'), glyph_rows('\u{1F600}'));
    assert_ne!(glyph_rows('A'), glyph_rows('한'));
}

#[test]
fn rasterized_space_is_blank_and_letters_have_ink() {
    let (w, h, cov) = rasterize_line(" ");
    assert_eq!((w, h), (CELL_WIDTH, CELL_HEIGHT));
    assert!(cov.iter().all(|&c| c == 0));

    let (w, h, cov) = rasterize_line("A");
    assert_eq!(cov.len(), (w * h) as usize);
    assert!(cov.iter().any(|&c| c == 255));
}
