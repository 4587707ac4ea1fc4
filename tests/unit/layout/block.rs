use std::sync::Arc;

use super::*;
use crate::text::font::FontCache;

fn engine() -> BlockLayoutEngine {
    BlockLayoutEngine::new(FontResolver::new(Arc::new(FontCache::new())).with_search_dirs(vec![]))
}

fn line(text: &str, width: f32, height: u32) -> MeasuredLine {
    MeasuredLine {
        text: text.to_string(),
        width,
        height,
    }
}

fn black_canvas(edge: u32) -> Canvas {
    Canvas::solid(edge, edge, Rgb([0, 0, 0])).unwrap()
}

#[test]
fn two_lines_center_in_a_300px_box() {
    let bounds = PixelBox::new(0, 100, 400, 400);
    let lines = [line("first", 100.0, 40), line("second", 200.0, 40)];
    let placed = plan_block(bounds, &lines, LINE_SPACING);
    // (300 - (40 + 40 + 12)) / 2 = 104
    assert_eq!(placed[0].y, 100 + 104);
    assert_eq!(placed[1].y, 100 + 104 + 40 + 12);
    assert_eq!(placed[0].x, 150);
    assert_eq!(placed[1].x, 100);
}

#[test]
fn overflowing_content_starts_at_the_top() {
    let bounds = PixelBox::new(10, 20, 110, 50);
    let lines = [line("a", 8.0, 16), line("b", 8.0, 16), line("c", 8.0, 16)];
    let placed = plan_block(bounds, &lines, LINE_SPACING);
    assert_eq!(placed[0].y, 20);
    assert_eq!(placed[2].y, 20 + 2 * (16 + 12));
}

#[test]
fn builtin_block_is_centered() {
    let mut engine = engine();
    let font = FontSpec::sized(30).unwrap();
    let block = TextBlock::new("hello world", font, PixelBox::new(0, 0, 200, 100));
    let placed = engine.layout_block(&block);
    assert_eq!(
        placed,
        vec![PlacedLine {
            text: "hello world".to_string(),
            x: 56,
            y: 42,
        }]
    );
}

#[test]
fn wrapping_uses_box_width_minus_margin() {
    let mut engine = engine();
    let font = FontSpec::sized(30).unwrap();
    // 120 - 80 = 40 px: five built-in cells per line.
    let block = TextBlock::new("aaaa bbbb", font, PixelBox::new(0, 0, 120, 200));
    let placed = engine.layout_block(&block);
    let texts: Vec<_> = placed.iter().map(|p| p.text.as_str()).collect();
    assert_eq!(texts, ["aaaa", "bbbb"]);
}

#[test]
fn empty_text_or_box_is_skipped() {
    let mut engine = engine();
    let font = FontSpec::sized(30).unwrap();
    assert!(engine.layout_block(&TextBlock::new("", font.clone(), PixelBox::new(0, 0, 100, 100))).is_empty());
    assert!(engine.layout_block(&TextBlock::new("x", font.clone(), PixelBox::new(50, 0, 50, 100))).is_empty());

    let mut canvas = black_canvas(32);
    let before = canvas.clone();
    engine.layout_and_draw(
        &mut canvas,
        &[TextBlock::new("x", font, PixelBox::new(0, 10, 32, 10))],
        true,
        None,
    );
    assert_eq!(canvas, before);
}

#[test]
fn explicit_fill_is_drawn() {
    let mut engine = engine();
    let mut canvas = black_canvas(120);
    let block = TextBlock::new("HI", FontSpec::sized(20).unwrap(), PixelBox::new(0, 0, 120, 120))
        .with_fill(Rgb([200, 30, 30]));
    engine.layout_and_draw(&mut canvas, &[block], false, Some(Rgb([0, 255, 0])));
    let pixels: Vec<_> = canvas.image().pixels().copied().collect();
    assert!(pixels.contains(&Rgba([200, 30, 30, 255])));
    assert!(!pixels.contains(&Rgba([0, 255, 0, 255])));
}

#[test]
fn contrast_pick_is_used_without_fills() {
    let mut engine = engine();
    let mut canvas = black_canvas(120);
    let block = TextBlock::new("HI", FontSpec::sized(20).unwrap(), PixelBox::new(0, 0, 120, 120));
    engine.layout_and_draw(&mut canvas, &[block], false, None);
    assert!(canvas.image().pixels().any(|p| *p == Rgba([240, 240, 240, 255])));
}

#[test]
fn shadow_adds_darkened_pixels() {
    let fill = Rgb([255, 255, 255]);
    let block = TextBlock::new("HI", FontSpec::sized(20).unwrap(), PixelBox::new(0, 0, 120, 120))
        .with_fill(fill);
    let intermediate = |canvas: &Canvas| {
        canvas
            .image()
            .pixels()
            .filter(|p| p[0] != 0 && p[0] != 255)
            .count()
    };

    let mut plain = black_canvas(120);
    engine().layout_and_draw(&mut plain, std::slice::from_ref(&block), false, None);
    assert_eq!(intermediate(&plain), 0);

    let mut shadowed = black_canvas(120);
    engine().layout_and_draw(&mut shadowed, &[block], true, None);
    assert!(intermediate(&shadowed) > 0);
}

#[test]
fn shadow_color_clamps_at_zero() {
    assert_eq!(shadow_color(Rgb([100, 200, 50])), Rgba([0, 80, 0, SHADOW_ALPHA]));
}
