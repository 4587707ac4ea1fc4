use super::*;

#[test]
fn builtin_measurements_are_cell_based() {
    let mut m = GlyphMetrics::new();
    let font = FontResource::Builtin;
    assert_eq!(m.width(&font, ""), 0.0);
    assert_eq!(m.height(&font, ""), 0);
    assert_eq!(m.width(&font, "abc"), 3.0 * builtin::CELL_WIDTH as f32);
    assert_eq!(m.height(&font, "abc"), builtin::CELL_HEIGHT);
}

#[test]
fn builtin_prefix_is_never_wider_than_full_string() {
    let mut m = GlyphMetrics::new();
    let font = FontResource::Builtin;
    let text = "Monotonic width check";
    let full = m.width(&font, text);
    for (i, _) in text.char_indices() {
        assert!(m.width(&font, &text[..i]) <= full);
    }
}

#[test]
fn builtin_line_mask_matches_measured_size() {
    let mut m = GlyphMetrics::new();
    let font = FontResource::Builtin;
    let mask = m.line_mask(&font, "Hi");
    assert_eq!(mask.width, 2 * builtin::CELL_WIDTH);
    assert_eq!(mask.height, builtin::CELL_HEIGHT);
    assert_eq!((mask.offset_x, mask.offset_y), (0, 0));
    assert!(mask.coverage.iter().any(|&c| c > 0));

    assert!(m.line_mask(&font, "").is_empty());
}

fn fixture_font(name: &str, size: u32) -> std::sync::Arc<FontResource> {
    use crate::text::font::{FontCache, FontResolver, FontSpec};

    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/data/fonts")
        .join(name);
    let resolver =
        FontResolver::new(std::sync::Arc::new(FontCache::new())).with_search_dirs(vec![]);
    let font = resolver.resolve(&FontSpec::with_path(path, size).unwrap());
    assert!(!font.is_builtin(), "{name} did not load");
    font
}

fn coverage_sum(mask: &CoverageMask) -> u64 {
    mask.coverage.iter().map(|&c| u64::from(c)).sum()
}

#[test]
fn faces_of_one_family_keep_their_own_metrics() {
    let bold = fixture_font("DejaVuSans-Bold.ttf", 48);
    let regular = fixture_font("DejaVuSans.ttf", 48);
    let text = "Wide Bold Headline";
    let bold_alone = GlyphMetrics::new().width(&bold, text);
    let regular_alone = GlyphMetrics::new().width(&regular, text);
    assert!(bold_alone > regular_alone + 20.0, "{bold_alone} vs {regular_alone}");

    let mut shared = GlyphMetrics::new();
    assert!((shared.width(&bold, text) - bold_alone).abs() < 0.01);
    assert!((shared.width(&regular, text) - regular_alone).abs() < 0.01);
    let bold_again = shared.width(&bold, text);
    assert!((bold_again - bold_alone).abs() < 0.01, "{bold_again} vs {bold_alone}");
}

#[test]
fn faces_of_one_family_draw_their_own_glyphs() {
    let bold = fixture_font("DejaVuSans-Bold.ttf", 48);
    let regular = fixture_font("DejaVuSans.ttf", 48);
    let mut shared = GlyphMetrics::new();
    let thin = shared.line_mask(&regular, "Headline");
    let heavy = shared.line_mask(&bold, "Headline");
    assert!(coverage_sum(&heavy) > coverage_sum(&thin));
    assert!(heavy.width > thin.width);
}

#[test]
fn outline_prefix_is_never_wider_than_full_string() {
    let font = fixture_font("DejaVuSans.ttf", 40);
    let mut m = GlyphMetrics::new();
    let text = "Monotonic width, AVAWAY kerning";
    let full = m.width(&font, text);
    for (i, _) in text.char_indices() {
        assert!(m.width(&font, &text[..i]) <= full);
    }
    assert!(m.height(&font, text) >= 40);
}

#[test]
fn outline_line_mask_has_ink_inside_its_padding() {
    let font = fixture_font("DejaVuSans.ttf", 40);
    let mut m = GlyphMetrics::new();
    let mask = m.line_mask(&font, "Hi");
    assert!(!mask.is_empty());
    assert_eq!(mask.coverage.len(), (mask.width * mask.height) as usize);
    assert!(mask.offset_x < 0 && mask.offset_y < 0);
    assert!(coverage_sum(&mask) > 0);
    // Padding stays blank.
    assert!(mask.coverage[..mask.width as usize].iter().all(|&c| c == 0));
}
