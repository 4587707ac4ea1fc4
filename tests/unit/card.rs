use std::sync::Arc;

use super::*;
use crate::text::font::FontCache;

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

fn resolver() -> FontResolver {
    FontResolver::new(Arc::new(FontCache::new())).with_search_dirs(vec![])
}

fn engine() -> BlockLayoutEngine {
    BlockLayoutEngine::new(resolver())
}

fn fonts() -> CardFonts {
    CardFonts {
        title: FontSpec::sized(40).unwrap(),
        subtitle: FontSpec::sized(24).unwrap(),
    }
}

fn has_pixel(img: &RgbImage, region: (u32, u32, u32, u32), color: Rgb<u8>) -> bool {
    let (x0, y0, x1, y1) = region;
    (y0..y1).any(|y| (x0..x1).any(|x| *img.get_pixel(x, y) == color))
}

#[test]
fn card_is_square_of_the_smaller_side() {
    let options = RenderOptions::new(200, 300, false, false).unwrap();
    let out = create_card(&mut engine(), "HI", "", Background::Solid(WHITE), &fonts(), &options)
        .unwrap();
    assert_eq!(out.dimensions(), (200, 200));
}

#[test]
fn title_is_centered_in_the_top_band_in_dark_on_white() {
    let options = RenderOptions::new(200, 200, false, false).unwrap();
    let out = create_card(&mut engine(), "HI", "", Background::Solid(WHITE), &fonts(), &options)
        .unwrap();
    // Built-in font: 16x16 line centered in (0, 0, 200, 80) starts at (92, 32).
    assert!(has_pixel(&out, (92, 32, 108, 48), contrast::DARK_TEXT));
    assert!(!has_pixel(&out, (0, 0, 200, 32), contrast::DARK_TEXT));
    assert!(!has_pixel(&out, (0, 48, 200, 200), contrast::DARK_TEXT));
}

#[test]
fn overlay_darkens_white_enough_for_light_text() {
    let options = RenderOptions::new(200, 200, true, false).unwrap();
    let out = create_card(&mut engine(), "", "SUB", Background::Solid(WHITE), &fonts(), &options)
        .unwrap();
    assert_eq!(*out.get_pixel(0, 0), Rgb([159, 159, 159]));
    // Subtitle box (0, 76, 200, 150): 24x16 line at (88, 105).
    assert!(has_pixel(&out, (88, 105, 112, 121), contrast::LIGHT_TEXT));
}

#[test]
fn missing_background_file_is_an_image_error() {
    let options = RenderOptions::new(64, 64, true, true).unwrap();
    let err = create_card(
        &mut engine(),
        "t",
        "s",
        Background::Path(Path::new("/no/such/background.png")),
        &fonts(),
        &options,
    );
    assert!(matches!(err, Err(CardError::Image(_))));
}

#[test]
fn brand_card_defaults_to_light_grey_and_dark_text() {
    let text = BrandCardText {
        brand: "ACME".to_string(),
        ..Default::default()
    };
    let out = create_brand_card(&mut engine(), None, &text, &BrandCardOptions::default()).unwrap();
    assert_eq!(out.dimensions(), (512, 512));
    let corner = out.get_pixel(0, 0);
    assert!(corner.0.iter().all(|c| (239..=240).contains(c)), "{corner:?}");
    // "ACME" is right-aligned against the 42 px margin at the top.
    assert!(has_pixel(&out, (438, 42, 470, 58), contrast::DARK_TEXT));
}

#[test]
fn brand_card_without_overlay_keeps_background() {
    let options = BrandCardOptions {
        size: 100,
        overlay: None,
        ..Default::default()
    };
    let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(300, 200, Rgb([10, 20, 30])));
    let out =
        create_brand_card_from_image(&mut engine(), &image, &BrandCardText::default(), &options)
            .unwrap();
    assert_eq!(out.dimensions(), (100, 100));
    let px = out.get_pixel(50, 50).0;
    for (got, want) in px.iter().zip([10u8, 20, 30]) {
        assert!(got.abs_diff(want) <= 1, "{px:?}");
    }
}

#[test]
fn brand_card_rejects_zero_size() {
    let options = BrandCardOptions {
        size: 0,
        ..Default::default()
    };
    let err = create_brand_card(&mut engine(), None, &BrandCardText::default(), &options);
    assert!(matches!(err, Err(CardError::Validation(_))));
}

#[test]
fn card_input_accepts_aliases() {
    let input = CardInput::from_json(
        r#"{"title": "T", "brand_text": "B", "footer_text": "F", "background": "bg.png"}"#,
    )
    .unwrap();
    assert_eq!(input.brand.as_deref(), Some("B"));
    assert_eq!(input.footer.as_deref(), Some("F"));
    assert_eq!(input.background_path.as_deref(), Some("bg.png"));
    let text = input.brand_text();
    assert_eq!((text.title.as_str(), text.subtitle.as_str()), ("T", ""));
    assert!(matches!(input.background(), Background::Path(_)));
}

#[test]
fn card_list_accepts_array_or_object() {
    let many = CardInput::list_from_json(r#"[{"title": "a"}, {"title": "b", "output": "x.png"}]"#)
        .unwrap();
    assert_eq!(many.len(), 2);
    assert_eq!(many[0].output_name(0), "card_01.jpg");
    assert_eq!(many[1].output_name(1), "x.png");

    let one = CardInput::list_from_json(r#"{"subtitle": "s", "image_prompt": "sea"}"#).unwrap();
    assert_eq!(one.len(), 1);
    assert!(matches!(one[0].background(), Background::Gradient(Some("sea"))));

    assert!(matches!(CardInput::list_from_json("3"), Err(CardError::Serde(_))));
}

#[test]
fn batch_keeps_order_and_isolates_failures() {
    let inputs = CardInput::list_from_json(
        r#"[{"title": "ok", "image_prompt": "a"}, {"title": "bad", "background_path": "/no/such.png"}, {}]"#,
    )
    .unwrap();
    let options = RenderOptions::new(48, 48, true, false).unwrap();
    let resolver = resolver();
    let out = render_batch(&inputs, &resolver, &fonts(), &options, Some(2)).unwrap();
    assert_eq!(out.len(), 3);
    assert_eq!(out[0].as_ref().unwrap().dimensions(), (48, 48));
    assert!(out[1].is_err());
    assert!(out[2].is_ok());
    // Every worker resolved through the shared cache.
    assert!(!resolver.cache().is_empty());
}

#[test]
fn batch_rejects_zero_threads() {
    let options = RenderOptions::default();
    let err = render_batch(&[], &resolver(), &fonts(), &options, Some(0));
    assert!(matches!(err, Err(CardError::Validation(_))));
}
