use super::*;

#[test]
fn defaults_match_the_stock_tool() {
    let cfg = CardConfig::default();
    assert_eq!(cfg.fonts.title.path.as_deref(), Some(Path::new("Pretendard-Bold.otf")));
    assert_eq!(cfg.fonts.title.size, 72);
    assert_eq!(cfg.fonts.subtitle.size, 42);
    assert_eq!(cfg.fonts.business.size, 36);
    assert_eq!((cfg.image.width, cfg.image.height, cfg.image.overlay), (1080, 1080, true));
    assert_eq!(cfg.brand_card.overlay_alpha, 48);
    assert!(!cfg.brand_card.shadow);
    assert_eq!(cfg.template.scale, 1.0);
    assert_eq!(cfg.template.format, "png");
    assert!(cfg.validate().is_ok());
}

#[test]
fn partial_json_keeps_other_defaults() {
    let cfg = CardConfig::from_json(
        r#"{"image": {"width": 800}, "fonts": {"title": {"path": null, "size": 60}}}"#,
    )
    .unwrap();
    assert_eq!(cfg.image.width, 800);
    assert_eq!(cfg.image.height, 1080);
    assert_eq!(cfg.fonts.title, FontSpec { path: None, size: 60 });
    assert_eq!(cfg.fonts.subtitle.size, 42);
}

#[test]
fn zero_sizes_are_rejected() {
    for json in [
        r#"{"image": {"height": 0}}"#,
        r#"{"fonts": {"subtitle": {"path": null, "size": 0}}}"#,
        r#"{"brand_card": {"fonts": {"footer": {"path": null, "size": 0}}}}"#,
        r#"{"template": {"scale": 0.0}}"#,
    ] {
        assert!(
            matches!(CardConfig::from_json(json), Err(CardError::Validation(_))),
            "{json}"
        );
    }
}

#[test]
fn malformed_json_is_a_serde_error() {
    assert!(matches!(CardConfig::from_json("{"), Err(CardError::Serde(_))));
    assert!(matches!(
        CardConfig::from_json(r#"{"image": {"width": -3}}"#),
        Err(CardError::Serde(_))
    ));
}

#[test]
fn render_options_combine_config_and_switches() {
    let cfg = CardConfig::default();
    let opts = cfg.render_options(Some("720X1280"), false, true).unwrap();
    assert_eq!((opts.width, opts.height, opts.overlay, opts.shadow), (720, 1280, true, false));

    let no_overlay = CardConfig::from_json(r#"{"image": {"overlay": false}}"#).unwrap();
    let opts = no_overlay.render_options(None, false, false).unwrap();
    assert_eq!((opts.width, opts.overlay, opts.shadow), (1080, false, true));

    assert!(cfg.render_options(Some("wide"), false, false).is_err());
    assert!(cfg.render_options(Some("0x10"), false, false).is_err());
}

#[test]
fn brand_overlay_respects_both_switches() {
    let cfg = BrandCardConfig::default();
    assert_eq!(cfg.overlay_color(false), Some(Rgba([255, 255, 255, 48])));
    assert_eq!(cfg.overlay_color(true), None);
    let off = BrandCardConfig {
        overlay: false,
        ..Default::default()
    };
    assert_eq!(off.overlay_color(false), None);
}

#[test]
fn brand_options_apply_size_and_font_overrides() {
    let cfg = CardConfig::from_json(
        r#"{"brand_card": {"shadow": true, "fonts": {"title": {"path": null, "size": 99}}}}"#,
    )
    .unwrap();
    let opts = cfg.brand_card.options(Some(720), true);
    assert_eq!(opts.size, 720);
    assert!(opts.shadow);
    assert_eq!(opts.overlay, None);
    let fonts = opts.fonts.unwrap();
    assert_eq!(fonts.title.size, 99);
    assert_eq!(fonts.subtitle.size, 45);
    assert_eq!(cfg.brand_card.options(None, false).size, 512);
}

#[test]
fn card_fonts_come_from_the_fonts_section() {
    let fonts = CardConfig::default().card_fonts();
    assert_eq!((fonts.title.size, fonts.subtitle.size), (72, 42));
}

#[test]
fn template_request_skips_empty_node_ids() {
    assert!(TemplateConfig::default().request().is_none());
    let cfg = CardConfig::from_json(
        r#"{"template": {"frame_id": "1:1", "nodes": {"title": "1:2", "subtitle": ""}, "scale": 2.0}}"#,
    )
    .unwrap();
    let request = cfg.template.request().unwrap();
    assert_eq!(request.frame_id, "1:1");
    assert_eq!(request.scale, 2.0);
    assert_eq!(request.slots.len(), 1);
    assert_eq!(request.slots["title"], SlotLocator::ById("1:2".to_string()));
}

#[test]
fn load_reports_missing_file() {
    let err = CardConfig::load(Path::new("/no/such/cardnews.json")).unwrap_err();
    assert!(err.to_string().contains("cardnews.json"));
    assert!(CardConfig::load_or_default(None).is_ok());
}

#[test]
fn template_format_names_the_frame_decoder() {
    let cfg = CardConfig::default();
    assert_eq!(cfg.template.frame_format().unwrap(), image::ImageFormat::Png);
    let jpg = CardConfig::from_json(r#"{"template": {"format": "jpg"}}"#).unwrap();
    assert_eq!(jpg.template.frame_format().unwrap(), image::ImageFormat::Jpeg);
    assert!(matches!(
        CardConfig::from_json(r#"{"template": {"format": "pdf"}}"#),
        Err(CardError::Validation(_))
    ));
    // Keys from older configs are ignored.
    assert!(CardConfig::from_json(r#"{"template": {"file_key": "abc"}}"#).is_ok());
}
