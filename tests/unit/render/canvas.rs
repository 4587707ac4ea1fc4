use super::*;

fn temp_png(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("cardnews_{name}_{}.png", std::process::id()))
}

#[test]
fn solid_rejects_zero_size() {
    assert!(Canvas::solid(0, 4, Rgb([0, 0, 0])).is_err());
    let c = Canvas::solid(3, 2, Rgb([236, 236, 236])).unwrap();
    assert_eq!((c.width(), c.height()), (3, 2));
    assert!(c.image().pixels().all(|p| *p == Rgba([236, 236, 236, 255])));
}

#[test]
fn ensure_square_crops_the_center() {
    let mut img = RgbImage::from_pixel(6, 2, Rgb([0, 0, 0]));
    img.put_pixel(2, 0, Rgb([255, 0, 0]));
    let square = ensure_square(&DynamicImage::ImageRgb8(img));
    assert_eq!((square.width(), square.height()), (2, 2));
    assert_eq!(square.to_rgb8().get_pixel(0, 0), &Rgb([255, 0, 0]));
}

#[test]
fn from_image_resamples_to_requested_edge() {
    let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(40, 20, Rgb([10, 200, 30])));
    let canvas = Canvas::from_image(&img, 16).unwrap();
    assert_eq!((canvas.width(), canvas.height()), (16, 16));
    let px = canvas.image().get_pixel(8, 8);
    assert_eq!(px[3], 255);
    assert!((i32::from(px[1]) - 200).abs() <= 1);
}

#[test]
fn background_gradient_matches_generator() {
    let canvas = Canvas::from_background(Background::Gradient(Some("abc")), 12).unwrap();
    let expected = gradient::generate_gradient("abc", 12, 12).unwrap();
    assert_eq!(canvas.into_rgb(), expected);
}

#[test]
fn background_path_loads_and_crops() {
    let path = temp_png("canvas_bg");
    RgbImage::from_pixel(8, 4, Rgb([90, 90, 90])).save(&path).unwrap();
    let canvas = Canvas::from_background(Background::Path(&path), 4).unwrap();
    let px = canvas.image().get_pixel(1, 1);
    assert_eq!(px[3], 255);
    assert!((i32::from(px[0]) - 90).abs() <= 1);
    std::fs::remove_file(&path).ok();
}

#[test]
fn missing_background_path_is_an_image_error() {
    let err = load_background(Path::new("/no/such/background.png"), 8).unwrap_err();
    assert!(matches!(err, CardError::Image(_)));
}

#[test]
fn overlay_keeps_canvas_opaque() {
    let mut canvas = Canvas::solid(2, 2, Rgb([255, 255, 255])).unwrap();
    canvas.overlay(Rgba([0, 0, 0, 96]));
    let rgb = canvas.into_rgb();
    assert_eq!(rgb.get_pixel(0, 0), &Rgb([159, 159, 159]));
}
