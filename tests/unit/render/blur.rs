use super::*;

#[test]
fn radius_0_is_identity() {
    let src = vec![1u8, 2, 3, 4, 5, 6];
    assert_eq!(gaussian_blur(&src, 1, 2, 3, 0, 1.0).unwrap(), src);
}

#[test]
fn constant_image_is_unchanged() {
    let (w, h) = (4u32, 3u32);
    let src = [10u8, 20, 30].repeat((w * h) as usize);
    assert_eq!(gaussian_blur(&src, w, h, 3, 3, 2.0).unwrap(), src);
}

#[test]
fn single_pixel_spreads_and_keeps_energy() {
    let (w, h) = (5u32, 5u32);
    let mut src = vec![0u8; (w * h) as usize];
    src[(2 * w + 2) as usize] = 255;

    let out = gaussian_blur(&src, w, h, 1, 2, 1.2).unwrap();
    assert!(out.iter().filter(|&&v| v != 0).count() > 1);
    let sum: i32 = out.iter().map(|&v| i32::from(v)).sum();
    assert!((sum - 255).abs() <= 4);
}

#[test]
fn mismatched_buffer_is_rejected() {
    assert!(gaussian_blur(&[0u8; 5], 2, 1, 3, 1, 1.0).is_err());
    assert!(gaussian_blur(&[0u8; 6], 2, 1, 3, 1, 0.0).is_err());
}

#[test]
fn kernel_params_follow_nominal_radius() {
    assert_eq!(kernel_params(16.5), (17, 8.25));
    assert_eq!(kernel_params(0.0), (0, 0.0));
}
