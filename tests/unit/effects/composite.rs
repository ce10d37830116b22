use image::Rgba;

use super::*;

#[test]
fn over_src_alpha_0_is_noop() {
    let dst = [10, 20, 30, 40];
    let src = [255, 255, 255, 0];
    assert_eq!(over(dst, src), dst);
}

#[test]
fn over_src_opaque_replaces_dst() {
    let dst = [0, 0, 0, 255];
    let src = [255, 0, 0, 255];
    assert_eq!(over(dst, src), src);
}

#[test]
fn over_dst_transparent_returns_src() {
    let dst = [0, 0, 0, 0];
    for src in [[100, 110, 120, 200], [1, 2, 3, 1], [255, 255, 255, 128]] {
        assert_eq!(over(dst, src), src);
    }
}

#[test]
fn over_half_alpha_on_opaque_blends_evenly() {
    let out = over([0, 0, 0, 255], [255, 255, 255, 128]);
    assert_eq!(out[3], 255);
    assert!((127..=129).contains(&out[0]));
    assert_eq!(out[0], out[1]);
    assert_eq!(out[1], out[2]);
}

#[test]
fn over_at_clips_negative_and_overflowing_offsets() {
    let mut dst = RgbaImage::new(4, 4);
    let src = RgbaImage::from_pixel(3, 3, Rgba([9, 8, 7, 255]));

    over_at(&mut dst, &src, Offset::new(-2, 2));
    let painted: Vec<(u32, u32)> = dst
        .enumerate_pixels()
        .filter(|(_, _, p)| p.0[3] != 0)
        .map(|(x, y, _)| (x, y))
        .collect();
    assert_eq!(painted, vec![(0, 2), (0, 3)]);

    over_at(&mut dst, &src, Offset::new(10, 10));
    over_at(&mut dst, &src, Offset::new(-3, 0));
    assert_eq!(dst.pixels().filter(|p| p.0[3] != 0).count(), 2);
}

#[test]
fn over_at_keeps_dst_under_transparent_pixels() {
    let mut dst = RgbaImage::from_pixel(2, 1, Rgba([50, 50, 50, 255]));
    let mut src = RgbaImage::new(2, 1);
    src.put_pixel(1, 0, Rgba([200, 0, 0, 255]));

    over_at(&mut dst, &src, Offset::ZERO);
    assert_eq!(dst.get_pixel(0, 0).0, [50, 50, 50, 255]);
    assert_eq!(dst.get_pixel(1, 0).0, [200, 0, 0, 255]);
}
