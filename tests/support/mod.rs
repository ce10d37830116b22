//! Shared fixtures for integration tests: synthesized skin atlases and an independent
//! reference renderer that follows the classic layer-then-warp pipeline.
#![allow(dead_code)]

use std::io::Cursor;

use image::{ImageFormat, Rgba, RgbaImage};

pub type Rect = (u32, u32, u32, u32);

/// Base-layer rectangles shared by both layouts, given the arm width.
pub fn base_rect(face: &str, w: u32) -> Option<Rect> {
    Some(match face {
        "head_top" => (8, 0, 8, 8),
        "head_front" => (8, 8, 8, 8),
        "head_right" => (0, 8, 8, 8),
        "arm_right_top" => (44, 16, w, 4),
        "arm_right_front" => (44, 20, w, 12),
        "arm_right_side" => (40, 20, 4, 12),
        "leg_right_front" => (4, 20, 4, 12),
        "leg_right_side" => (0, 20, 4, 12),
        "torso_front" => (20, 20, 8, 12),
        _ => return None,
    })
}

/// Dedicated left-side rectangles of the modern layout.
pub fn modern_left_rect(face: &str, w: u32) -> Option<Rect> {
    Some(match face {
        "arm_left_top" => (36, 48, w, 4),
        "arm_left_front" => (36, 52, w, 12),
        "leg_left_front" => (20, 52, 4, 12),
        _ => return None,
    })
}

pub fn overlay_rect(face: &str, w: u32) -> Rect {
    match face {
        "head_top" => (40, 0, 8, 8),
        "head_front" => (40, 8, 8, 8),
        "head_right" => (32, 8, 8, 8),
        "torso_front" => (20, 36, 8, 12),
        "arm_right_top" => (44, 32, w, 4),
        "arm_right_front" => (44, 36, w, 12),
        "arm_right_side" => (40, 36, 4, 12),
        "arm_left_top" => (52, 48, w, 4),
        "arm_left_front" => (52, 52, w, 12),
        "leg_right_front" => (4, 36, 4, 12),
        "leg_right_side" => (0, 36, 4, 12),
        "leg_left_front" => (4, 52, 4, 12),
        other => panic!("no overlay for {other}"),
    }
}

/// Overlay-detection rectangle of the body group a face belongs to.
pub fn overlay_group_rect(face: &str) -> Rect {
    if face.starts_with("head") {
        (32, 0, 32, 16)
    } else if face.starts_with("torso") {
        (16, 32, 24, 16)
    } else if face.starts_with("arm_right") {
        (40, 32, 16, 16)
    } else if face.starts_with("arm_left") {
        (48, 48, 16, 16)
    } else if face.starts_with("leg_right") {
        (0, 32, 16, 16)
    } else {
        (0, 48, 16, 16)
    }
}

pub const FACES: [&str; 12] = [
    "head_top",
    "head_front",
    "head_right",
    "arm_right_top",
    "arm_right_front",
    "arm_right_side",
    "arm_left_top",
    "arm_left_front",
    "leg_right_front",
    "leg_right_side",
    "leg_left_front",
    "torso_front",
];

#[derive(Clone, Copy, Debug)]
pub struct Fixture {
    pub name: &'static str,
    pub legacy: bool,
    pub slim: bool,
}

/// The three canonical reference atlases.
pub const FIXTURES: [Fixture; 3] = [
    Fixture {
        name: "legacy_wide",
        legacy: true,
        slim: false,
    },
    Fixture {
        name: "modern_wide",
        legacy: false,
        slim: false,
    },
    Fixture {
        name: "modern_slim",
        legacy: false,
        slim: true,
    },
];

fn fill(img: &mut RgbaImage, (x, y, w, h): Rect, seed: u32, alpha: impl Fn(u32, u32) -> u8) {
    for dy in 0..h {
        for dx in 0..w {
            let r = (seed * 37 + dx * 23) % 256;
            let g = (seed * 71 + dy * 19) % 256;
            let b = (seed * 13 + (dx ^ dy) * 29) % 256;
            img.put_pixel(
                x + dx,
                y + dy,
                Rgba([r as u8, g as u8, b as u8, alpha(dx, dy)]),
            );
        }
    }
}

/// A Steve-like atlas: every base face textured with a distinct opaque pattern; modern
/// fixtures also carry a hat band and a sleeve stripe on the overlay layer. Alpha is only
/// ever 0 or 255.
pub fn steve_like(fixture: Fixture) -> RgbaImage {
    let height = if fixture.legacy { 32 } else { 64 };
    let w = if fixture.slim { 3 } else { 4 };
    let mut img = RgbaImage::new(64, height);

    for (i, face) in FACES.iter().enumerate() {
        let seed = i as u32 + 1;
        if let Some(r) = base_rect(face, w) {
            fill(&mut img, r, seed, |_, _| 255);
        } else if !fixture.legacy
            && let Some(r) = modern_left_rect(face, w)
        {
            fill(&mut img, r, seed, |_, _| 255);
        }
    }

    if !fixture.legacy {
        for (i, face) in ["head_top", "head_front", "head_right"].iter().enumerate() {
            fill(&mut img, overlay_rect(face, w), 50 + i as u32, |_, dy| {
                if dy < 3 { 255 } else { 0 }
            });
        }
        fill(&mut img, overlay_rect("arm_right_front", w), 60, |dx, _| {
            if dx == 0 { 255 } else { 0 }
        });
    }
    img
}

pub fn encode_png(img: &RgbaImage) -> Vec<u8> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .unwrap();
    buf
}

fn crop(img: &RgbaImage, (x, y, w, h): Rect) -> RgbaImage {
    RgbaImage::from_fn(w, h, |dx, dy| *img.get_pixel(x + dx, y + dy))
}

fn upscale(img: &RgbaImage, s: u32) -> RgbaImage {
    RgbaImage::from_fn(img.width() * s, img.height() * s, |x, y| {
        *img.get_pixel(x / s, y / s)
    })
}

fn flip(img: &RgbaImage) -> RgbaImage {
    let w = img.width();
    RgbaImage::from_fn(w, img.height(), |x, y| *img.get_pixel(w - 1 - x, y))
}

/// Paste with binary alpha: transparent pixels keep what is underneath.
fn paste(dst: &mut RgbaImage, src: &RgbaImage, ox: i64, oy: i64) {
    for (x, y, px) in src.enumerate_pixels() {
        let (cx, cy) = (ox + i64::from(x), oy + i64::from(y));
        if px.0[3] == 0
            || cx < 0
            || cy < 0
            || cx >= i64::from(dst.width())
            || cy >= i64::from(dst.height())
        {
            continue;
        }
        dst.put_pixel(cx as u32, cy as u32, *px);
    }
}

/// Reference sampling of one face, straight from the atlas coordinates.
pub fn reference_part(atlas: &RgbaImage, face: &str, slim: bool, s: u32) -> RgbaImage {
    let w = if slim { 3 } else { 4 };
    let legacy = atlas.height() == 32;
    let base = match base_rect(face, w) {
        Some(r) => upscale(&crop(atlas, r), s),
        None if legacy => {
            let right = face.replace("left", "right");
            flip(&reference_part(atlas, &right, slim, s))
        }
        None => upscale(
            &crop(
                atlas,
                modern_left_rect(face, w).expect("every face has a rectangle"),
            ),
            s,
        ),
    };
    if legacy {
        return base;
    }

    let (gx, gy, gw, gh) = overlay_group_rect(face);
    let min_alpha = (gy..gy + gh)
        .flat_map(|y| (gx..gx + gw).map(move |x| (x, y)))
        .map(|(x, y)| atlas.get_pixel(x, y).0[3])
        .min()
        .unwrap();
    let mut out = base;
    if min_alpha < 255 {
        let overlay = upscale(&crop(atlas, overlay_rect(face, w)), s);
        paste(&mut out, &overlay, 0, 0);
    }
    out
}

/// PIL-style affine warp: output pixel centre -> source via `(a, b, c, d, e, f)`, floored.
fn warp(layer: &RgbaImage, out_w: u32, out_h: u32, m: [f64; 6]) -> RgbaImage {
    RgbaImage::from_fn(out_w, out_h, |x, y| {
        let (xc, yc) = (f64::from(x) + 0.5, f64::from(y) + 0.5);
        let sx = (m[0] * xc + m[1] * yc + m[2]).floor();
        let sy = (m[3] * xc + m[4] * yc + m[5]).floor();
        if sx < 0.0 || sy < 0.0 || sx >= f64::from(layer.width()) || sy >= f64::from(layer.height())
        {
            Rgba([0, 0, 0, 0])
        } else {
            *layer.get_pixel(sx as u32, sy as u32)
        }
    })
}

/// Classic full-body render: lay out whole axis layers, warp each layer, paste the layers.
pub fn reference_full_body(atlas: &RgbaImage, slim: bool, s: u32) -> RgbaImage {
    let w = if slim { 3 } else { 4 };
    let (si, wi) = (i64::from(s), i64::from(w));
    let (cw, ch) = (20 * s, 45 * s);
    let k = 45.0 / 52.0;
    let part = |face: &str| reference_part(atlas, face, slim, s);

    let lift = i64::from(135 * s / 2);
    let mut top = RgbaImage::new(cw * 4, ch * 4);
    paste(&mut top, &part("arm_right_top"), (19 - wi) * si, 15 * si + lift);
    paste(&mut top, &part("arm_left_top"), 27 * si, 15 * si + lift);
    paste(&mut top, &part("head_top"), 27 * si, 5 * si + lift);

    let mut right = RgbaImage::new(cw, ch);
    paste(&mut right, &part("leg_right_side"), 4 * si, 23 * si);
    paste(&mut right, &part("arm_right_side"), (4 - wi) * si, (11 + wi) * si);

    let mut front = RgbaImage::new(cw, ch);
    paste(&mut front, &part("arm_right_front"), (8 - wi) * si, 19 * si);
    paste(&mut front, &part("arm_left_front"), 16 * si, 19 * si);
    paste(&mut front, &part("torso_front"), 8 * si, 19 * si);
    paste(&mut front, &part("leg_right_front"), 8 * si, 31 * si);
    paste(&mut front, &part("leg_left_front"), 12 * si, 31 * si);
    paste(&mut front, &part("head_front"), 10 * si, 13 * si);

    let mut head_right = RgbaImage::new(cw, ch);
    paste(&mut head_right, &part("head_right"), 2 * si, 3 * si);

    // The top map carries the translation that makes `top(x, y, z)` meet `front(x, y, z)`.
    let shift_x = -((30 * si + lift) as f64);
    let shift_y = ((30 * si - lift) as f64 + 1.0) / (2.0 * k);
    let top_map = [
        0.5,
        -k,
        -0.5 * shift_x + k * shift_y,
        0.5,
        k,
        -0.5 * shift_x - k * shift_y,
    ];
    let right_map = [1.0, 0.0, 0.0, -0.5, k, -0.5];
    let mut canvas = RgbaImage::new(cw, ch);
    paste(&mut canvas, &warp(&top, cw, ch, top_map), 0, 0);
    paste(&mut canvas, &warp(&right, cw, ch, right_map), 0, 0);
    paste(
        &mut canvas,
        &warp(&front, cw, ch, [1.0, 0.0, 0.0, 0.5, k, -0.5]),
        0,
        0,
    );
    paste(&mut canvas, &warp(&head_right, cw, ch, right_map), 0, 0);
    canvas
}
