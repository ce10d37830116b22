use std::io::Cursor;

use image::{ImageFormat, Rgba, RgbaImage};

use super::*;

fn png(width: u32, height: u32, px: [u8; 4]) -> Vec<u8> {
    let mut buf = Vec::new();
    RgbaImage::from_pixel(width, height, Rgba(px))
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .unwrap();
    buf
}

fn job(id: &str, bytes: Vec<u8>, mode: RenderMode) -> BatchJob {
    BatchJob {
        id: id.to_string(),
        bytes,
        slim: false,
        overlay: OverlayHint::Auto,
        mode,
        scale: 2,
    }
}

#[test]
fn batch_preserves_order_and_isolates_failures() {
    let jobs = vec![
        job("a", png(64, 64, [10, 20, 30, 255]), RenderMode::Bust),
        job("bad", png(16, 16, [0, 0, 0, 255]), RenderMode::Bust),
        job("c", png(64, 32, [40, 50, 60, 255]), RenderMode::FullBody),
    ];
    let out = render_batch(&jobs, &BatchOpts { threads: Some(2) }).unwrap();

    let ids: Vec<&str> = out.iter().map(|o| o.id.as_str()).collect();
    assert_eq!(ids, ["a", "bad", "c"]);
    assert_eq!(out[0].result.as_ref().unwrap().image.dimensions(), (16, 16));
    assert!(matches!(
        out[1].result,
        Err(IsoskinError::InvalidDimensions { .. })
    ));
    assert_eq!(out[2].result.as_ref().unwrap().image.dimensions(), (40, 90));

    let stats = BatchStats::from_outputs(&out);
    assert_eq!(
        stats,
        BatchStats {
            jobs: 3,
            rendered: 2,
            failed: 1
        }
    );
}

#[test]
fn parallel_batch_matches_sequential_renders() {
    let jobs: Vec<BatchJob> = (0..6u8)
        .map(|i| {
            job(
                &format!("j{i}"),
                png(64, 64, [i * 40, 255 - i * 30, 7, 255]),
                RenderMode::FullBody,
            )
        })
        .collect();
    let out = render_batch(&jobs, &BatchOpts::default()).unwrap();
    for (j, o) in jobs.iter().zip(&out) {
        let expected = render_skin(&j.bytes, j.slim, j.overlay, j.mode, j.scale).unwrap();
        assert_eq!(o.result.as_ref().unwrap(), &expected);
    }
}

#[test]
fn zero_threads_is_rejected() {
    assert!(matches!(
        render_batch(&[], &BatchOpts { threads: Some(0) }),
        Err(IsoskinError::Validation(_))
    ));
}
