use std::time::Duration;

use zoompan::{CameraParams, Frame, PixelFormat, TransformEngine};

fn fill_pattern(frame: &mut Frame) {
    let mut seed = 0x9E37u16;
    let mut view = frame.as_mut();
    for (i, b) in view.data().iter_mut().enumerate() {
        seed = seed.wrapping_mul(31).wrapping_add(i as u16);
        *b = (seed >> 7) as u8;
    }
}

fn rgba_gradient(w: usize, h: usize) -> Frame {
    let mut data = Vec::with_capacity(w * h * 4);
    for y in 0..h {
        for x in 0..w {
            data.extend_from_slice(&[x as u8, y as u8, (x ^ y) as u8, 0xFF]);
        }
    }
    Frame::from_vec(PixelFormat::Rgba, w, h, data).unwrap()
}

#[test]
fn unit_zoom_same_size_is_bit_identical() {
    for fmt in [PixelFormat::Ayuv, PixelFormat::Rgba, PixelFormat::I420] {
        let mut src = Frame::new(fmt, 64, 64).unwrap();
        fill_pattern(&mut src);
        let mut dst = Frame::new(fmt, 64, 64).unwrap();

        let engine = TransformEngine::new(CameraParams::default()).unwrap();
        engine
            .transform(src.as_ref(), &mut dst.as_mut(), Duration::ZERO)
            .unwrap();
        assert_eq!(src.data(), dst.data(), "{fmt:?} not identity");
    }
}

#[test]
fn half_zpos_downscale_reads_center_crop() {
    // 100x100 -> 50x50 with zpos=0.5: the visible region is the center
    // 50x50 and the source step per destination pixel is exactly 1.
    let src = rgba_gradient(100, 100);
    let mut dst = Frame::new(PixelFormat::Rgba, 50, 50).unwrap();
    let engine = TransformEngine::new(CameraParams {
        zpos: 0.5,
        ..CameraParams::default()
    })
    .unwrap();
    engine
        .transform(src.as_ref(), &mut dst.as_mut(), Duration::ZERO)
        .unwrap();

    for y in 0..50usize {
        for x in 0..50usize {
            let d = &dst.data()[(x + y * 50) * 4..][..4];
            let (sx, sy) = (x + 25, y + 25);
            let s = &src.data()[(sx + sy * 100) * 4..][..4];
            assert_eq!(d, s, "mismatch at ({x}, {y})");
        }
    }
}

#[test]
fn offscreen_pan_fills_ayuv_with_converted_background() {
    // Fully transparent black background; pan far enough that every pixel
    // misses the source.
    let mut src = Frame::new(PixelFormat::Ayuv, 32, 32).unwrap();
    fill_pattern(&mut src);
    let mut dst = Frame::new(PixelFormat::Ayuv, 32, 32).unwrap();
    let engine = TransformEngine::new(CameraParams {
        xpos: 10.0,
        bgcolor: 0x0000_0000,
        ..CameraParams::default()
    })
    .unwrap();
    engine
        .transform(src.as_ref(), &mut dst.as_mut(), Duration::ZERO)
        .unwrap();

    for px in dst.data().chunks_exact(4) {
        assert_eq!(px, &[0x00, 0x00, 0x80, 0x80], "A,Y,U,V of converted black");
    }
}

#[test]
fn border_band_is_background_regardless_of_projection() {
    let src = rgba_gradient(16, 16);
    let mut dst = Frame::new(PixelFormat::Rgba, 16, 16).unwrap();
    let engine = TransformEngine::new(CameraParams {
        border: 2,
        bgcolor: 0xFF00_FF00, // opaque green
        ..CameraParams::default()
    })
    .unwrap();
    engine
        .transform(src.as_ref(), &mut dst.as_mut(), Duration::ZERO)
        .unwrap();

    let bg = [0x00, 0xFF, 0x00, 0xFF]; // R,G,B,A in RGBA bytes
    for y in 0..16usize {
        for x in 0..16usize {
            let d = &dst.data()[(x + y * 16) * 4..][..4];
            let in_border = x < 2 || x >= 14 || y < 2 || y >= 14;
            if in_border {
                assert_eq!(d, &bg, "border pixel ({x}, {y})");
            } else {
                let s = &src.data()[(x + y * 16) * 4..][..4];
                assert_eq!(d, s, "interior pixel ({x}, {y})");
            }
        }
    }
}

#[test]
fn packed_reorder_resize_keeps_channel_semantics() {
    // RGBA source to BGRA destination at identity geometry: same colors,
    // swapped byte order.
    let src = rgba_gradient(8, 8);
    let mut dst = Frame::new(PixelFormat::Bgra, 8, 8).unwrap();
    let engine = TransformEngine::new(CameraParams::default()).unwrap();
    engine
        .transform(src.as_ref(), &mut dst.as_mut(), Duration::ZERO)
        .unwrap();

    for i in 0..64usize {
        let s = &src.data()[i * 4..][..4];
        let d = &dst.data()[i * 4..][..4];
        assert_eq!([d[2], d[1], d[0], d[3]], [s[0], s[1], s[2], s[3]]);
    }
}

#[test]
fn full_turn_rotation_matches_unrotated_output() {
    // 360-degree z-rotation is numerically the general path but visually the
    // identity; floored coordinates must agree with the fast path everywhere
    // except possibly pixels that miss.
    let src = rgba_gradient(32, 32);
    let engine_flat = TransformEngine::new(CameraParams::default()).unwrap();
    let engine_turned = TransformEngine::new(CameraParams {
        zrot: 360.0,
        ..CameraParams::default()
    })
    .unwrap();

    let mut flat = Frame::new(PixelFormat::Rgba, 32, 32).unwrap();
    let mut turned = Frame::new(PixelFormat::Rgba, 32, 32).unwrap();
    engine_flat
        .transform(src.as_ref(), &mut flat.as_mut(), Duration::ZERO)
        .unwrap();
    engine_turned
        .transform(src.as_ref(), &mut turned.as_mut(), Duration::ZERO)
        .unwrap();

    let mut diff = 0usize;
    for (a, b) in flat.data().chunks_exact(4).zip(turned.data().chunks_exact(4)) {
        if a != b {
            diff += 1;
        }
    }
    // sin/cos of 2*pi are not exactly 0/1; allow a sliver of edge pixels.
    assert!(diff <= 32 * 4, "{diff} pixels differ after a full turn");
}
