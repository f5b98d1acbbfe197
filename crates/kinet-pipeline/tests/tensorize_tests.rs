use kinet_pipeline::{
    AlphaMode, ChannelOrder, ConfigError, CropPolicy, Frame, OUTPUT_CHANNELS, PixelFormat,
    TensorLayout, TensorSpec, tensorize,
};

/// Build a frame whose pixels are produced by `pixel(x, y) -> [b0..b3]`
/// in the given format's byte order.
fn frame_from(
    width: u32,
    height: u32,
    format: PixelFormat,
    pixel: impl Fn(u32, u32) -> [u8; 4],
) -> Frame {
    let mut data = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height {
        for x in 0..width {
            data.extend_from_slice(&pixel(x, y));
        }
    }
    Frame::new(0, width, height, format, AlphaMode::Premultiplied, data).unwrap()
}

fn spec_1x1() -> TensorSpec {
    TensorSpec::default()
        .with_target_width(1)
        .with_target_height(1)
        .with_crop(CropPolicy::None)
}

#[test]
fn test_bgra_pixel_reordered_to_rgb() {
    // B=10 G=20 R=30 A=255
    let frame = frame_from(1, 1, PixelFormat::Bgra8, |_, _| [10, 20, 30, 255]);
    let tensor = tensorize(&frame, &spec_1x1()).unwrap();

    assert_eq!(tensor.shape, vec![1, 1, 1, 3]);
    assert_eq!(tensor.data, vec![30.0, 20.0, 10.0]);
}

#[test]
fn test_bgra_pixel_normalized() {
    let frame = frame_from(1, 1, PixelFormat::Bgra8, |_, _| [10, 20, 30, 255]);
    let spec = spec_1x1().with_normalize(true);
    let tensor = tensorize(&frame, &spec).unwrap();

    assert_eq!(tensor.data, vec![30.0 / 255.0, 20.0 / 255.0, 10.0 / 255.0]);
}

#[test]
fn test_bgra_pixel_kept_as_bgr() {
    let frame = frame_from(1, 1, PixelFormat::Bgra8, |_, _| [10, 20, 30, 255]);
    let spec = spec_1x1().with_order(ChannelOrder::Bgr);
    let tensor = tensorize(&frame, &spec).unwrap();

    assert_eq!(tensor.data, vec![10.0, 20.0, 30.0]);
}

#[test]
fn test_rgba_source_reorders_correctly() {
    // Same colors, opposite source byte order
    let frame = frame_from(1, 1, PixelFormat::Rgba8, |_, _| [30, 20, 10, 255]);

    let rgb = tensorize(&frame, &spec_1x1()).unwrap();
    assert_eq!(rgb.data, vec![30.0, 20.0, 10.0]);

    let bgr = tensorize(&frame, &spec_1x1().with_order(ChannelOrder::Bgr)).unwrap();
    assert_eq!(bgr.data, vec![10.0, 20.0, 30.0]);
}

#[test]
fn test_alpha_byte_never_influences_output() {
    for layout in [TensorLayout::Interleaved, TensorLayout::Planar] {
        let spec = spec_1x1().with_layout(layout);
        let opaque = frame_from(1, 1, PixelFormat::Bgra8, |_, _| [1, 2, 3, 255]);
        let transparent = frame_from(1, 1, PixelFormat::Bgra8, |_, _| [1, 2, 3, 0]);

        let a = tensorize(&opaque, &spec).unwrap();
        let b = tensorize(&transparent, &spec).unwrap();
        assert_eq!(a.data, b.data);
        assert_eq!(a.data.len(), OUTPUT_CHANNELS);
    }
}

#[test]
fn test_straight_alpha_rejected() {
    let frame = Frame::new(
        0,
        1,
        1,
        PixelFormat::Bgra8,
        AlphaMode::Straight,
        vec![1, 2, 3, 4],
    )
    .unwrap();

    let result = tensorize(&frame, &spec_1x1());
    assert!(matches!(
        result,
        Err(ConfigError::UnsupportedAlpha(AlphaMode::Straight))
    ));
}

/// 10x10 source center-cropped to 6x6: offsets are (2, 2).
#[test]
fn test_center_crop_offsets() {
    // Unique red value per pixel: y*10 + x
    let frame = frame_from(10, 10, PixelFormat::Bgra8, |x, y| {
        [0, 0, (y * 10 + x) as u8, 255]
    });
    let spec = TensorSpec::default()
        .with_target_width(6)
        .with_target_height(6)
        .with_crop(CropPolicy::Center);

    let tensor = tensorize(&frame, &spec).unwrap();
    assert_eq!(tensor.shape, vec![1, 6, 6, 3]);
    assert_eq!(tensor.data.len(), 6 * 6 * 3);

    // Tensor (0,0) is source pixel (2,2); tensor (5,5) is source (7,7)
    assert_eq!(tensor.data[0], 22.0);
    assert_eq!(tensor.data[(5 * 6 + 5) * 3], 77.0);

    // Every output value comes from inside the crop window
    for row in 0..6u32 {
        for col in 0..6u32 {
            let red = tensor.data[((row * 6 + col) * 3) as usize];
            assert_eq!(red, ((row + 2) * 10 + (col + 2)) as f32);
        }
    }
}

#[test]
fn test_center_crop_equal_dims_is_identity() {
    let frame_a = frame_from(4, 4, PixelFormat::Bgra8, |x, y| {
        [x as u8, y as u8, (x + y) as u8, 255]
    });
    let frame_b = frame_from(4, 4, PixelFormat::Bgra8, |x, y| {
        [x as u8, y as u8, (x + y) as u8, 255]
    });

    let base = TensorSpec::default().with_target_width(4).with_target_height(4);
    let cropped = tensorize(&frame_a, &base.clone().with_crop(CropPolicy::Center)).unwrap();
    let uncropped = tensorize(&frame_b, &base.with_crop(CropPolicy::None)).unwrap();
    assert_eq!(cropped.data, uncropped.data);
}

#[test]
fn test_crop_target_exceeding_source_fails() {
    let frame = frame_from(4, 8, PixelFormat::Bgra8, |_, _| [0, 0, 0, 255]);
    let spec = TensorSpec::default()
        .with_target_width(6)
        .with_target_height(6)
        .with_crop(CropPolicy::Center);

    let result = tensorize(&frame, &spec);
    assert!(matches!(
        result,
        Err(ConfigError::CropExceedsFrame {
            frame: (4, 8),
            target: (6, 6)
        })
    ));
}

#[test]
fn test_size_mismatch_without_crop_fails() {
    let frame = frame_from(8, 8, PixelFormat::Bgra8, |_, _| [0, 0, 0, 255]);
    let spec = TensorSpec::default()
        .with_target_width(6)
        .with_target_height(6)
        .with_crop(CropPolicy::None);

    let result = tensorize(&frame, &spec);
    assert!(matches!(result, Err(ConfigError::SizeMismatch { .. })));
}

/// A unique value per pixel recovers unambiguously through both layout
/// index formulas, on a non-square frame.
#[test]
fn test_layout_indexing_recovers_pixels() {
    let (w, h) = (4u32, 2u32);
    // red = pixel number, green = 100 + pixel number
    let frame_value = |x: u32, y: u32| (y * w + x) as u8;
    let frame = frame_from(w, h, PixelFormat::Bgra8, |x, y| {
        [0, 100 + frame_value(x, y), frame_value(x, y), 255]
    });
    let base = TensorSpec::default()
        .with_target_width(w)
        .with_target_height(h)
        .with_crop(CropPolicy::None);

    let interleaved = tensorize(&frame, &base.clone()).unwrap();
    let planar = tensorize(&frame, &base.with_layout(TensorLayout::Planar)).unwrap();
    let (w, h) = (w as usize, h as usize);

    for row in 0..h {
        for col in 0..w {
            let value = (row * w + col) as f32;
            // channel 0 = red, channel 1 = green
            assert_eq!(interleaved.data[(row * w + col) * 3], value);
            assert_eq!(interleaved.data[(row * w + col) * 3 + 1], 100.0 + value);
            assert_eq!(planar.data[col * h + row], value);
            assert_eq!(planar.data[(w * h) + col * h + row], 100.0 + value);
        }
    }
}

/// The planar layout walks each plane column-by-column (width and height
/// swapped), which on non-square frames differs from row-major planes.
/// Model exporters that expect this ordering get it bit-for-bit.
#[test]
fn test_planar_layout_non_square_is_column_major() {
    let frame = frame_from(3, 2, PixelFormat::Bgra8, |x, y| {
        [0, 0, (y * 3 + x) as u8, 255]
    });
    let spec = TensorSpec::default()
        .with_target_width(3)
        .with_target_height(2)
        .with_crop(CropPolicy::None)
        .with_layout(TensorLayout::Planar);

    let tensor = tensorize(&frame, &spec).unwrap();

    // Red plane: columns (0,0),(0,1) then (1,0),(1,1) then (2,0),(2,1)
    assert_eq!(tensor.data[..6], [0.0, 3.0, 1.0, 4.0, 2.0, 5.0]);
    // Shape metadata still describes the logical image
    assert_eq!(tensor.shape, vec![1, 2, 3, 3]);
}

#[test]
fn test_center_crop_respects_window_under_planar_layout() {
    let frame = frame_from(10, 10, PixelFormat::Bgra8, |x, y| {
        [0, 0, (y * 10 + x) as u8, 255]
    });
    let spec = TensorSpec::default()
        .with_target_width(6)
        .with_target_height(6)
        .with_crop(CropPolicy::Center)
        .with_layout(TensorLayout::Planar);

    let tensor = tensorize(&frame, &spec).unwrap();

    for row in 0..6 {
        for col in 0..6 {
            let expected = ((row + 2) * 10 + (col + 2)) as f32;
            assert_eq!(tensor.data[col * 6 + row], expected);
        }
    }
}

#[test]
fn test_identical_inputs_yield_bit_identical_output() {
    let frame = frame_from(8, 6, PixelFormat::Rgba8, |x, y| {
        [x as u8, y as u8, (x * y) as u8, 200]
    });
    let spec = TensorSpec::default()
        .with_target_width(4)
        .with_target_height(4)
        .with_normalize(true);

    let a = tensorize(&frame, &spec).unwrap();
    let b = tensorize(&frame, &spec).unwrap();
    assert_eq!(a.data, b.data);
    assert_eq!(a.shape, b.shape);
}
