use kinet_pipeline::{AlphaMode, ConfigError, Frame, PixelFormat};

#[test]
fn test_frame_new_valid() {
    let frame = Frame::new(
        7,
        2,
        2,
        PixelFormat::Bgra8,
        AlphaMode::Premultiplied,
        vec![0; 16],
    )
    .unwrap();

    assert_eq!(frame.id(), 7);
    assert_eq!(frame.width(), 2);
    assert_eq!(frame.height(), 2);
    assert_eq!(frame.format(), PixelFormat::Bgra8);
    assert_eq!(frame.alpha(), AlphaMode::Premultiplied);
    assert_eq!(frame.data().len(), 16);
}

#[test]
fn test_frame_rejects_short_buffer() {
    let result = Frame::new(
        0,
        2,
        2,
        PixelFormat::Bgra8,
        AlphaMode::Premultiplied,
        vec![0; 15],
    );
    assert!(matches!(
        result,
        Err(ConfigError::BufferSize {
            width: 2,
            height: 2,
            got: 15
        })
    ));
}

#[test]
fn test_frame_rejects_long_buffer() {
    let result = Frame::new(
        0,
        1,
        1,
        PixelFormat::Rgba8,
        AlphaMode::Premultiplied,
        vec![0; 8],
    );
    assert!(matches!(result, Err(ConfigError::BufferSize { .. })));
}

#[test]
fn test_frame_rejects_overflowing_dimensions() {
    // width * height * 4 overflows usize; cannot match any real buffer
    let result = Frame::new(
        0,
        u32::MAX,
        u32::MAX,
        PixelFormat::Bgra8,
        AlphaMode::Premultiplied,
        vec![],
    );
    assert!(matches!(result, Err(ConfigError::BufferSize { .. })));
}

#[test]
fn test_frame_debug_reports_byte_count_not_contents() {
    let frame = Frame::new(
        1,
        1,
        1,
        PixelFormat::Rgba8,
        AlphaMode::Premultiplied,
        vec![9, 9, 9, 9],
    )
    .unwrap();

    let printed = format!("{frame:?}");
    assert!(printed.contains("bytes: 4"));
    assert!(!printed.contains("[9"));
}
