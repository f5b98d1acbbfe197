use crate::config::{ChannelOrder, CropPolicy, OUTPUT_CHANNELS, TensorLayout, TensorSpec};
use crate::error::ConfigError;
use crate::frame::{AlphaMode, BYTES_PER_PIXEL, Frame, PixelFormat};
use kinet_base::Tensor;

/// Top-left corner of the source window a conversion reads.
struct CropWindow {
    off_x: usize,
    off_y: usize,
}

/// Resolve the crop policy against the actual frame dimensions.
fn crop_window(frame: &Frame, spec: &TensorSpec) -> Result<CropWindow, ConfigError> {
    let (width, height) = (frame.width(), frame.height());
    let (target_w, target_h) = (spec.target_width(), spec.target_height());

    match spec.crop() {
        CropPolicy::Center => {
            if target_w > width || target_h > height {
                return Err(ConfigError::CropExceedsFrame {
                    frame: (width, height),
                    target: (target_w, target_h),
                });
            }
            Ok(CropWindow {
                off_x: ((width - target_w) / 2) as usize,
                off_y: ((height - target_h) / 2) as usize,
            })
        }
        CropPolicy::None => {
            if (width, height) != (target_w, target_h) {
                return Err(ConfigError::SizeMismatch {
                    frame: (width, height),
                    target: (target_w, target_h),
                });
            }
            Ok(CropWindow { off_x: 0, off_y: 0 })
        }
    }
}

/// Byte offset within one source pixel for each output channel.
fn source_offsets(format: PixelFormat, order: ChannelOrder) -> [usize; 3] {
    let (r, g, b) = format.rgb_offsets();
    match order {
        ChannelOrder::Rgb => [r, g, b],
        ChannelOrder::Bgr => [b, g, r],
    }
}

/// Flat output index of one (row, col, channel) under the given layout.
fn output_index(
    layout: TensorLayout,
    row: usize,
    col: usize,
    channel: usize,
    target_w: usize,
    target_h: usize,
) -> usize {
    match layout {
        TensorLayout::Interleaved => (row * target_w + col) * OUTPUT_CHANNELS + channel,
        TensorLayout::Planar => channel * (target_w * target_h) + col * target_h + row,
    }
}

/// Convert one frame into a float tensor according to `spec`.
///
/// Pure and deterministic: reads only pixels inside the crop window, always
/// drops the alpha byte, touches no shared state, and is safe to call from
/// any thread. Identical inputs produce bit-identical output.
pub fn tensorize(frame: &Frame, spec: &TensorSpec) -> Result<Tensor<f32>, ConfigError> {
    if frame.alpha() != AlphaMode::Premultiplied {
        return Err(ConfigError::UnsupportedAlpha(frame.alpha()));
    }

    let window = crop_window(frame, spec)?;
    let target_w = spec.target_width() as usize;
    let target_h = spec.target_height() as usize;
    let offsets = source_offsets(frame.format(), spec.order());
    let layout = spec.layout();
    let normalize = spec.normalize();

    let src = frame.data();
    let src_width = frame.width() as usize;
    let mut out = Tensor::<f32>::zeros(spec.tensor_shape().to_vec())?;

    for row in 0..target_h {
        let src_row = (window.off_y + row) * src_width + window.off_x;
        for col in 0..target_w {
            let pixel = (src_row + col) * BYTES_PER_PIXEL;
            for (channel, &offset) in offsets.iter().enumerate() {
                let raw = f32::from(src[pixel + offset]);
                let value = if normalize { raw / 255.0 } else { raw };
                out.data[output_index(layout, row, col, channel, target_w, target_h)] = value;
            }
        }
    }

    Ok(out)
}
