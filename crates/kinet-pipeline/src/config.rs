use crate::frame::PixelFormat;

/// Channels per output pixel; the alpha byte is always dropped.
pub const OUTPUT_CHANNELS: usize = 3;

/// Output channel order, chosen independently of the source byte order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelOrder {
    Rgb,
    Bgr,
}

/// Flat memory layout of the output tensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TensorLayout {
    /// Pixel-major: index = `(row * width + col) * 3 + channel`.
    Interleaved,
    /// Channel-planar with column-major planes:
    /// index = `channel * (width * height) + col * height + row`.
    ///
    /// Width and height are swapped relative to `Interleaved`. Some model
    /// exporters expect exactly this ordering, so it is reproduced
    /// bit-for-bit, including on non-square windows where it differs from
    /// row-major channel-planar.
    Planar,
}

/// How to reconcile frame dimensions with the target dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CropPolicy {
    /// Frame dimensions must already equal the target dimensions.
    None,
    /// Read a centered target-sized window; offsets are
    /// `floor((source - target) / 2)` per axis.
    Center,
}

/// Parameters of one frame-to-tensor conversion.
///
/// Defaults match a 192x192 RGB interleaved pose input with center crop
/// and raw 0..255 values.
#[derive(Debug, Clone, PartialEq)]
pub struct TensorSpec {
    target_width: u32,
    target_height: u32,
    order: ChannelOrder,
    layout: TensorLayout,
    normalize: bool,
    crop: CropPolicy,
}

impl Default for TensorSpec {
    fn default() -> Self {
        Self {
            target_width: 192,
            target_height: 192,
            order: ChannelOrder::Rgb,
            layout: TensorLayout::Interleaved,
            normalize: false,
            crop: CropPolicy::Center,
        }
    }
}

impl TensorSpec {
    pub fn with_target_width(mut self, target_width: u32) -> Self {
        self.target_width = target_width;
        self
    }

    pub fn with_target_height(mut self, target_height: u32) -> Self {
        self.target_height = target_height;
        self
    }

    pub fn with_order(mut self, order: ChannelOrder) -> Self {
        self.order = order;
        self
    }

    pub fn with_layout(mut self, layout: TensorLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Scale each byte by 1/255 into [0, 1] instead of keeping raw 0..255.
    pub fn with_normalize(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }

    pub fn with_crop(mut self, crop: CropPolicy) -> Self {
        self.crop = crop;
        self
    }

    // Getters
    pub fn target_width(&self) -> u32 {
        self.target_width
    }

    pub fn target_height(&self) -> u32 {
        self.target_height
    }

    pub fn order(&self) -> ChannelOrder {
        self.order
    }

    pub fn layout(&self) -> TensorLayout {
        self.layout
    }

    pub fn normalize(&self) -> bool {
        self.normalize
    }

    pub fn crop(&self) -> CropPolicy {
        self.crop
    }

    /// Shape of the produced tensor, `[batch, height, width, channels]`.
    ///
    /// The shape describes the logical image for both layouts; with
    /// [`TensorLayout::Planar`] only the flat element order differs.
    pub fn tensor_shape(&self) -> [usize; 4] {
        [
            1,
            self.target_height as usize,
            self.target_width as usize,
            OUTPUT_CHANNELS,
        ]
    }
}

/// Configuration for the synthetic pattern source.
#[derive(Clone, Debug)]
pub struct PatternConfig {
    width: u32,
    height: u32,
    fps: u32,
    format: PixelFormat,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            width: 320,
            height: 240,
            fps: 30,
            format: PixelFormat::Bgra8,
        }
    }
}

impl PatternConfig {
    /// Set the frame width in pixels.
    pub fn with_width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }

    /// Set the frame height in pixels.
    pub fn with_height(mut self, height: u32) -> Self {
        self.height = height;
        self
    }

    /// Set the frames per second.
    pub fn with_fps(mut self, fps: u32) -> Self {
        self.fps = fps;
        self
    }

    /// Set the pixel byte order of generated frames.
    pub fn with_format(mut self, format: PixelFormat) -> Self {
        self.format = format;
        self
    }

    // Getters
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }
}
