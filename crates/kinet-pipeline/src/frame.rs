use crate::error::ConfigError;

/// Byte order of the four 8-bit channels within one pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// Blue, green, red, alpha.
    Bgra8,
    /// Red, green, blue, alpha.
    Rgba8,
}

impl PixelFormat {
    /// Byte offsets of (red, green, blue) within one 4-byte pixel.
    pub(crate) fn rgb_offsets(self) -> (usize, usize, usize) {
        match self {
            PixelFormat::Bgra8 => (2, 1, 0),
            PixelFormat::Rgba8 => (0, 1, 2),
        }
    }
}

/// Whether color channels are pre-scaled by alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlphaMode {
    Premultiplied,
    Straight,
}

pub const BYTES_PER_PIXEL: usize = 4;

/// One captured image: an owned pixel buffer plus format metadata.
///
/// Deliberately not `Clone`: a frame has exactly one owner at any instant,
/// moves through the pipeline (producer, slot, drain loop), and its buffer
/// is released exactly once, by drop.
pub struct Frame {
    id: u64,
    width: u32,
    height: u32,
    format: PixelFormat,
    alpha: AlphaMode,
    data: Vec<u8>,
}

impl std::fmt::Debug for Frame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Frame")
            .field("id", &self.id)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("format", &self.format)
            .field("alpha", &self.alpha)
            .field("bytes", &self.data.len())
            .finish()
    }
}

impl Frame {
    /// Create a frame, validating that the buffer holds exactly
    /// `width * height` 4-byte pixels.
    ///
    /// `id` is producer-assigned and only used for logging and telling
    /// frames apart; the pipeline assigns it no other meaning.
    pub fn new(
        id: u64,
        width: u32,
        height: u32,
        format: PixelFormat,
        alpha: AlphaMode,
        data: Vec<u8>,
    ) -> Result<Self, ConfigError> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|pixels| pixels.checked_mul(BYTES_PER_PIXEL));
        if expected != Some(data.len()) {
            return Err(ConfigError::BufferSize {
                width,
                height,
                got: data.len(),
            });
        }
        Ok(Self {
            id,
            width,
            height,
            format,
            alpha,
            data,
        })
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn alpha(&self) -> AlphaMode {
        self.alpha
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }
}
