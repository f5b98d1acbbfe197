use crate::frame::AlphaMode;
use kinet_base::TensorError;
use kinet_infer::InferError;
use std::fmt;

/// A frame or conversion setup the pipeline refuses to process.
///
/// Raised immediately instead of guessing: format normalization and
/// resizing are the producer's responsibility.
#[derive(Debug)]
pub enum ConfigError {
    /// Pixel buffer length does not match the frame dimensions.
    BufferSize { width: u32, height: u32, got: usize },
    /// The tensorizer only accepts premultiplied alpha.
    UnsupportedAlpha(AlphaMode),
    /// Crop target is larger than the source frame.
    CropExceedsFrame { frame: (u32, u32), target: (u32, u32) },
    /// No crop requested but frame and target dimensions differ.
    SizeMismatch { frame: (u32, u32), target: (u32, u32) },
    /// The conversion produces a different shape than the model declares.
    ModelShape { model: [usize; 4], produced: [usize; 4] },
    /// Output tensor allocation failed.
    Tensor(TensorError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::BufferSize { width, height, got } => write!(
                f,
                "pixel buffer length {got} does not match {width}x{height} at 4 bytes/pixel"
            ),
            ConfigError::UnsupportedAlpha(mode) => {
                write!(f, "unsupported alpha mode {mode:?}: input must be premultiplied")
            }
            ConfigError::CropExceedsFrame { frame, target } => write!(
                f,
                "crop target {}x{} exceeds source frame {}x{}",
                target.0, target.1, frame.0, frame.1
            ),
            ConfigError::SizeMismatch { frame, target } => write!(
                f,
                "frame is {}x{} but target is {}x{} and no crop was requested",
                frame.0, frame.1, target.0, target.1
            ),
            ConfigError::ModelShape { model, produced } => write!(
                f,
                "conversion produces shape {produced:?} but the model expects {model:?}"
            ),
            ConfigError::Tensor(e) => write!(f, "tensor allocation failed: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<TensorError> for ConfigError {
    fn from(e: TensorError) -> Self {
        ConfigError::Tensor(e)
    }
}

/// Frame source failure; stops production and surfaces to the `start` caller.
#[derive(Debug)]
pub enum CaptureError {
    Device(String),
}

impl fmt::Display for CaptureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureError::Device(msg) => write!(f, "device error: {msg}"),
        }
    }
}

impl std::error::Error for CaptureError {}

/// Per-frame fault reported on the dispatcher's error channel.
///
/// Fatal to the frame that triggered it, never to the pipeline; the drain
/// loop continues with the next available frame.
#[derive(Debug)]
pub enum PipelineError {
    Config(ConfigError),
    Inference(InferError),
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::Config(e) => write!(f, "frame rejected: {e}"),
            PipelineError::Inference(e) => write!(f, "frame inference failed: {e}"),
        }
    }
}

impl std::error::Error for PipelineError {}

impl From<ConfigError> for PipelineError {
    fn from(e: ConfigError) -> Self {
        PipelineError::Config(e)
    }
}

impl From<InferError> for PipelineError {
    fn from(e: InferError) -> Self {
        PipelineError::Inference(e)
    }
}
