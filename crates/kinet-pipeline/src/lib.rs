//! Latest-wins frame-to-pose pipeline.
//!
//! Frames from an asynchronous producer pass through a single-capacity
//! overwrite-on-full slot into a single-flight drain loop, which converts
//! each frame to a float tensor and feeds a pose model. A slow consumer
//! never queues frames; it only skips to the newest one.

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod frame;
pub mod slot;
pub mod source;
pub mod tensorize;

pub use config::{ChannelOrder, CropPolicy, OUTPUT_CHANNELS, PatternConfig, TensorLayout, TensorSpec};
pub use dispatcher::{DispatcherStats, ErrorListener, FrameDispatcher, PoseSink};
pub use error::{CaptureError, ConfigError, PipelineError};
pub use frame::{AlphaMode, BYTES_PER_PIXEL, Frame, PixelFormat};
pub use slot::FrameSlot;
pub use source::{FrameSink, FrameSource, PatternSource, StillSource};
pub use tensorize::tensorize;
