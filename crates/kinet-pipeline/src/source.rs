use crate::config::PatternConfig;
use crate::error::{CaptureError, ConfigError};
use crate::frame::{AlphaMode, BYTES_PER_PIXEL, Frame, PixelFormat};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Receives frames from a producer. Implemented by the dispatcher.
pub trait FrameSink: Send + Sync {
    /// Accept one frame. Must not block on downstream processing.
    fn deliver(&self, frame: Frame);
}

/// An asynchronous producer of frames.
///
/// Implementations deliver every captured frame into the sink passed to
/// `start` until `stop` is called. Conversion to the canonical pixel format
/// (4 bytes/pixel, premultiplied alpha) is the backend's responsibility;
/// the pipeline rejects anything else per frame.
#[allow(async_fn_in_trait)]
pub trait FrameSource {
    /// Begin producing frames into `sink`.
    async fn start(&mut self, sink: Arc<dyn FrameSink>) -> Result<(), CaptureError>;

    /// Halt production and release capture resources.
    ///
    /// Cooperative: a frame already in the pipeline still finishes
    /// processing; no new frames arrive afterwards.
    async fn stop(&mut self) -> Result<(), CaptureError>;
}

/// Debug source holding one prepared image.
///
/// `start` delivers the frame exactly once; there is nothing to repeat and
/// a second `start` fails.
pub struct StillSource {
    frame: Option<Frame>,
}

impl StillSource {
    pub fn new(frame: Frame) -> Self {
        Self { frame: Some(frame) }
    }
}

impl FrameSource for StillSource {
    async fn start(&mut self, sink: Arc<dyn FrameSink>) -> Result<(), CaptureError> {
        let frame = self
            .frame
            .take()
            .ok_or_else(|| CaptureError::Device("still frame already consumed".to_string()))?;
        sink.deliver(frame);
        Ok(())
    }

    async fn stop(&mut self) -> Result<(), CaptureError> {
        Ok(())
    }
}

/// Synthetic frame source: a deterministic moving gradient at a fixed rate.
///
/// Stands in for a camera wherever device access is unavailable. Frames are
/// canonical-format and carry sequential ids.
pub struct PatternSource {
    config: PatternConfig,
    cancel: Arc<AtomicBool>,
    thread_handle: Option<JoinHandle<()>>,
}

impl PatternSource {
    pub fn new(config: PatternConfig) -> Self {
        Self {
            config,
            cancel: Arc::new(AtomicBool::new(false)),
            thread_handle: None,
        }
    }

    pub fn config(&self) -> &PatternConfig {
        &self.config
    }
}

impl FrameSource for PatternSource {
    async fn start(&mut self, sink: Arc<dyn FrameSink>) -> Result<(), CaptureError> {
        if self.thread_handle.is_some() {
            return Err(CaptureError::Device("pattern source already running".to_string()));
        }
        if self.config.fps() == 0 {
            return Err(CaptureError::Device("frame rate must be nonzero".to_string()));
        }

        self.cancel.store(false, Ordering::Relaxed);
        let config = self.config.clone();
        let cancel = Arc::clone(&self.cancel);
        let handle = thread::spawn(move || capture_loop(config, cancel, sink));
        self.thread_handle = Some(handle);
        Ok(())
    }

    async fn stop(&mut self) -> Result<(), CaptureError> {
        self.cancel.store(true, Ordering::Relaxed);
        if let Some(handle) = self.thread_handle.take() {
            let _ = handle.join();
        }
        Ok(())
    }
}

impl Drop for PatternSource {
    fn drop(&mut self) {
        self.cancel.store(true, Ordering::Relaxed);
        if let Some(handle) = self.thread_handle.take() {
            let _ = handle.join();
        }
    }
}

/// Background thread generation loop; runs until cancelled.
fn capture_loop(config: PatternConfig, cancel: Arc<AtomicBool>, sink: Arc<dyn FrameSink>) {
    let period = Duration::from_secs_f64(1.0 / f64::from(config.fps()));
    let mut frame_id = 0u64;

    while !cancel.load(Ordering::Relaxed) {
        match pattern_frame(&config, frame_id) {
            Ok(frame) => sink.deliver(frame),
            Err(e) => {
                log::error!("pattern frame generation failed: {e}");
                break;
            }
        }
        frame_id += 1;
        thread::sleep(period);
    }

    log::debug!("pattern capture loop stopped after {frame_id} frames");
}

/// One gradient frame: red follows x, green follows y, blue carries a
/// per-frame phase so consecutive frames differ.
fn pattern_frame(config: &PatternConfig, frame_id: u64) -> Result<Frame, ConfigError> {
    let width = config.width();
    let height = config.height();
    let phase = (frame_id % 256) as u8;

    let mut data = Vec::with_capacity(width as usize * height as usize * BYTES_PER_PIXEL);
    for y in 0..height {
        for x in 0..width {
            let red = (x % 256) as u8;
            let green = (y % 256) as u8;
            let blue = phase;
            let pixel = match config.format() {
                PixelFormat::Bgra8 => [blue, green, red, u8::MAX],
                PixelFormat::Rgba8 => [red, green, blue, u8::MAX],
            };
            data.extend_from_slice(&pixel);
        }
    }

    Frame::new(
        frame_id,
        width,
        height,
        config.format(),
        AlphaMode::Premultiplied,
        data,
    )
}
