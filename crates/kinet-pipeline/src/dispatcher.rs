use crate::config::TensorSpec;
use crate::error::{ConfigError, PipelineError};
use crate::frame::Frame;
use crate::slot::FrameSlot;
use crate::source::FrameSink;
use crate::tensorize::tensorize;
use kinet_infer::{Keypoint, PoseModel};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

/// Receives the keypoints of each successfully processed frame, in model
/// output order and units, unchanged.
pub trait PoseSink: Send {
    fn publish(&mut self, keypoints: &[Keypoint]);
}

/// Faults are reports, not flow control; a slow listener loses reports
/// rather than stalling the drain loop.
const ERROR_CHANNEL_CAPACITY: usize = 16;

/// Receiving side of the dispatcher's error channel.
pub struct ErrorListener {
    error_rx: mpsc::Receiver<PipelineError>,
}

impl ErrorListener {
    pub async fn recv(&mut self) -> Option<PipelineError> {
        self.error_rx.recv().await
    }

    pub fn try_recv(&mut self) -> Option<PipelineError> {
        self.error_rx.try_recv().ok()
    }
}

/// Snapshot of the dispatcher's frame counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DispatcherStats {
    /// Frames handed to `deliver`.
    pub delivered: u64,
    /// Frames discarded unprocessed, displaced by a newer delivery or
    /// cleared by `reset`.
    pub dropped: u64,
    /// Frames that reached the sink.
    pub processed: u64,
    /// Frames that faulted in conversion or inference.
    pub failed: u64,
}

/// The model and sink run only on the drain thread, one frame at a time.
struct Stage {
    model: Box<dyn PoseModel>,
    sink: Box<dyn PoseSink>,
}

struct Shared {
    slot: FrameSlot,
    draining: AtomicBool,
    spec: TensorSpec,
    stage: Mutex<Stage>,
    error_tx: mpsc::Sender<PipelineError>,
    delivered: AtomicU64,
    dropped: AtomicU64,
    processed: AtomicU64,
    failed: AtomicU64,
}

/// Couples the frame slot to the conversion and inference stage with a
/// single-flight drain loop.
///
/// Producers call [`deliver`](FrameDispatcher::deliver) from any thread;
/// at most one drain loop runs at a time, always converging on the newest
/// frame. Handles are cheap clones sharing one pipeline.
#[derive(Clone)]
pub struct FrameDispatcher {
    shared: Arc<Shared>,
}

impl FrameDispatcher {
    /// Create a dispatcher and the listener for its error channel.
    ///
    /// Fails if the conversion spec produces a different tensor shape than
    /// the model declares, so shape mismatches surface at wiring time
    /// instead of per frame.
    pub fn new(
        spec: TensorSpec,
        model: Box<dyn PoseModel>,
        sink: Box<dyn PoseSink>,
    ) -> Result<(Self, ErrorListener), ConfigError> {
        let expected = model.input_shape();
        let produced = spec.tensor_shape();
        if produced != expected {
            return Err(ConfigError::ModelShape {
                model: expected,
                produced,
            });
        }

        let (error_tx, error_rx) = mpsc::channel(ERROR_CHANNEL_CAPACITY);
        let shared = Arc::new(Shared {
            slot: FrameSlot::new(),
            draining: AtomicBool::new(false),
            spec,
            stage: Mutex::new(Stage { model, sink }),
            error_tx,
            delivered: AtomicU64::new(0),
            dropped: AtomicU64::new(0),
            processed: AtomicU64::new(0),
            failed: AtomicU64::new(0),
        });
        Ok((Self { shared }, ErrorListener { error_rx }))
    }

    /// Accept one frame from a producer and make sure a drain loop runs.
    ///
    /// Non-blocking regardless of inference speed: the frame lands in the
    /// slot (displacing an unconsumed older one) and either a new drain
    /// loop starts or the running one picks it up.
    pub fn deliver(&self, frame: Frame) {
        let shared = &self.shared;
        shared.delivered.fetch_add(1, Ordering::Relaxed);

        if let Some(stale) = shared.slot.put(frame) {
            shared.dropped.fetch_add(1, Ordering::Relaxed);
            log::debug!("dropping unconsumed frame {} (newer frame arrived)", stale.id());
        }

        if shared
            .draining
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            // A loop is active; it re-checks the slot before exiting and
            // will pick this frame up itself.
            return;
        }

        let shared = Arc::clone(shared);
        std::thread::spawn(move || drain_loop(shared));
    }

    pub fn stats(&self) -> DispatcherStats {
        let shared = &self.shared;
        DispatcherStats {
            delivered: shared.delivered.load(Ordering::Relaxed),
            dropped: shared.dropped.load(Ordering::Relaxed),
            processed: shared.processed.load(Ordering::Relaxed),
            failed: shared.failed.load(Ordering::Relaxed),
        }
    }

    /// True when no frame is pending and no drain loop is running.
    pub fn is_idle(&self) -> bool {
        self.shared.slot.is_empty() && !self.shared.draining.load(Ordering::Acquire)
    }

    /// Discard a pending unconsumed frame, if any. Part of session
    /// teardown; an active drain loop still finishes its current frame.
    pub fn reset(&self) {
        if let Some(frame) = self.shared.slot.take() {
            self.shared.dropped.fetch_add(1, Ordering::Relaxed);
            log::debug!("discarding pending frame {} on reset", frame.id());
        }
    }
}

impl FrameSink for FrameDispatcher {
    fn deliver(&self, frame: Frame) {
        FrameDispatcher::deliver(self, frame);
    }
}

/// Drain until the slot stays empty.
///
/// The flag release order is what keeps frames from being stranded: the
/// flag is cleared first, then the slot is re-checked, and the loop
/// re-enters only by winning the flag back. Whoever wins the
/// compare-exchange (this loop or a concurrent `deliver`) owns the next
/// loop instance, so exactly one runs at any instant.
fn drain_loop(shared: Arc<Shared>) {
    loop {
        while let Some(frame) = shared.slot.take() {
            process_frame(&shared, frame);
        }

        shared.draining.store(false, Ordering::Release);

        if shared.slot.is_empty() {
            return;
        }
        // A frame landed between the last take and the flag release.
        if shared
            .draining
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            // The delivering thread won the flag and spawns the next loop.
            return;
        }
    }
}

/// Convert, infer, and publish one frame. The frame is consumed and
/// released here on every path, success or fault.
fn process_frame(shared: &Shared, frame: Frame) {
    let frame_id = frame.id();
    match run_stage(shared, &frame) {
        Ok(count) => {
            shared.processed.fetch_add(1, Ordering::Relaxed);
            log::trace!("frame {frame_id}: published {count} keypoints");
        }
        Err(fault) => {
            shared.failed.fetch_add(1, Ordering::Relaxed);
            log::warn!("frame {frame_id}: {fault}");
            report(shared, fault);
        }
    }
}

fn run_stage(shared: &Shared, frame: &Frame) -> Result<usize, PipelineError> {
    let tensor = tensorize(frame, &shared.spec)?;
    let mut stage = shared.stage.lock().unwrap_or_else(|e| e.into_inner());
    let keypoints = stage.model.infer(&tensor)?;
    stage.sink.publish(&keypoints);
    Ok(keypoints.len())
}

fn report(shared: &Shared, fault: PipelineError) {
    match shared.error_tx.try_send(fault) {
        Ok(()) => {}
        Err(TrySendError::Full(fault)) => {
            log::warn!("error channel full, dropping report: {fault}");
        }
        // Listener gone; the warn line above already recorded the fault.
        Err(TrySendError::Closed(_)) => {}
    }
}
