use crate::frame::Frame;
use std::sync::Mutex;

/// Single-capacity, overwrite-on-full exchange point between one frame
/// producer and one consumer.
///
/// `put` never blocks on the consumer and never queues: a newer frame
/// replaces an unconsumed older one, which is handed back to the caller
/// for release. Producer latency is therefore independent of consumer
/// speed, and no backlog can form.
pub struct FrameSlot {
    pending: Mutex<Option<Frame>>,
}

impl FrameSlot {
    pub fn new() -> Self {
        Self {
            pending: Mutex::new(None),
        }
    }

    /// Store `frame`, returning any displaced unconsumed frame.
    pub fn put(&self, frame: Frame) -> Option<Frame> {
        let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        pending.replace(frame)
    }

    /// Return and clear the stored frame, or `None` when empty.
    pub fn take(&self) -> Option<Frame> {
        let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        pending.take()
    }

    pub fn is_empty(&self) -> bool {
        let pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        pending.is_none()
    }

    /// Discard any pending frame.
    pub fn clear(&self) {
        let _ = self.take();
    }
}

impl Default for FrameSlot {
    fn default() -> Self {
        Self::new()
    }
}
