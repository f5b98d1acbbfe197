use kinet_base::Tensor;
use kinet_infer::{InferError, Keypoint, KeypointIndex, PoseModel};
use kinet_pipeline::{
    FrameDispatcher, FrameSource, PatternConfig, PatternSource, PoseSink, TensorSpec,
};
use std::sync::Arc;
use std::time::Duration;

const TARGET_SIZE: u32 = 192;
const KEYPOINT_THRESHOLD: f32 = 0.1;
const CAPTURE_SECONDS: u64 = 2;

/// Stand-in model producing a fixed upright skeleton so the demo runs
/// without model weights. Swap in `OnnxPoseModel` for real inference.
struct SyntheticPose;

impl PoseModel for SyntheticPose {
    fn input_name(&self) -> &str {
        "input"
    }

    fn input_shape(&self) -> [usize; 4] {
        [1, TARGET_SIZE as usize, TARGET_SIZE as usize, 3]
    }

    fn infer(&mut self, input: &Tensor<f32>) -> Result<Vec<Keypoint>, InferError> {
        // Sway with the blue channel, which varies frame to frame
        let sway = input.data[2] * 0.05;
        Ok(KeypointIndex::ALL
            .iter()
            .map(|&joint| {
                let (y, x) = anchor(joint);
                Keypoint {
                    y,
                    x: x + sway,
                    confidence: 0.8,
                }
            })
            .collect())
    }
}

/// Rest position of each joint, normalized to the frame.
fn anchor(joint: KeypointIndex) -> (f32, f32) {
    use KeypointIndex::*;
    match joint {
        Nose => (0.15, 0.50),
        LeftEye => (0.13, 0.47),
        RightEye => (0.13, 0.53),
        LeftEar => (0.15, 0.44),
        RightEar => (0.15, 0.56),
        LeftShoulder => (0.30, 0.38),
        RightShoulder => (0.30, 0.62),
        LeftElbow => (0.45, 0.32),
        RightElbow => (0.45, 0.68),
        LeftWrist => (0.58, 0.30),
        RightWrist => (0.58, 0.70),
        LeftHip => (0.55, 0.42),
        RightHip => (0.55, 0.58),
        LeftKnee => (0.72, 0.41),
        RightKnee => (0.72, 0.59),
        LeftAnkle => (0.90, 0.40),
        RightAnkle => (0.90, 0.60),
    }
}

/// Prints one line per processed frame with the joints above threshold.
struct ConsolePoses {
    poses: u64,
}

impl PoseSink for ConsolePoses {
    fn publish(&mut self, keypoints: &[Keypoint]) {
        self.poses += 1;
        let visible = keypoints
            .iter()
            .filter(|kp| kp.confidence >= KEYPOINT_THRESHOLD)
            .count();
        let nose = keypoints.first();
        match nose {
            Some(kp) => println!(
                "pose {:>3}: {}/{} joints visible, nose at ({:.2}, {:.2})",
                self.poses,
                visible,
                keypoints.len(),
                kp.x,
                kp.y
            ),
            None => println!("pose {:>3}: empty keypoint set", self.poses),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    kinet_base::init_stdout_logger();

    let model = SyntheticPose;
    println!("Pose Pipeline Demo");
    println!(
        "Model input: {} {:?}",
        model.input_name(),
        model.input_shape()
    );
    println!("Capturing {CAPTURE_SECONDS}s of synthetic frames");
    println!();

    let spec = TensorSpec::default()
        .with_target_width(TARGET_SIZE)
        .with_target_height(TARGET_SIZE)
        .with_normalize(true);
    let (dispatcher, mut faults) =
        FrameDispatcher::new(spec, Box::new(model), Box::new(ConsolePoses { poses: 0 }))?;

    let config = PatternConfig::default()
        .with_width(320)
        .with_height(240)
        .with_fps(15);
    let mut source = PatternSource::new(config);
    println!(
        "Source: {}x{} @ {} fps",
        source.config().width(),
        source.config().height(),
        source.config().fps()
    );
    source.start(Arc::new(dispatcher.clone())).await?;

    tokio::time::sleep(Duration::from_secs(CAPTURE_SECONDS)).await;
    source.stop().await?;
    while !dispatcher.is_idle() {
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    while let Some(fault) = faults.try_recv() {
        log::warn!("pipeline fault: {fault}");
    }

    let stats = dispatcher.stats();
    println!();
    println!(
        "delivered {} frames: {} processed, {} dropped, {} failed",
        stats.delivered, stats.processed, stats.dropped, stats.failed
    );
    Ok(())
}
