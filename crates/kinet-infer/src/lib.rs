pub mod error;
pub mod keypoint;
pub mod model;
#[cfg(feature = "onnx")]
pub mod onnx;

pub use error::InferError;
pub use keypoint::{KEYPOINT_COUNT, Keypoint, KeypointIndex};
pub use model::PoseModel;
#[cfg(feature = "onnx")]
pub use onnx::{ModelSource, OnnxPoseModel};
