use crate::InferError;
use std::fmt;

/// Number of keypoints in the COCO pose joint set.
pub const KEYPOINT_COUNT: usize = 17;

/// One detected pose joint.
///
/// Coordinates are normalized to [0, 1] and ordered `(y, x, confidence)`,
/// matching the flat triple layout pose models emit. Consumers scale to
/// their own canvas; this crate never converts units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Keypoint {
    pub y: f32,
    pub x: f32,
    pub confidence: f32,
}

impl Keypoint {
    /// Decode a flat `[y0, x0, c0, y1, x1, c1, ...]` sequence into keypoints.
    ///
    /// Fails if the length is not a multiple of 3. The number of triples is
    /// otherwise up to the model; 17-joint models can be indexed with
    /// [`KeypointIndex`].
    pub fn from_flat(values: &[f32]) -> Result<Vec<Keypoint>, InferError> {
        if values.len() % 3 != 0 {
            return Err(InferError::BadOutput(format!(
                "output length {} is not a multiple of 3",
                values.len()
            )));
        }
        Ok(values
            .chunks_exact(3)
            .map(|triple| Keypoint {
                y: triple[0],
                x: triple[1],
                confidence: triple[2],
            })
            .collect())
    }
}

/// COCO keypoint indices for human pose
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeypointIndex {
    Nose = 0,
    LeftEye = 1,
    RightEye = 2,
    LeftEar = 3,
    RightEar = 4,
    LeftShoulder = 5,
    RightShoulder = 6,
    LeftElbow = 7,
    RightElbow = 8,
    LeftWrist = 9,
    RightWrist = 10,
    LeftHip = 11,
    RightHip = 12,
    LeftKnee = 13,
    RightKnee = 14,
    LeftAnkle = 15,
    RightAnkle = 16,
}

impl KeypointIndex {
    /// All joints in model output order.
    pub const ALL: [KeypointIndex; KEYPOINT_COUNT] = [
        KeypointIndex::Nose,
        KeypointIndex::LeftEye,
        KeypointIndex::RightEye,
        KeypointIndex::LeftEar,
        KeypointIndex::RightEar,
        KeypointIndex::LeftShoulder,
        KeypointIndex::RightShoulder,
        KeypointIndex::LeftElbow,
        KeypointIndex::RightElbow,
        KeypointIndex::LeftWrist,
        KeypointIndex::RightWrist,
        KeypointIndex::LeftHip,
        KeypointIndex::RightHip,
        KeypointIndex::LeftKnee,
        KeypointIndex::RightKnee,
        KeypointIndex::LeftAnkle,
        KeypointIndex::RightAnkle,
    ];

    pub fn from_index(index: usize) -> Option<KeypointIndex> {
        KeypointIndex::ALL.get(index).copied()
    }

    pub fn name(&self) -> &'static str {
        match self {
            KeypointIndex::Nose => "nose",
            KeypointIndex::LeftEye => "left_eye",
            KeypointIndex::RightEye => "right_eye",
            KeypointIndex::LeftEar => "left_ear",
            KeypointIndex::RightEar => "right_ear",
            KeypointIndex::LeftShoulder => "left_shoulder",
            KeypointIndex::RightShoulder => "right_shoulder",
            KeypointIndex::LeftElbow => "left_elbow",
            KeypointIndex::RightElbow => "right_elbow",
            KeypointIndex::LeftWrist => "left_wrist",
            KeypointIndex::RightWrist => "right_wrist",
            KeypointIndex::LeftHip => "left_hip",
            KeypointIndex::RightHip => "right_hip",
            KeypointIndex::LeftKnee => "left_knee",
            KeypointIndex::RightKnee => "right_knee",
            KeypointIndex::LeftAnkle => "left_ankle",
            KeypointIndex::RightAnkle => "right_ankle",
        }
    }
}

impl From<KeypointIndex> for usize {
    fn from(index: KeypointIndex) -> usize {
        index as usize
    }
}

impl fmt::Display for KeypointIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
