use kinet_infer::{InferError, KEYPOINT_COUNT, Keypoint, KeypointIndex};

#[test]
fn test_from_flat_decodes_triples_in_order() {
    let flat = vec![0.1, 0.2, 0.9, 0.4, 0.5, 0.3];
    let keypoints = Keypoint::from_flat(&flat).unwrap();

    assert_eq!(keypoints.len(), 2);
    assert_eq!(
        keypoints[0],
        Keypoint {
            y: 0.1,
            x: 0.2,
            confidence: 0.9
        }
    );
    assert_eq!(
        keypoints[1],
        Keypoint {
            y: 0.4,
            x: 0.5,
            confidence: 0.3
        }
    );
}

#[test]
fn test_from_flat_rejects_partial_triple() {
    let result = Keypoint::from_flat(&[0.1, 0.2, 0.9, 0.4]);
    assert!(matches!(result, Err(InferError::BadOutput(_))));
}

#[test]
fn test_from_flat_empty_is_no_keypoints() {
    let keypoints = Keypoint::from_flat(&[]).unwrap();
    assert!(keypoints.is_empty());
}

#[test]
fn test_keypoint_index_all_matches_discriminants() {
    assert_eq!(KeypointIndex::ALL.len(), KEYPOINT_COUNT);
    for (i, index) in KeypointIndex::ALL.iter().enumerate() {
        assert_eq!(usize::from(*index), i);
    }
}

#[test]
fn test_keypoint_index_from_index() {
    assert_eq!(KeypointIndex::from_index(0), Some(KeypointIndex::Nose));
    assert_eq!(
        KeypointIndex::from_index(16),
        Some(KeypointIndex::RightAnkle)
    );
    assert_eq!(KeypointIndex::from_index(17), None);
}

#[test]
fn test_keypoint_index_display_names() {
    assert_eq!(KeypointIndex::Nose.to_string(), "nose");
    assert_eq!(KeypointIndex::LeftShoulder.to_string(), "left_shoulder");
    assert_eq!(KeypointIndex::RightAnkle.to_string(), "right_ankle");
}
