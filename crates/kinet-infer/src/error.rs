use std::fmt;

#[derive(Debug)]
pub enum InferError {
    /// The model could not be loaded or initialized.
    ModelLoad(String),
    /// The configured input name does not exist in the model.
    InvalidInput { name: String, available: Vec<String> },
    /// The input tensor shape does not match the model's declared shape.
    ShapeMismatch { expected: [usize; 4], got: Vec<usize> },
    /// Model evaluation failed for this input.
    Evaluation(String),
    /// The model produced output the keypoint decoder cannot interpret.
    BadOutput(String),
}

impl fmt::Display for InferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InferError::ModelLoad(msg) => write!(f, "model load failed: {msg}"),
            InferError::InvalidInput { name, available } => {
                write!(f, "input '{name}' not found in model (available: {available:?})")
            }
            InferError::ShapeMismatch { expected, got } => {
                write!(f, "input shape mismatch: model expects {expected:?}, got {got:?}")
            }
            InferError::Evaluation(msg) => write!(f, "inference failed: {msg}"),
            InferError::BadOutput(msg) => write!(f, "unusable model output: {msg}"),
        }
    }
}

impl std::error::Error for InferError {}
