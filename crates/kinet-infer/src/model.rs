use crate::{InferError, Keypoint};
use kinet_base::Tensor;

/// A pose-estimation model.
///
/// Implementations accept a float tensor matching their declared input
/// shape (`[batch, height, width, channels]`, bound to `input_name`) and
/// return detected joints in model output order. A failed evaluation is a
/// per-call error; implementations stay usable for subsequent calls.
pub trait PoseModel: Send {
    /// Name of the model input the tensor is bound to.
    fn input_name(&self) -> &str;

    /// Declared input shape, `[batch, height, width, channels]`.
    fn input_shape(&self) -> [usize; 4];

    /// Run the model on one input tensor.
    fn infer(&mut self, input: &Tensor<f32>) -> Result<Vec<Keypoint>, InferError>;
}
